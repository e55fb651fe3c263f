use serde::{Deserialize, Serialize};

use crate::models::{HistoryEntry, StateSnapshot};

/// Identifier of a food. Assigned monotonically and never reused.
pub type FoodId = u64;

/// Derivation link: this food weighs `source weight × multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub source_id: FoodId,
    pub multiplier: f64,
}

/// A portion being weighed.
///
/// A food is independent while `calculation` is `None`, and derived from
/// another food otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: FoodId,

    pub name: String,

    /// Grams. May go negative through manual subtraction.
    pub weight: f64,

    #[serde(default)]
    pub calculation: Option<Calculation>,

    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    #[serde(default)]
    pub state_history: Vec<StateSnapshot>,
}

impl Food {
    /// A fresh, empty, independent food.
    pub fn new(id: FoodId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            weight: 0.0,
            calculation: None,
            history: Vec::new(),
            state_history: Vec::new(),
        }
    }

    /// Copy of the current weight and calculation.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            weight: self.weight,
            calculation: self.calculation,
        }
    }

    /// Overwrite weight and calculation from a snapshot.
    pub fn restore(&mut self, snapshot: &StateSnapshot) {
        self.weight = snapshot.weight;
        self.calculation = snapshot.calculation;
    }

    /// Whether the weight is currently derived from another food.
    #[inline]
    pub fn is_derived(&self) -> bool {
        self.calculation.is_some()
    }

    /// Source id of the derivation, if any.
    #[inline]
    pub fn source_id(&self) -> Option<FoodId> {
        self.calculation.map(|c| c.source_id)
    }

    /// Undo is available while at least one history entry remains.
    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Weight rounded to whole grams for display.
    pub fn display_weight(&self) -> String {
        format_weight(self.weight)
    }
}

/// Format grams as a whole number, e.g. `"123g"`.
pub fn format_weight(weight: f64) -> String {
    let rounded = weight.round();
    // avoid printing "-0g"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}g", rounded)
}
