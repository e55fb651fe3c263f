use serde::{Deserialize, Serialize};

use crate::models::Calculation;

/// Kind of operation recorded in a food's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Add,
    Subtract,
    Calculation,
    AutoRecalculation,
}

impl HistoryKind {
    /// Label used in history listings and CSV exports.
    pub fn label(self) -> &'static str {
        match self {
            HistoryKind::Add => "add",
            HistoryKind::Subtract => "subtract",
            HistoryKind::Calculation => "calculation",
            HistoryKind::AutoRecalculation => "auto_recalculation",
        }
    }
}

/// One past operation on a food.
///
/// For `Add`/`Subtract` the value is the amount applied; for `Calculation` and
/// `AutoRecalculation` it is the resulting weight. `source_name` is captured
/// when the entry is created and never follows later renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,

    pub value: f64,

    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl HistoryEntry {
    /// Entry for a manual add or subtract.
    pub fn manual(kind: HistoryKind, value: f64) -> Self {
        Self {
            kind,
            value,
            timestamp: current_time_string(),
            source_name: None,
            multiplier: None,
        }
    }

    /// Entry for a calculation or an automatic recalculation.
    pub fn derived(kind: HistoryKind, value: f64, source_name: &str, multiplier: f64) -> Self {
        Self {
            kind,
            value,
            timestamp: current_time_string(),
            source_name: Some(source_name.to_string()),
            multiplier: Some(multiplier),
        }
    }

    /// Human-readable description for history listings.
    pub fn describe(&self) -> String {
        match self.kind {
            HistoryKind::Add => format!("+{}g", self.value.round()),
            HistoryKind::Subtract => format!("-{}g", self.value.round()),
            HistoryKind::Calculation | HistoryKind::AutoRecalculation => {
                let source = self.source_name.as_deref().unwrap_or("?");
                let multiplier = self.multiplier.unwrap_or(1.0);
                let prefix = if self.kind == HistoryKind::Calculation {
                    "calc"
                } else {
                    "auto"
                };
                format!(
                    "{} {} × {} = {}g",
                    prefix,
                    source,
                    multiplier,
                    self.value.round()
                )
            }
        }
    }
}

/// Weight and calculation captured right before a mutation, popped by undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub weight: f64,
    pub calculation: Option<Calculation>,
}

/// Local wall-clock time as `HH:MM`.
pub fn current_time_string() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_entry_has_no_source() {
        let entry = HistoryEntry::manual(HistoryKind::Add, 100.0);
        assert_eq!(entry.kind, HistoryKind::Add);
        assert!(entry.source_name.is_none());
        assert!(entry.multiplier.is_none());
        assert_eq!(entry.timestamp.len(), 5);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let entry = HistoryEntry::derived(HistoryKind::AutoRecalculation, 50.0, "Rice", 0.5);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "auto_recalculation");
        assert_eq!(json["sourceName"], "Rice");
        assert_eq!(json["multiplier"], 0.5);
    }

    #[test]
    fn test_describe() {
        let entry = HistoryEntry::derived(HistoryKind::Calculation, 49.6, "Rice", 0.5);
        assert_eq!(entry.describe(), "calc Rice × 0.5 = 50g");
        assert_eq!(HistoryEntry::manual(HistoryKind::Subtract, 120.0).describe(), "-120g");
    }
}
