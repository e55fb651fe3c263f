use serde::{Deserialize, Serialize};

/// A named tare preset. Foods copy its weight at the moment of use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,

    /// Grams, strictly positive.
    pub weight: f64,
}

impl Dish {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Non-empty name and a positive finite weight.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.weight.is_finite() && self.weight > 0.0
    }

    /// Case-insensitive name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Label for option lists, e.g. `"Cup 90g"`.
    pub fn display_text(&self) -> String {
        format!("{} {}g", self.name, self.weight)
    }
}
