use serde::{Deserialize, Serialize};

use crate::models::{Dish, Food, FoodId};

/// Color theme persisted alongside the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// The whole persisted document.
///
/// Every field defaults so that files written by older versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedData {
    #[serde(default)]
    pub foods: Vec<Food>,

    #[serde(default)]
    pub dishes: Vec<Dish>,

    #[serde(default = "default_next_id")]
    pub next_id: FoodId,

    #[serde(default)]
    pub theme: Theme,
}

fn default_next_id() -> FoodId {
    1
}

impl Default for SavedData {
    fn default() -> Self {
        Self {
            foods: Vec::new(),
            dishes: Vec::new(),
            next_id: default_next_id(),
            theme: Theme::default(),
        }
    }
}
