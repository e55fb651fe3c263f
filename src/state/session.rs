use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::engine::constants::APP_VERSION;
use crate::error::{PortionError, Result};
use crate::models::{FoodId, SavedData, Theme};
use crate::state::persistence::{load_data, parse_data, save_data, to_json};
use crate::state::{DishShelf, FoodLedger, Notifier};

/// Summary numbers shown by `stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppStats {
    pub version: &'static str,
    pub food_count: usize,
    pub dish_count: usize,
    pub total_weight: f64,
}

/// Everything loaded from one data file: foods, dishes and theme.
///
/// Saving is best effort: a failed save is reported but the in-memory state
/// stays as it is.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    ledger: FoodLedger,
    dishes: DishShelf,
    theme: Theme,
}

impl Session {
    /// Load the data file, falling back to an empty session.
    ///
    /// An unreadable file is reported through the notifier, not returned.
    pub fn open<P: AsRef<Path>>(path: P, notifier: &mut dyn Notifier) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match load_data(&path) {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load saved data");
                notifier.warn(&format!("Failed to load saved data, starting empty: {}", e));
                SavedData::default()
            }
        };
        Self::from_data(path, data)
    }

    /// Build a session from an already parsed document.
    pub fn from_data(path: PathBuf, data: SavedData) -> Self {
        Self {
            path,
            ledger: FoodLedger::from_parts(data.foods, data.next_id),
            dishes: DishShelf::new(data.dishes),
            theme: data.theme,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ledger(&self) -> &FoodLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut FoodLedger {
        &mut self.ledger
    }

    pub fn dishes(&self) -> &DishShelf {
        &self.dishes
    }

    pub fn dishes_mut(&mut self) -> &mut DishShelf {
        &mut self.dishes
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Subtract a dish's tare from a food.
    ///
    /// The dish weight is copied into an ordinary subtraction; the food keeps
    /// no link to the dish.
    pub fn subtract_dish(&mut self, food_id: FoodId, dish_name: &str) -> Result<bool> {
        let weight = self
            .dishes
            .find_by_name(dish_name)
            .map(|d| d.weight)
            .ok_or_else(|| PortionError::DishNotFound(dish_name.to_string()))?;
        Ok(self.ledger.subtract_weight(food_id, weight))
    }

    /// The persisted form of the current state.
    pub fn to_saved_data(&self) -> SavedData {
        SavedData {
            foods: self.ledger.to_foods(),
            dishes: self.dishes.to_dishes(),
            next_id: self.ledger.next_id(),
            theme: self.theme,
        }
    }

    /// Write the current state to the data file.
    pub fn save(&self) -> Result<()> {
        save_data(&self.path, &self.to_saved_data())
    }

    /// Save, reporting a failure instead of returning it.
    pub fn persist(&self, notifier: &mut dyn Notifier) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to save data");
                notifier.warn(&format!("Failed to save data: {}", e));
                false
            }
        }
    }

    /// The full state as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        to_json(&self.to_saved_data())
    }

    /// Replace the whole state with an exported document.
    ///
    /// Nothing changes if the document does not parse.
    pub fn import_json(&mut self, content: &str) -> Result<()> {
        let data = parse_data(content)?;
        if !DishShelf::new(data.dishes.clone()).is_valid() {
            return Err(PortionError::InvalidInput(
                "imported dishes need a name and a positive weight".to_string(),
            ));
        }
        let path = std::mem::take(&mut self.path);
        *self = Self::from_data(path, data);
        Ok(())
    }

    /// Drop every food and dish. The theme and id counter survive.
    pub fn clear_all_data(&mut self) {
        self.ledger.clear_all_foods();
        self.dishes.clear();
    }

    pub fn stats(&self) -> AppStats {
        AppStats {
            version: APP_VERSION,
            food_count: self.ledger.len(),
            dish_count: self.dishes.len(),
            total_weight: self.ledger.total_weight(),
        }
    }
}
