mod dish;
mod food;
mod history;
mod saved;

pub use dish::Dish;
pub use food::{format_weight, Calculation, Food, FoodId};
pub use history::{current_time_string, HistoryEntry, HistoryKind, StateSnapshot};
pub use saved::{SavedData, Theme};
