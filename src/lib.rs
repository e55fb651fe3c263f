pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{PortionError, Result};
pub use models::{Calculation, Dish, Food, FoodId, HistoryEntry, HistoryKind, StateSnapshot};
pub use state::{CalculationOutcome, DishShelf, FoodLedger, Notifier, Session};
