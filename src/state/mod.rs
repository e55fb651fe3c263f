mod dishes;
mod ledger;
mod notify;
mod persistence;
mod session;

pub use dishes::{DishOption, DishShelf};
pub use ledger::{CalculationOption, CalculationOutcome, FoodLedger};
pub use notify::Notifier;
pub use persistence::{load_data, parse_data, save_data, to_json, write_history_csv};
pub use session::{AppStats, Session};
