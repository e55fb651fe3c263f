use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortionError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Dish not found: {0}")]
    DishNotFound(String),

    #[error("A dish named '{0}' already exists")]
    DuplicateDish(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PortionError>;
