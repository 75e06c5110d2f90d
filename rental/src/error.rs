use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("a save is already in flight")]
    SaveInFlight,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RentalError>;
