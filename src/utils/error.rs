use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Dataset request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported operation: {operation}")]
    UnsupportedOperationError { operation: String },
}

pub type Result<T> = std::result::Result<T, BudgetError>;
