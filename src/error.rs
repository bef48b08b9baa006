//! Centralized error types for the anomaly pipeline

use thiserror::Error;

/// Main pipeline error type
#[derive(Error, Debug)]
pub enum AnomalyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Order count query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("No transaction counts returned from the database")]
    EmptyInput,

    #[error("CSV export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AnomalyError>;

/// Helper to convert csv serialization errors
impl From<csv::Error> for AnomalyError {
    fn from(err: csv::Error) -> Self {
        AnomalyError::Export(err.to_string())
    }
}
