//! Error types for dataset loading and analysis

use thiserror::Error;

/// Errors that can occur while loading or analyzing a listing dataset
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid suburb: {0}. Please enter a valid suburb.")]
    UnknownSuburb(String),

    #[error("Invalid exchange rate: {0} (must be a positive finite number)")]
    InvalidRate(f64),

    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;
