//! Summary Error Types

use thiserror::Error;

/// Errors while loading or summarizing a dataset
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column {column} has dtype {dtype}, expected a numeric column")]
    NotNumeric { column: String, dtype: &'static str },

    #[error("Column {column} has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Statistics error: {0}")]
    Statistics(String),
}
