//! Error types for deck-tables.

use thiserror::Error;

use crate::schema::TableId;

/// Result type for table loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a remote table could not be used.
///
/// Every one of these ends in the table's fallback rows being shown.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed base URL or resource path
    #[error("invalid URL: {0}")]
    Url(String),

    /// CSV could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource does not exist in the source
    #[error("not found: {0}")]
    NotFound(String),

    /// Parsing succeeded but no row survived filtering
    #[error("{table} has no usable rows")]
    Empty { table: TableId },

    /// Flow diagram CSV had no usable links
    #[error("flow data has no usable links")]
    EmptyFlow,
}
