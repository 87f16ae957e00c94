//! Error types for the presentation host.

use thiserror::Error;

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop the host from starting.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed environment setting
    #[error("config error: {0}")]
    Config(String),

    /// Listen address did not parse
    #[error("invalid address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// Controller could not be built
    #[error("deck error: {0}")]
    Deck(#[from] deck_core::Error),

    /// Data source could not be built
    #[error("data source error: {0}")]
    Tables(#[from] deck_tables::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
