//! Error types for deck-core.

use thiserror::Error;

use crate::chart::ChartTarget;
use crate::surface::Element;

/// Result type for deck-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the presentation.
///
/// None of these are fatal: the controller logs them and keeps navigating.
#[derive(Debug, Error)]
pub enum Error {
    /// The host document does not expose the element.
    #[error("missing element: {0}")]
    MissingElement(Element),

    /// The renderer could not construct a chart.
    #[error("failed to render {target}: {reason}")]
    Render {
        target: ChartTarget,
        reason: String,
    },

    /// The controller configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
