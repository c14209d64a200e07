//! Error types for the designer crate.
//!
//! Only the strict document API returns these. The sampler and the placement
//! gate degrade gracefully instead of failing.

use thiserror::Error;

/// Errors raised while reading artwork documents.
#[derive(Error, Debug)]
pub enum DesignerError {
    /// The document is not well-formed XML.
    #[error("Malformed SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document parsed but its root element is not `<svg>`.
    #[error("Document root is <{found}>, expected <svg>")]
    MissingSvgRoot { found: String },

    /// A geometry element carried attribute data that could not be parsed.
    #[error("Invalid <{element}> geometry: {reason}")]
    InvalidGeometry { element: String, reason: String },
}

impl DesignerError {
    pub fn invalid_geometry(element: &str, reason: impl Into<String>) -> Self {
        DesignerError::InvalidGeometry {
            element: element.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for designer operations.
pub type Result<T> = std::result::Result<T, DesignerError>;
