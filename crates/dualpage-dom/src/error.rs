//! Error types for the dom crate.

use std::path::PathBuf;

use crate::region::BodyMarker;

/// Errors that can occur while querying a parsed document.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// A CSS selector failed to parse.
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A body marker could not be located in the raw document text.
    #[error("structural error in {}: {marker} marker not found", path.display())]
    Structural { path: PathBuf, marker: BodyMarker },

    /// The parsed tree has no body element.
    #[error("structural error in {}: document has no body element", path.display())]
    MissingBody { path: PathBuf },
}

impl DomError {
    /// Returns `true` for errors that mean the document itself is malformed.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. } | Self::MissingBody { .. })
    }
}

/// Convenience alias for dom results.
pub type DomResult<T> = Result<T, DomError>;
