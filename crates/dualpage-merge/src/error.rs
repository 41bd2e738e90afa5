//! Error types for the merge crate.

use std::fmt;
use std::io;
use std::path::PathBuf;

use dualpage_dom::{DomError, Variant};

/// The filesystem operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
    Remove,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// Errors that abort a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// An input could not be read, the output could not be written, or an
    /// input could not be removed.
    #[error("io error: failed to {op} {}: {source}", path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document structure needed for the merge is missing.
    #[error(transparent)]
    Structural(DomError),

    /// A document query could not be built.
    #[error(transparent)]
    Query(DomError),

    /// A resource-loading element has no location attribute.
    #[error("{variant} document: <{tag}> element has no '{attribute}' attribute: {snippet}")]
    MissingAttribute {
        variant: Variant,
        tag: String,
        attribute: String,
        snippet: String,
    },

    /// A body region does not fit the text it is applied to.
    #[error("body region {start}..{end} is out of bounds for a document of {len} bytes")]
    RegionOutOfBounds { start: usize, end: usize, len: usize },

    /// The configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MergeError {
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl From<DomError> for MergeError {
    fn from(err: DomError) -> Self {
        if err.is_structural() {
            Self::Structural(err)
        } else {
            Self::Query(err)
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use dualpage_dom::BodyMarker;

    use super::*;

    #[test]
    fn structural_dom_errors_stay_structural() {
        let err = MergeError::from(DomError::Structural {
            path: PathBuf::from("legacy.index.html"),
            marker: BodyMarker::Close,
        });
        assert!(matches!(err, MergeError::Structural(_)));

        let err = MergeError::from(DomError::MissingBody {
            path: PathBuf::from("legacy.index.html"),
        });
        assert!(matches!(err, MergeError::Structural(_)));
    }

    #[test]
    fn invalid_selector_is_a_query_error() {
        let err = MergeError::from(DomError::InvalidSelector {
            selector: "[[".into(),
            message: "unexpected token".into(),
        });
        assert!(matches!(err, MergeError::Query(_)));
        assert!(err.to_string().starts_with("invalid selector '[['"));
    }
}
