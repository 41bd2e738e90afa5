//! Markup documents for dualpage.
//!
//! Wraps the HTML5 parser behind the small surface the merge engine needs:
//! selecting the body, walking its elements, reading attributes, serializing
//! elements back to markup, and locating the body region in the raw text.
//!
//! # Key Types
//!
//! - [`MarkupDocument`] -- raw text plus parsed tree for one build variant
//! - [`ElementNode`] -- borrowed, read-only view of one element
//! - [`BodyRegion`] -- byte offsets of the body content in the raw text
//! - [`Variant`] / [`ElementScope`] -- which build, which body elements

pub mod document;
pub mod element;
pub mod error;
pub mod region;

pub use document::{ElementScope, MarkupDocument, Variant};
pub use element::ElementNode;
pub use error::{DomError, DomResult};
pub use region::{BodyMarker, BodyRegion};
