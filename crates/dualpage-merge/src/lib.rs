//! Merge engine for dualpage.
//!
//! Combines the legacy and modern builds of one page into a single
//! document. Body elements of both builds are split into resource
//! references (`script` elements, keyed by `src`) and content elements
//! (keyed by their exact markup), deduplicated in first-seen order with the
//! legacy build taking priority, and spliced back into the legacy document
//! with all resources after all content.
//!
//! # Quick Start
//!
//! ```rust
//! use dualpage_dom::{ElementScope, MarkupDocument, Variant};
//! use dualpage_merge::merge_documents;
//!
//! let legacy = MarkupDocument::parse(
//!     Variant::Legacy,
//!     "legacy.index.html",
//!     r#"<html><head></head><body><div>A</div><script src="x.js"></script></body></html>"#,
//! );
//! let modern = MarkupDocument::parse(
//!     Variant::Modern,
//!     "modern.index.html",
//!     r#"<html><head></head><body><div>A</div><script src="y.js"></script></body></html>"#,
//! );
//! let plan = merge_documents(&legacy, &modern, ElementScope::Children).unwrap();
//! assert_eq!(
//!     plan.body(),
//!     r#"<div>A</div><script src="x.js"></script><script src="y.js"></script>"#
//! );
//! ```
//!
//! # Key Types
//!
//! - [`MergePipeline`] -- load, merge, write and clean up per [`MergeConfig`]
//! - [`MergePlan`] / [`MergeReport`] -- the composite document and its summary
//! - [`Keyed`] -- dedup key plus markup, implemented by both element kinds
//! - [`OrderedSet`] -- insertion-ordered set backing [`dedup_ordered`]

pub mod classify;
pub mod compose;
pub mod config;
pub mod dedup;
pub mod error;
pub mod io;
pub mod pipeline;

// Re-exports for convenience.
pub use classify::{
    classify, Classified, ContentElement, Keyed, ResourceReference, LOCATION_ATTR, RESOURCE_TAG,
};
pub use compose::{serialize, splice};
pub use config::MergeConfig;
pub use dedup::{dedup_ordered, Deduplicated, OrderedSet};
pub use error::{IoOp, MergeError, MergeResult};
pub use io::{load_documents, write_and_cleanup, Cleanup, SourcePair};
pub use pipeline::{
    merge_documents, ElementSummary, MergePipeline, MergePlan, MergeReport, Stage, StageTiming,
};
