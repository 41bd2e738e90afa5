use std::fmt;
use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::ElementNode;
use crate::error::{DomError, DomResult};
use crate::region::BodyRegion;

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// Which build produced a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Transpiled for older engines (`nomodule` scripts).
    Legacy,
    /// Built for engines with module support (`type="module"` scripts).
    Modern,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Modern => f.write_str("modern"),
        }
    }
}

// ---------------------------------------------------------------------------
// ElementScope
// ---------------------------------------------------------------------------

/// Which elements under `body` are handed to the merge stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementScope {
    /// Direct element children of `body`.
    #[default]
    Children,
    /// Every element under `body`, in document order.
    Descendants,
}

// ---------------------------------------------------------------------------
// MarkupDocument
// ---------------------------------------------------------------------------

/// One input document: its raw text and the element tree parsed from it.
pub struct MarkupDocument {
    variant: Variant,
    path: PathBuf,
    raw: String,
    tree: Html,
}

impl MarkupDocument {
    /// Parse `raw` into a document.
    ///
    /// Parsing never fails: the HTML5 algorithm recovers from any input.
    /// Malformed structure surfaces later, from [`Self::body_region`].
    pub fn parse(variant: Variant, path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let path = path.into();
        let tree = Html::parse_document(&raw);
        debug!(
            %variant,
            path = %path.display(),
            bytes = raw.len(),
            parse_errors = tree.errors.len(),
            "parsed document"
        );
        Self {
            variant,
            path,
            raw,
            tree,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The unmodified source text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `body` element of the parsed tree.
    pub fn body(&self) -> DomResult<ElementNode<'_>> {
        let selector = parse_selector("body")?;
        self.tree
            .select(&selector)
            .next()
            .map(ElementNode::new)
            .ok_or_else(|| DomError::MissingBody {
                path: self.path.clone(),
            })
    }

    /// Elements under `body` selected by `scope`, in document order.
    pub fn body_elements(&self, scope: ElementScope) -> DomResult<Vec<ElementNode<'_>>> {
        let body = self.body()?;
        let elements: Vec<_> = match scope {
            ElementScope::Children => body.child_elements().collect(),
            ElementScope::Descendants => body.descendant_elements().collect(),
        };
        Ok(elements)
    }

    /// Elements under `body` matching a CSS selector, in document order.
    pub fn select_in_body(&self, selector: &str) -> DomResult<Vec<ElementNode<'_>>> {
        let selector = parse_selector(selector)?;
        let body = self.body()?;
        Ok(body_select(body, &selector))
    }

    /// Byte offsets of the body content in [`Self::raw`].
    pub fn body_region(&self) -> DomResult<BodyRegion> {
        BodyRegion::locate(&self.raw).map_err(|marker| DomError::Structural {
            path: self.path.clone(),
            marker,
        })
    }
}

impl fmt::Debug for MarkupDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupDocument")
            .field("variant", &self.variant)
            .field("path", &self.path)
            .field("bytes", &self.raw.len())
            .finish()
    }
}

fn parse_selector(selector: &str) -> DomResult<Selector> {
    Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn body_select<'a>(body: ElementNode<'a>, selector: &Selector) -> Vec<ElementNode<'a>> {
    body.descendant_elements()
        .filter(|e| e.matches(selector))
        .collect()
}
