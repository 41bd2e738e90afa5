use dualpage_dom::{ElementNode, ElementScope, MarkupDocument};
use tracing::debug;

use crate::error::{MergeError, MergeResult};

/// Tag of resource-loading elements.
pub const RESOURCE_TAG: &str = "script";

/// Attribute holding the resource location; its value is the dedup key.
pub const LOCATION_ATTR: &str = "src";

// ---------------------------------------------------------------------------
// Keyed elements
// ---------------------------------------------------------------------------

/// Something that can be deduplicated by a string key and rendered back to
/// markup.
pub trait Keyed {
    /// The value two elements must share to count as the same element.
    fn dedup_key(&self) -> &str;

    /// Markup written into the composite document.
    fn markup(&self) -> String;
}

/// A `script` element, keyed by the resource path it loads.
#[derive(Clone, Debug)]
pub struct ResourceReference<'a> {
    pub location: String,
    pub element: ElementNode<'a>,
}

impl Keyed for ResourceReference<'_> {
    fn dedup_key(&self) -> &str {
        &self.location
    }

    fn markup(&self) -> String {
        self.element.to_html()
    }
}

/// Any other body element, keyed by its exact serialized markup with nested
/// scripts cut out.
///
/// Two elements that differ only in attribute order or whitespace get
/// different keys and are both kept.
#[derive(Clone, Debug)]
pub struct ContentElement<'a> {
    pub html: String,
    pub element: ElementNode<'a>,
}

impl Keyed for ContentElement<'_> {
    fn dedup_key(&self) -> &str {
        &self.html
    }

    fn markup(&self) -> String {
        self.html.clone()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The body elements of one document, split by role. Both sequences are in
/// document order.
#[derive(Clone, Debug, Default)]
pub struct Classified<'a> {
    pub resources: Vec<ResourceReference<'a>>,
    pub content: Vec<ContentElement<'a>>,
}

impl Classified<'_> {
    pub fn len(&self) -> usize {
        self.resources.len() + self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.content.is_empty()
    }
}

/// Split the body of `doc` into resource references and content.
///
/// Resources are every `script` under `body`, whatever `scope` says. Content
/// is the non-script elements picked by `scope`, serialized with any nested
/// scripts cut out so that every script is emitted once, after the content.
///
/// Fails with [`MergeError::MissingAttribute`] on the first `script` that
/// has no `src`; such a document is malformed input, not something to
/// merge around.
pub fn classify(doc: &MarkupDocument, scope: ElementScope) -> MergeResult<Classified<'_>> {
    let mut classified = Classified::default();

    for element in doc.select_in_body(RESOURCE_TAG)? {
        let location = element
            .attr(LOCATION_ATTR)
            .ok_or_else(|| MergeError::MissingAttribute {
                variant: doc.variant(),
                tag: element.tag_name().to_string(),
                attribute: LOCATION_ATTR.to_string(),
                snippet: element.snippet(),
            })?;
        classified.resources.push(ResourceReference {
            location: location.to_string(),
            element,
        });
    }

    for element in doc.body_elements(scope)? {
        if !element.is(RESOURCE_TAG) {
            classified.content.push(ContentElement {
                html: element.to_html_without(RESOURCE_TAG),
                element,
            });
        }
    }

    debug!(
        variant = %doc.variant(),
        resources = classified.resources.len(),
        content = classified.content.len(),
        "classified body elements"
    );
    Ok(classified)
}
