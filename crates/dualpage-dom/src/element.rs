use std::fmt;

use scraper::{ElementRef, Selector};

/// Maximum number of characters kept by [`ElementNode::snippet`].
pub const SNIPPET_LEN: usize = 80;

/// A read-only view of one element inside a parsed [`MarkupDocument`].
///
/// The view borrows the document's tree; it never mutates it.
///
/// [`MarkupDocument`]: crate::MarkupDocument
#[derive(Clone, Copy)]
pub struct ElementNode<'a> {
    inner: ElementRef<'a>,
}

impl<'a> ElementNode<'a> {
    pub(crate) fn new(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }

    /// Lowercase local tag name (`script`, `div`, ...).
    pub fn tag_name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Returns `true` if the element has the given tag name.
    pub fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    /// Value of an attribute exactly as it appears in the tree.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.inner.value().attrs()
    }

    /// Serialize the element (tag, attributes and children) back to markup.
    pub fn to_html(&self) -> String {
        self.inner.html()
    }

    /// Serialize the element with every descendant `tag` element cut out.
    ///
    /// The element itself is kept even if it matches `tag`.
    pub fn to_html_without(&self, tag: &str) -> String {
        let mut html = self.to_html();
        let mut cursor = 0;
        for nested in self.descendant_elements().filter(|e| e.is(tag)) {
            let cut = nested.to_html();
            if let Some(at) = html[cursor..].find(&cut) {
                let start = cursor + at;
                html.replace_range(start..start + cut.len(), "");
                cursor = start;
            }
        }
        html
    }

    /// Direct element children in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = ElementNode<'a>> {
        self.inner.children().filter_map(ElementRef::wrap).map(Self::new)
    }

    /// Every element below this one in document order, excluding itself.
    pub fn descendant_elements(&self) -> impl Iterator<Item = ElementNode<'a>> {
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(Self::new)
    }

    pub(crate) fn matches(&self, selector: &Selector) -> bool {
        selector.matches(&self.inner)
    }

    /// Serialized markup truncated to [`SNIPPET_LEN`] characters, for error
    /// messages and logs.
    pub fn snippet(&self) -> String {
        let html = self.to_html();
        match html.char_indices().nth(SNIPPET_LEN) {
            Some((cut, _)) => format!("{}...", &html[..cut]),
            None => html,
        }
    }
}

impl fmt::Debug for ElementNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementNode")
            .field("tag", &self.tag_name())
            .field("html", &self.snippet())
            .finish()
    }
}
