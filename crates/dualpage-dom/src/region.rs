use std::fmt;

use serde::{Deserialize, Serialize};

const OPEN_MARKER: &str = "<body";
const CLOSE_MARKER: &str = "</body";

/// Elements whose content is raw text: markup inside them is not markup.
const RAW_TEXT_TAGS: [(&str, &str); 2] = [("<script", "</script"), ("<style", "</style")];

/// Which half of the body region could not be found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMarker {
    Open,
    Close,
}

impl fmt::Display for BodyMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("opening <body>"),
            Self::Close => f.write_str("closing </body>"),
        }
    }
}

/// Byte offsets of the body content inside the raw document text.
///
/// `start` is the position right after the `>` of the opening body tag;
/// `end` is the position of the `<` of the closing body tag. Everything in
/// `start..end` is the body content, everything outside it is preserved
/// verbatim when the region is rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRegion {
    pub start: usize,
    pub end: usize,
}

impl BodyRegion {
    /// Locate the body region in `text`.
    ///
    /// Markers are matched ASCII case-insensitively and the opening tag may
    /// carry attributes (`<body class="app">`), including quoted values that
    /// contain `>`. Comments and the content of `script` and `style`
    /// elements are skipped. Only the first body region is considered.
    pub fn locate(text: &str) -> Result<Self, BodyMarker> {
        // ASCII lowercasing keeps every byte offset stable.
        let lowered = text.to_ascii_lowercase();

        let open_at = find_tag(&lowered, OPEN_MARKER, 0).ok_or(BodyMarker::Open)?;
        let start = tag_end(&lowered, open_at).ok_or(BodyMarker::Open)?;
        let end = find_tag(&lowered, CLOSE_MARKER, start).ok_or(BodyMarker::Close)?;

        Ok(Self { start, end })
    }

    /// Length of the body content in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the body has no content.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Text before the body content, up to and including the opening tag.
    pub fn prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(..self.start)
    }

    /// The body content itself.
    pub fn content<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start..self.end)
    }

    /// Text from the closing tag to the end of the document.
    pub fn suffix<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.end..)
    }
}

/// Find the tag `marker` at or after `from`, outside comments and raw-text
/// elements.
fn find_tag(haystack: &str, marker: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(rel) = haystack.get(cursor..)?.find('<') {
        let at = cursor + rel;
        let rest = &haystack[at..];
        if rest.starts_with("<!--") {
            cursor = at + 4 + rest[4..].find("-->")? + 3;
        } else if is_tag_at(haystack, at, marker) {
            return Some(at);
        } else if let Some((_, close)) = RAW_TEXT_TAGS
            .iter()
            .find(|(open, _)| is_tag_at(haystack, at, open))
        {
            let end = tag_end(haystack, at)?;
            cursor = find_plain_tag(haystack, close, end)?;
        } else {
            cursor = at + 1;
        }
    }
    None
}

/// Find `marker` with no regard for comments, as inside raw text.
fn find_plain_tag(haystack: &str, marker: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(rel) = haystack.get(cursor..)?.find(marker) {
        let at = cursor + rel;
        if is_tag_at(haystack, at, marker) {
            return Some(at);
        }
        cursor = at + marker.len();
    }
    None
}

/// `marker` starts at `at` and is followed by a tag delimiter, so `<bodyx>`
/// does not match `<body`.
fn is_tag_at(haystack: &str, at: usize, marker: &str) -> bool {
    haystack[at..].starts_with(marker)
        && matches!(
            haystack.as_bytes().get(at + marker.len()),
            Some(b) if *b == b'>' || *b == b'/' || b.is_ascii_whitespace()
        )
}

/// Offset just past the `>` closing the tag that starts at `from`, ignoring
/// `>` inside quoted attribute values.
fn tag_end(haystack: &str, from: usize) -> Option<usize> {
    let mut quote = None;
    for (i, b) in haystack.bytes().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_plain_body() {
        let text = "<html><head></head><body><p>x</p></body></html>";
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(region.content(text), Some("<p>x</p>"));
        assert_eq!(region.prefix(text), Some("<html><head></head><body>"));
        assert_eq!(region.suffix(text), Some("</body></html>"));
    }

    #[test]
    fn locates_body_with_attributes_and_case() {
        let text = "<HTML><BODY class=\"app\">\n<main></main>\n</BODY ></HTML>";
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(region.content(text), Some("\n<main></main>\n"));
        assert_eq!(region.suffix(text), Some("</BODY ></HTML>"));
    }

    #[test]
    fn skips_lookalike_tags() {
        let text = "<bodyguard></bodyguard><body>x</body>";
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(region.content(text), Some("x"));
    }

    #[test]
    fn skips_body_tag_in_comment() {
        let text = "<html><head><!-- <body>old</body> --></head><body><p>x</p></body></html>";
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(region.content(text), Some("<p>x</p>"));
        assert!(region.prefix(text).unwrap().ends_with("--></head><body>"));
    }

    #[test]
    fn skips_body_tag_in_script() {
        let text = concat!(
            "<html><head><script>var s = '<body>';</script></head>",
            "<body><script src=\"a.js\"></script><script>document.write('</body>')</script></body></html>"
        );
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(
            region.content(text),
            Some("<script src=\"a.js\"></script><script>document.write('</body>')</script>")
        );
    }

    #[test]
    fn quoted_angle_bracket_in_body_attribute() {
        let text = r#"<html><body data-x="a>b" class='c>d'><p>x</p></body></html>"#;
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(region.content(text), Some("<p>x</p>"));
        assert_eq!(
            region.prefix(text),
            Some(r#"<html><body data-x="a>b" class='c>d'>"#)
        );
    }

    #[test]
    fn unterminated_comment_hides_body() {
        assert_eq!(
            BodyRegion::locate("<html><!-- <body></body></html>"),
            Err(BodyMarker::Open)
        );
    }

    #[test]
    fn empty_body() {
        let text = "<body></body>";
        let region = BodyRegion::locate(text).unwrap();
        assert!(region.is_empty());
        assert_eq!(region.len(), 0);
    }

    #[test]
    fn missing_open_marker() {
        assert_eq!(
            BodyRegion::locate("<html><div></div></html>"),
            Err(BodyMarker::Open)
        );
    }

    #[test]
    fn unterminated_open_tag() {
        assert_eq!(BodyRegion::locate("<html><body class="), Err(BodyMarker::Open));
    }

    #[test]
    fn missing_close_marker() {
        assert_eq!(
            BodyRegion::locate("<html><body><div></div></html>"),
            Err(BodyMarker::Close)
        );
    }

    #[test]
    fn close_marker_before_open_is_ignored() {
        assert_eq!(
            BodyRegion::locate("</body><body><p></p>"),
            Err(BodyMarker::Close)
        );
    }

    #[test]
    fn offsets_survive_multibyte_text() {
        let text = "<head><title>Ünïcødé</title></head><body>ß</body>";
        let region = BodyRegion::locate(text).unwrap();
        assert_eq!(region.content(text), Some("ß"));
    }
}
