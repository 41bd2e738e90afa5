use dualpage_dom::BodyRegion;

use crate::classify::{ContentElement, Keyed, ResourceReference};
use crate::error::{MergeError, MergeResult};

/// Concatenate the markup of `items` with no separator.
pub fn serialize<T: Keyed>(items: &[T]) -> String {
    items.iter().map(Keyed::markup).collect()
}

/// Replace the body content of `raw` with `content` followed by `resources`.
///
/// Text outside `region` is copied byte for byte. Resources are always
/// written after all content so every static element exists before the
/// first script runs.
pub fn splice(
    raw: &str,
    region: BodyRegion,
    content: &[ContentElement<'_>],
    resources: &[ResourceReference<'_>],
) -> MergeResult<String> {
    let (prefix, suffix) = match (region.prefix(raw), region.suffix(raw)) {
        (Some(prefix), Some(suffix)) if region.start <= region.end => (prefix, suffix),
        _ => {
            return Err(MergeError::RegionOutOfBounds {
                start: region.start,
                end: region.end,
                len: raw.len(),
            })
        }
    };

    let body = serialize(content);
    let scripts = serialize(resources);

    let mut out = String::with_capacity(prefix.len() + body.len() + scripts.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(&body);
    out.push_str(&scripts);
    out.push_str(suffix);
    Ok(out)
}
