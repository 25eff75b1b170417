//! Path rewriting: anchor trimming, segment-prefix stripping, slug stripping.

use crate::types::SiteRule;

/// Apply the rule's path steps in order.
/// Returns the rewritten path, or `None` if nothing changed.
pub fn transform_path(path: &str, rule: &SiteRule) -> Option<String> {
    let mut current = keep_path_from(path, &rule.keep_path_from);

    let stripped = strip_path_segments(current.as_deref().unwrap_or(path), &rule.strip_path_segments);
    if stripped.is_some() {
        current = stripped;
    }

    if rule.strip_slugs {
        let unslugged = strip_slugs(current.as_deref().unwrap_or(path));
        if unslugged.is_some() {
            current = unslugged;
        }
    }

    current
}

/// Discard every segment before the earliest-occurring anchor.
///
/// Empty segments are ignored when locating the anchor and dropped from the
/// result. An anchor that is already the first segment changes nothing.
pub fn keep_path_from(path: &str, anchors: &[String]) -> Option<String> {
    if anchors.is_empty() {
        return None;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let anchor_index = anchors
        .iter()
        .filter_map(|anchor| {
            segments
                .iter()
                .position(|segment| eq_ignore_case(segment, anchor))
        })
        .min()?;

    if anchor_index == 0 {
        return None;
    }

    Some(format!("/{}", segments[anchor_index..].join("/")))
}

/// Remove every non-empty segment that starts with one of `prefixes`.
/// Empty segments (leading slash, double slashes) are kept in place.
pub fn strip_path_segments(path: &str, prefixes: &[String]) -> Option<String> {
    if prefixes.is_empty() {
        return None;
    }

    let mut removed = false;
    let kept: Vec<&str> = path
        .split('/')
        .filter(|segment| {
            let strip = !segment.is_empty()
                && prefixes.iter().any(|prefix| starts_with_ignore_case(segment, prefix));
            removed |= strip;
            !strip
        })
        .collect();

    removed.then(|| kept.join("/"))
}

/// Cut `{digits}-{slug}` segments down to `{digits}`.
pub fn strip_slugs(path: &str) -> Option<String> {
    let mut changed = false;
    let segments: Vec<&str> = path
        .split('/')
        .map(|segment| match slug_id(segment) {
            Some(id) => {
                changed = true;
                id
            }
            None => segment,
        })
        .collect();

    changed.then(|| segments.join("/"))
}

/// The numeric id of a segment shaped like `2409726-travel-adapter`.
fn slug_id(segment: &str) -> Option<&str> {
    let hyphen = segment.find('-')?;
    let id = &segment[..hyphen];
    (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())).then_some(id)
}

#[inline]
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

#[inline]
fn starts_with_ignore_case(segment: &str, prefix: &str) -> bool {
    if segment.len() >= prefix.len()
        && segment.is_char_boundary(prefix.len())
        && segment[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        return true;
    }
    segment.to_lowercase().starts_with(&prefix.to_lowercase())
}
