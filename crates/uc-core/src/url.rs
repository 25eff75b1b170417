//! Raw URL text utilities
//!
//! Cleaning output is assembled from slices of the text the user supplied,
//! so these helpers work directly on the original string and never
//! re-serialize a parsed URL.

use std::borrow::Cow;

use ::url::Url;

// =============================================================================
// Scheme & Parsing
// =============================================================================

/// Parse `text` as an absolute `http`/`https` URL.
///
/// Besides the parser's own checks, the raw text must literally begin with
/// `scheme://` and hold no tab or newline, since output is rebuilt from
/// offsets into that text and the parser silently drops those characters.
pub fn parse_http_url(text: &str) -> Option<Url> {
    if text.contains(['\t', '\n', '\r']) {
        return None;
    }

    let url = Url::parse(text).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let scheme_end = get_scheme_end(text)?;
    let written_scheme = &text[..scheme_end - 3];
    if !written_scheme.eq_ignore_ascii_case(url.scheme()) {
        return None;
    }

    Some(url)
}

/// Get the position after "://".
#[inline]
pub fn get_scheme_end(url: &str) -> Option<usize> {
    let bytes = url.as_bytes();

    let colon_pos = bytes.iter().position(|&b| b == b':')?;

    if bytes.len() > colon_pos + 2
        && bytes[colon_pos + 1] == b'/'
        && bytes[colon_pos + 2] == b'/'
    {
        return Some(colon_pos + 3);
    }

    None
}

/// Position where the authority ends: the first `/`, `?` or `#` after the
/// scheme separator, or the end of the text.
#[inline]
pub fn get_authority_end(url: &str, scheme_end: usize) -> usize {
    url.as_bytes()[scheme_end..]
        .iter()
        .position(|&b| b == b'/' || b == b'?' || b == b'#')
        .map_or(url.len(), |i| scheme_end + i)
}

// =============================================================================
// Raw Components
// =============================================================================

/// A URL split into verbatim slices of its original text.
///
/// Concatenating the four parts yields the input again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParts<'a> {
    /// Scheme, separator and authority exactly as written.
    pub base: &'a str,
    /// Path including its leading `/`; empty when the text has no path slash.
    pub path: &'a str,
    /// Query including its leading `?`; empty when absent.
    pub query: &'a str,
    /// Fragment including its leading `#`; empty when absent.
    pub fragment: &'a str,
}

impl<'a> RawParts<'a> {
    /// Split `url` at the authority end, the first `?` and the first `#`.
    pub fn split(url: &'a str) -> Option<Self> {
        let scheme_end = get_scheme_end(url)?;
        let authority_end = get_authority_end(url, scheme_end);
        let (base, rest) = url.split_at(authority_end);

        let (before_fragment, fragment) = match rest.find('#') {
            Some(pos) => rest.split_at(pos),
            None => (rest, ""),
        };
        let (path, query) = match before_fragment.find('?') {
            Some(pos) => before_fragment.split_at(pos),
            None => (before_fragment, ""),
        };

        Some(Self {
            base,
            path,
            query,
            fragment,
        })
    }
}

// =============================================================================
// Query Parameter Keys
// =============================================================================

/// The raw key of a `key=value` pair (the whole pair if there is no `=`).
#[inline]
pub fn pair_key(pair: &str) -> &str {
    match pair.find('=') {
        Some(eq_pos) => &pair[..eq_pos],
        None => pair,
    }
}

/// Percent-decode a parameter key for comparison.
///
/// Sequences that do not decode to UTF-8 fall back to the raw key text.
/// `+` is left as-is.
pub fn decode_key(raw_key: &str) -> Cow<'_, str> {
    urlencoding::decode(raw_key).unwrap_or(Cow::Borrowed(raw_key))
}
