//! URL Cleaning Engine
//!
//! Every clipboard or pipe event goes through here. The cleaner resolves the
//! site rule, runs the path, query and fragment stages against the original
//! text, and rebuilds the URL only when one of them changed something.

use crate::fragment::strips_fragment;
use crate::path::transform_path;
use crate::query::{transform_query, QueryPolicy};
use crate::resolver::{resolve_rule, Resolution};
use crate::types::{Config, ParamSet};
use crate::url::{parse_http_url, RawParts};

// =============================================================================
// Cleaner
// =============================================================================

/// Cleans URLs against one configuration snapshot.
///
/// The flattened tracking-param set is computed once, so a long-lived host
/// should keep a `Cleaner` per snapshot rather than calling [`try_clean`]
/// in a loop.
#[derive(Debug, Clone)]
pub struct Cleaner<'a> {
    config: &'a Config,
    tracking: ParamSet,
}

/// What each stage produced for one URL. `None` means "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub path: Option<String>,
    pub query: Option<String>,
    pub strip_fragment: bool,
}

impl Rewrite {
    pub fn is_unchanged(&self) -> bool {
        self.path.is_none() && self.query.is_none() && !self.strip_fragment
    }
}

impl<'a> Cleaner<'a> {
    /// Create a cleaner for the given configuration.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            tracking: config.all_tracking_params(),
        }
    }

    /// Clean `text`, returning the rewritten URL or `None` when the text is
    /// not a cleanable URL or nothing would change.
    pub fn clean(&self, text: &str) -> Option<String> {
        let text = if self.config.trim_url { text.trim() } else { text };

        let url = parse_http_url(text)?;
        let host = url.host_str().unwrap_or_default();

        let rule = match resolve_rule(host, &self.config.site_rules) {
            Resolution::Disabled => return None,
            resolution => resolution.rule(),
        };

        let parts = RawParts::split(text)?;
        let policy = QueryPolicy::for_rule(&self.tracking, rule);

        let rewrite = Rewrite {
            path: rule
                .filter(|rule| rule.rewrites_path())
                .and_then(|rule| transform_path(parts.path, rule)),
            query: if policy.is_noop() {
                None
            } else {
                transform_query(parts.query, &policy)
            },
            strip_fragment: strips_fragment(parts.fragment, rule),
        };

        if rewrite.is_unchanged() {
            return None;
        }

        let cleaned = rebuild(&parts, &rewrite);
        log::debug!("cleaned {text} -> {cleaned}");
        Some(cleaned)
    }
}

/// Clean `text` against `config`. See [`Cleaner::clean`].
pub fn try_clean(text: &str, config: &Config) -> Option<String> {
    Cleaner::new(config).clean(text)
}

// =============================================================================
// Reconstruction
// =============================================================================

/// Reassemble the URL from the verbatim base and the (possibly) rewritten parts.
///
/// A text without a path slash never gains one.
fn rebuild(parts: &RawParts<'_>, rewrite: &Rewrite) -> String {
    let path = if parts.path.starts_with('/') {
        rewrite.path.as_deref().unwrap_or(parts.path)
    } else {
        ""
    };
    let query = rewrite.query.as_deref().unwrap_or(parts.query);
    let fragment = if rewrite.strip_fragment { "" } else { parts.fragment };

    let mut out = String::with_capacity(parts.base.len() + path.len() + query.len() + fragment.len());
    out.push_str(parts.base);
    out.push_str(path);
    out.push_str(query);
    out.push_str(fragment);
    out
}
