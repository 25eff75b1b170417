//! Query parameter filtering
//!
//! Keys are percent-decoded only to decide membership. Pairs that survive
//! are emitted as their original text, so value encoding is never touched.

use std::borrow::Cow;

use crate::types::{ParamSet, SiteRule};
use crate::url::{decode_key, pair_key};

/// Which parameters a query filter removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPolicy<'a> {
    /// Blocklist: drop pairs whose key is in the set.
    Strip(Cow<'a, ParamSet>),
    /// Allowlist: drop every pair whose key is not in the set.
    KeepOnly(ParamSet),
}

impl<'a> QueryPolicy<'a> {
    /// Build the policy for a URL from the flattened global params and its site rule.
    ///
    /// `stripAllParams` rules keep only their `excludedParams`. Otherwise the
    /// strip set is global ∪ additional − excluded.
    pub fn for_rule(tracking: &'a ParamSet, rule: Option<&SiteRule>) -> Self {
        match rule {
            Some(rule) if rule.strip_all_params => {
                QueryPolicy::KeepOnly(rule.excluded_params.iter().collect())
            }
            Some(rule) => {
                if rule.additional_params.is_empty() && rule.excluded_params.is_empty() {
                    return QueryPolicy::Strip(Cow::Borrowed(tracking));
                }
                let mut strip = tracking.clone();
                strip.extend(&rule.additional_params);
                for name in &rule.excluded_params {
                    strip.remove(name);
                }
                QueryPolicy::Strip(Cow::Owned(strip))
            }
            None => QueryPolicy::Strip(Cow::Borrowed(tracking)),
        }
    }

    /// Should the pair with this decoded key be removed?
    #[inline]
    pub fn removes(&self, key: &str) -> bool {
        match self {
            QueryPolicy::Strip(names) => names.contains(key),
            QueryPolicy::KeepOnly(names) => !names.contains(key),
        }
    }

    /// Does this policy leave every query untouched?
    pub fn is_noop(&self) -> bool {
        matches!(self, QueryPolicy::Strip(names) if names.is_empty())
    }
}

/// Filter a raw query string (with its leading `?`, or empty).
///
/// Returns `None` when nothing was removed, so the caller reuses the original
/// text verbatim. Otherwise returns the new query: `""` when no pairs remain,
/// else `?` followed by the kept pairs in input order.
pub fn transform_query(query: &str, policy: &QueryPolicy<'_>) -> Option<String> {
    let body = match query.strip_prefix('?') {
        Some(body) if !body.is_empty() => body,
        _ => return None,
    };

    let mut kept = Vec::new();
    let mut removed = false;

    for pair in body.split('&') {
        let key = decode_key(pair_key(pair));
        if policy.removes(&key) {
            removed = true;
        } else {
            kept.push(pair);
        }
    }

    if !removed {
        return None;
    }

    if kept.is_empty() {
        Some(String::new())
    } else {
        Some(format!("?{}", kept.join("&")))
    }
}
