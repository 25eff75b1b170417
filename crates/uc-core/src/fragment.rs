//! Fragment stripping

use crate::types::SiteRule;

/// Returns `true` when the fragment (including its `#`) should be dropped.
#[inline]
pub fn strips_fragment(fragment: &str, rule: Option<&SiteRule>) -> bool {
    !fragment.is_empty() && rule.is_some_and(|rule| rule.strip_fragment)
}
