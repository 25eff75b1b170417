//! Site rule resolution

use crate::types::SiteRule;

/// Outcome of looking up the site rule for a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// No rule matched; only the global tracking params apply.
    NoRule,
    /// The first matching rule.
    Rule(&'a SiteRule),
    /// The first matching rule is disabled: leave the URL alone.
    Disabled,
}

impl<'a> Resolution<'a> {
    /// The applicable rule, if any.
    pub fn rule(self) -> Option<&'a SiteRule> {
        match self {
            Resolution::Rule(rule) => Some(rule),
            Resolution::NoRule | Resolution::Disabled => None,
        }
    }
}

/// Find the first rule (in configuration order) with a suffix ending `host`.
///
/// First match wins even when a later rule has a longer suffix.
pub fn resolve_rule<'a>(host: &str, rules: &'a [SiteRule]) -> Resolution<'a> {
    match rules.iter().position(|rule| rule.matches_host(host)) {
        Some(index) => {
            let rule = &rules[index];
            log::trace!("host {host} matched site rule #{index} {:?}", rule.suffix);
            if rule.enabled {
                Resolution::Rule(rule)
            } else {
                Resolution::Disabled
            }
        }
        None => Resolution::NoRule,
    }
}
