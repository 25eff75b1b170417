//! Lint pass over a loaded config.
//!
//! Everything reported here is legal and loads fine; the warnings point at
//! entries that silently do nothing or shadow other entries.

use std::fmt;

use uc_core::{Config, ParamSet, SiteRule};

/// A suspicious but accepted config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A tracking group contains an empty parameter name.
    EmptyTrackingParam { group: usize },
    /// A site rule has no suffixes and can never match.
    NoSuffixes { rule: usize },
    /// A site rule has an empty suffix, which matches every host.
    EmptySuffix { rule: usize },
    /// An empty `keepPathFrom` anchor never matches a segment.
    EmptyAnchor { rule: usize },
    /// An empty `stripPathSegments` prefix strips every path segment.
    EmptySegmentPrefix { rule: usize },
    /// Every suffix of the rule is already caught by an earlier rule.
    ShadowedRule { rule: usize, by: usize },
    /// An excluded param that would not be stripped anyway.
    UnusedExclusion { rule: usize, param: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTrackingParam { group } => {
                write!(f, "tracking group #{group} contains an empty param name")
            }
            Self::NoSuffixes { rule } => write!(f, "site rule #{rule} has no suffix and never matches"),
            Self::EmptySuffix { rule } => write!(f, "site rule #{rule} has an empty suffix that matches every host"),
            Self::EmptyAnchor { rule } => write!(f, "site rule #{rule} has an empty keepPathFrom anchor"),
            Self::EmptySegmentPrefix { rule } => {
                write!(f, "site rule #{rule} has an empty stripPathSegments prefix that removes every segment")
            }
            Self::ShadowedRule { rule, by } => {
                write!(f, "site rule #{rule} is unreachable: rule #{by} matches all of its suffixes first")
            }
            Self::UnusedExclusion { rule, param } => {
                write!(f, "site rule #{rule} excludes '{param}', which is not stripped anyway")
            }
        }
    }
}

/// Collect warnings for `config`. Rule and group numbers are zero-based.
pub fn validate(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for (group, tracking) in config.tracking_params.iter().enumerate() {
        if tracking.params.iter().any(|p| p.is_empty()) {
            warnings.push(ConfigWarning::EmptyTrackingParam { group });
        }
    }

    let tracking = config.all_tracking_params();

    for (index, rule) in config.site_rules.iter().enumerate() {
        if rule.suffix.is_empty() {
            warnings.push(ConfigWarning::NoSuffixes { rule: index });
        } else if rule.suffix.iter().any(|s| s.is_empty()) {
            warnings.push(ConfigWarning::EmptySuffix { rule: index });
        }

        if rule.keep_path_from.iter().any(|a| a.is_empty()) {
            warnings.push(ConfigWarning::EmptyAnchor { rule: index });
        }
        if rule.strip_path_segments.iter().any(|p| p.is_empty()) {
            warnings.push(ConfigWarning::EmptySegmentPrefix { rule: index });
        }

        if let Some(by) = shadowing_rule(&config.site_rules[..index], rule) {
            warnings.push(ConfigWarning::ShadowedRule { rule: index, by });
        }

        if !rule.strip_all_params {
            let additional: ParamSet = rule.additional_params.iter().collect();
            for param in &rule.excluded_params {
                let stripped = tracking.contains(param) || additional.contains(param);
                if !stripped {
                    warnings.push(ConfigWarning::UnusedExclusion {
                        rule: index,
                        param: param.clone(),
                    });
                }
            }
        }
    }

    warnings
}

/// The first earlier rule that catches every host this rule could match.
fn shadowing_rule(earlier: &[SiteRule], rule: &SiteRule) -> Option<usize> {
    if rule.suffix.is_empty() {
        return None;
    }
    earlier.iter().position(|prior| {
        rule.suffix.iter().all(|suffix| prior.matches_host(suffix))
    })
}
