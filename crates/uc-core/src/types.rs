//! Core type definitions for urlclean
//!
//! These types mirror the JSON configuration schema one-to-one and are
//! shared read-only by every cleaning call.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Config
// =============================================================================

/// Complete cleaning configuration: global tracking params plus site rules.
///
/// A `Config` is never mutated by the engine. Hosts that reload configuration
/// build a fresh value and swap it in whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Trim surrounding whitespace from the input before parsing.
    #[serde(default = "default_true")]
    pub trim_url: bool,
    /// Named groups of parameters stripped from every URL.
    #[serde(default)]
    pub tracking_params: Vec<TrackingParamGroup>,
    /// Per-site overrides, matched in order.
    #[serde(default)]
    pub site_rules: Vec<SiteRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trim_url: true,
            tracking_params: Vec::new(),
            site_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Flatten every tracking-param group into one case-insensitive set.
    pub fn all_tracking_params(&self) -> ParamSet {
        self.tracking_params
            .iter()
            .flat_map(|group| group.params.iter())
            .collect()
    }
}

/// A commented group of tracking parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingParamGroup {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub params: Vec<String>,
}

// =============================================================================
// Site Rules
// =============================================================================

/// Cleaning behavior for the hosts matching one or more domain suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRule {
    /// Domain suffixes; a bare string in JSON is read as a one-element list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub suffix: Vec<String>,

    /// When false, matching URLs are left alone entirely.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,

    #[serde(default)]
    pub additional_params: Vec<String>,

    #[serde(default)]
    pub excluded_params: Vec<String>,

    /// Strip every query param except those in `excluded_params`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strip_all_params: bool,

    /// Keep the path from the earliest of these segments onward.
    #[serde(default, deserialize_with = "one_or_many")]
    pub keep_path_from: Vec<String>,

    /// Drop path segments starting with any of these prefixes (e.g. `ref=`).
    #[serde(default, deserialize_with = "one_or_many")]
    pub strip_path_segments: Vec<String>,

    /// Cut `{digits}-{slug}` segments down to `{digits}`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strip_slugs: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub strip_fragment: bool,
}

impl Default for SiteRule {
    fn default() -> Self {
        Self {
            suffix: Vec::new(),
            enabled: true,
            additional_params: Vec::new(),
            excluded_params: Vec::new(),
            strip_all_params: false,
            keep_path_from: Vec::new(),
            strip_path_segments: Vec::new(),
            strip_slugs: false,
            strip_fragment: false,
        }
    }
}

impl SiteRule {
    /// Rule for the given suffixes with every other field at its default.
    pub fn for_suffixes<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffix: suffixes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Does any configured suffix end the given host (ASCII/Unicode case-insensitive)?
    ///
    /// This is a plain trailing-substring test: `evilexample.com` matches
    /// a configured `example.com`. A suffix written in Unicode also matches
    /// in its Punycode form, which is how parsed hosts arrive.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.suffix.iter().any(|suffix| {
            host.ends_with(suffix.to_lowercase().as_str())
                || punycode_suffix(suffix).is_some_and(|ascii| host.ends_with(ascii.as_str()))
        })
    }

    /// Does the rule touch the path at all?
    pub fn rewrites_path(&self) -> bool {
        !self.keep_path_from.is_empty() || !self.strip_path_segments.is_empty() || self.strip_slugs
    }
}

/// ASCII (Punycode) form of a non-ASCII suffix, keeping a leading dot.
fn punycode_suffix(suffix: &str) -> Option<String> {
    if suffix.is_ascii() {
        return None;
    }
    let (dot, name) = match suffix.strip_prefix('.') {
        Some(rest) => (".", rest),
        None => ("", suffix),
    };
    match ::url::Host::parse(name) {
        Ok(::url::Host::Domain(ascii)) => Some(format!("{dot}{ascii}")),
        _ => None,
    }
}

// =============================================================================
// Param Sets
// =============================================================================

/// Case-insensitive set of query parameter names.
///
/// Names are folded to lowercase on insertion and on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    names: HashSet<String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ParamSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for ParamSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

// =============================================================================
// Serde helpers
// =============================================================================

/// JSON value that is either a single string or an array of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}
