//! urlclean Core Library
//!
//! This crate provides the rule-driven URL cleaning engine: it strips
//! tracking query parameters, SEO path slugs, referrer path segments and
//! fragments according to a per-site rule set, and leaves every other byte
//! of the URL exactly as the user wrote it.
//!
//! # Architecture
//!
//! A cleaning call resolves at most one site rule for the URL host, runs the
//! path, query and fragment stages independently against slices of the
//! original text, and rebuilds the URL only if a stage changed something.
//! The engine is a pure function of its inputs: no I/O, no shared mutable
//! state, safe to call from any thread against a shared [`Config`].
//!
//! # Modules
//!
//! - `types`: Configuration model (`Config`, `SiteRule`, `ParamSet`)
//! - `url`: Raw URL text splitting and key decoding
//! - `resolver`: First-match site rule lookup
//! - `path`: Anchor trimming, segment-prefix and slug stripping
//! - `query`: Tracking parameter filtering
//! - `fragment`: Fragment stripping
//! - `cleaner`: Orchestration and output reconstruction
//!
//! # Example
//!
//! ```
//! use uc_core::{try_clean, Config, TrackingParamGroup};
//!
//! let config = Config {
//!     tracking_params: vec![TrackingParamGroup {
//!         comment: "utm".into(),
//!         params: vec!["utm_source".into()],
//!     }],
//!     ..Config::default()
//! };
//!
//! assert_eq!(
//!     try_clean("https://example.com?v=abc&utm_source=x", &config).as_deref(),
//!     Some("https://example.com?v=abc")
//! );
//! assert_eq!(try_clean("not a url", &config), None);
//! ```

pub mod types;
pub mod url;
pub mod resolver;
pub mod path;
pub mod query;
pub mod fragment;
pub mod cleaner;

// Re-export commonly used types
pub use cleaner::{try_clean, Cleaner, Rewrite};
pub use query::QueryPolicy;
pub use resolver::{resolve_rule, Resolution};
pub use types::{Config, ParamSet, SiteRule, TrackingParamGroup};
