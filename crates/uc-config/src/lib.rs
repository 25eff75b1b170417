//! urlclean Configuration
//!
//! Loads, saves and validates the JSON rule set consumed by `uc-core`, ships
//! a built-in default, and publishes hot-reloadable snapshots for
//! long-running hosts.

pub mod loader;
pub mod validate;
pub mod store;

pub use loader::{
    default_config, default_config_json, default_config_path, load, load_or_init, parse_str, save,
    to_string_pretty, write_default, ConfigError, CONFIG_FILE_NAME,
};
pub use store::ConfigStore;
pub use validate::{validate, ConfigWarning};
