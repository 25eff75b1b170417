//! Config file loading and saving

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uc_core::Config;

/// Built-in configuration, compiled into the binary.
const DEFAULT_CONFIG_JSON: &str = include_str!("default.json");

/// File name looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parse a config from JSON text.
pub fn parse_str(json: &str) -> Result<Config, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a config as indented JSON. List fields are always arrays.
pub fn to_string_pretty(config: &Config) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// The built-in configuration.
pub fn default_config() -> Config {
    // Covered by `default_config_parses`; a broken file is a build defect.
    parse_str(DEFAULT_CONFIG_JSON).unwrap_or_default()
}

/// The built-in configuration as shipped JSON text.
pub fn default_config_json() -> &'static str {
    DEFAULT_CONFIG_JSON
}

/// `config.json` next to the running executable, or in the working
/// directory if the executable path is unavailable.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Load a config file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let json = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    parse_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a config file, writing the built-in default first if it is missing.
pub fn load_or_init(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        return load(path);
    }

    write_default(path)?;
    log::info!("created default config at {}", path.display());
    Ok(default_config())
}

/// Write the built-in default config to `path`, creating parent directories.
pub fn write_default(path: &Path) -> Result<(), ConfigError> {
    write_text(path, DEFAULT_CONFIG_JSON)
}

/// Save a config to `path`, creating parent directories.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let json = to_string_pretty(config)?;
    write_text(path, &json)
}

fn write_text(path: &Path, text: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| ConfigError::io(path, e))
}
