use crate::config::types::Config;
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Environment variable that overrides `api.key` from the config file
pub const API_KEY_ENV_VAR: &str = "SERP_API_KEY";

/// Loads and parses a configuration file from the given path
///
/// The `SERP_API_KEY` environment variable, when set and non-empty, takes
/// precedence over the `api.key` value in the file. This keeps the key out
/// of checked-in configuration.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use review_harvest::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Target: {}", config.target.name);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let mut config: Config = toml::from_str(&content)?;

    // Apply environment overrides before validation
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        if !key.is_empty() {
            config.api.key = key;
        }
    }

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}
