use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
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
/// use bedesten::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Retry budget: {}", config.fetch.max_attempts);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Resolves the render-API credential from the environment
///
/// The config names the variable (conventionally populated from a local
/// untracked settings file before launch); only a non-empty value counts.
///
/// # Returns
///
/// * `Ok(String)` - The credential value
/// * `Err(ConfigError::MissingCredential)` - Variable unset or empty
pub fn resolve_api_key(config: &Config) -> Result<String, ConfigError> {
    std::env::var(&config.fetch.api_key_env)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ConfigError::MissingCredential(config.fetch.api_key_env.clone()))
}
