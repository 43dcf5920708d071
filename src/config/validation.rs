use crate::config::types::{Config, FetchConfig, InputConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    Url::parse(&config.api_endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-endpoint: {}", e)))?;

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api-key-env cannot be empty".to_string(),
        ));
    }

    if config.max_attempts < 1 || config.max_attempts > 50 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 50, got {}",
            config.max_attempts
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "input directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.reviews_dir.is_empty() {
        return Err(ConfigError::Validation(
            "reviews-dir cannot be empty".to_string(),
        ));
    }

    if config.listings_path.is_empty() {
        return Err(ConfigError::Validation(
            "listings-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::SkipConfig;

    fn valid_config() -> Config {
        Config {
            fetch: FetchConfig {
                api_endpoint: "https://api.webscrapingapi.com/v2".to_string(),
                api_key_env: "WEBSCRAPING_API_KEY".to_string(),
                max_attempts: 10,
                retry_delay_ms: 500,
                request_timeout_secs: 60,
            },
            input: InputConfig::default(),
            output: OutputConfig::default(),
            skip: SkipConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = valid_config();
        config.fetch.api_endpoint = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_key_env_rejected() {
        let mut config = valid_config();
        config.fetch.api_key_env = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = valid_config();
        config.fetch.max_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_oversized_attempts_rejected() {
        let mut config = valid_config();
        config.fetch.max_attempts = 51;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_reviews_dir_rejected() {
        let mut config = valid_config();
        config.output.reviews_dir = String::new();
        assert!(validate(&config).is_err());
    }
}
