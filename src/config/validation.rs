use crate::config::types::{
    ApiConfig, CollectionConfig, Config, OutputConfig, RateLimitConfig, TargetConfig,
};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
///
/// All checks run before any network or filesystem activity; a failure here
/// is fatal and the process never starts collecting.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_api_config(&config.api)?;
    validate_target_config(&config.target)?;
    validate_collection_config(&config.collection)?;
    validate_rate_limit_config(&config.rate_limit)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API credentials and endpoint
fn validate_api_config(config: &ApiConfig) -> ConfigResult<()> {
    if config.key.is_empty() {
        return Err(ConfigError::Validation(
            "api.key is not set; provide it in the config file or via SERP_API_KEY".to_string(),
        ));
    }

    Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api.endpoint: {}", e)))?;

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "api.timeout must be >= 1 second, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates the collection target
fn validate_target_config(config: &TargetConfig) -> ConfigResult<()> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "target.name cannot be empty".to_string(),
        ));
    }

    if config.data_id.is_empty() {
        return Err(ConfigError::Validation(
            "target.data-id is not set".to_string(),
        ));
    }

    if let Some(slug) = &config.slug {
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Validation(format!(
                "target.slug must contain only ASCII alphanumerics and underscores, got '{}'",
                slug
            )));
        }
    }

    Ok(())
}

/// Validates collection limits
fn validate_collection_config(config: &CollectionConfig) -> ConfigResult<()> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "collection.max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.reviews_per_page < 1 {
        return Err(ConfigError::Validation(format!(
            "collection.reviews-per-page must be >= 1, got {}",
            config.reviews_per_page
        )));
    }

    if config.pages_per_run < 1 {
        return Err(ConfigError::Validation(format!(
            "collection.pages-per-run must be >= 1, got {}",
            config.pages_per_run
        )));
    }

    Ok(())
}

/// Validates request pacing parameters
fn validate_rate_limit_config(config: &RateLimitConfig) -> ConfigResult<()> {
    if config.request_delay_min < 0.0 {
        return Err(ConfigError::Validation(format!(
            "rate-limit.request-delay-min must be >= 0, got {}",
            config.request_delay_min
        )));
    }

    if config.request_delay_max < config.request_delay_min {
        return Err(ConfigError::Validation(format!(
            "rate-limit.request-delay-max ({}) must be >= request-delay-min ({})",
            config.request_delay_max, config.request_delay_min
        )));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "rate-limit.max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.retry_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "rate-limit.retry-delay must be >= 0, got {}",
            config.retry_delay
        )));
    }

    Ok(())
}

/// Validates output paths
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output.data-dir cannot be empty".to_string(),
        ));
    }

    if config.log_file.is_empty() {
        return Err(ConfigError::Validation(
            "output.log-file cannot be empty".to_string(),
        ));
    }

    Ok(())
}
