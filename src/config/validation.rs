use crate::config::types::{Config, CrawlerConfig, SearchConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_search_config(&config.search)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent < 1 || config.max_concurrent > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent must be between 1 and 100, got {}",
            config.max_concurrent
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_content_chars < 1 {
        return Err(ConfigError::Validation(
            "max-content-chars must be >= 1".to_string(),
        ));
    }

    if config.discovery_batch_size < 1 {
        return Err(ConfigError::Validation(
            "discovery-batch-size must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    // reqwest rejects header values with control characters at build time
    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent value contains control characters: {:?}",
            config.value
        )));
    }

    Ok(())
}

/// Validates search orchestration configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.max_limit < 1 {
        return Err(ConfigError::Validation(
            "max-limit must be >= 1".to_string(),
        ));
    }

    if config.default_limit < 1 || config.default_limit > config.max_limit {
        return Err(ConfigError::Validation(format!(
            "default-limit must be between 1 and max-limit ({}), got {}",
            config.max_limit, config.default_limit
        )));
    }

    if config.crawl_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "crawl-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}
