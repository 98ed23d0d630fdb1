use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

const MAX_CONCURRENCY: usize = 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let target = match config.target_url.as_deref() {
        Some(target) if !target.trim().is_empty() => target,
        _ => return Err(ConfigError::MissingTarget),
    };

    let url = Url::parse(target)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", target, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Target URL '{}' must use http or https",
            target
        )));
    }

    if let Some(base) = config.base_url.as_deref() {
        if base.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }
    }

    if config.max_links < 1 {
        return Err(ConfigError::Validation(format!(
            "max_links must be >= 1, got {}",
            config.max_links
        )));
    }

    if config.max_concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 0 and {}, got {}",
            MAX_CONCURRENCY, config.max_concurrency
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.sitemap_path.is_empty() {
        return Err(ConfigError::Validation(
            "sitemap_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
