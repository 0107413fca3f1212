use crate::config::types::{Config, CrawlerConfig, OutputConfig, RobotsConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_robots_config(&config.robots)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth_limit < 1 || config.max_depth_limit > 10 {
        return Err(ConfigError::Validation(format!(
            "max_depth_limit must be between 1 and 10, got {}",
            config.max_depth_limit
        )));
    }

    if config.max_depth > config.max_depth_limit {
        return Err(ConfigError::Validation(format!(
            "max_depth ({}) cannot exceed max_depth_limit ({})",
            config.max_depth, config.max_depth_limit
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
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

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates robots.txt rules
fn validate_robots_config(config: &RobotsConfig) -> Result<(), ConfigError> {
    for rule in &config.rules {
        validate_rule_path(&rule.path)?;
    }
    Ok(())
}

/// Validates a single rule path
///
/// An empty path is legal (`Disallow:` with no value allows everything);
/// anything else must be rooted and fit on one line.
pub fn validate_rule_path(path: &str) -> Result<(), ConfigError> {
    if path.contains('\n') || path.contains('\r') {
        return Err(ConfigError::InvalidRule(format!(
            "rule path cannot span lines: {:?}",
            path
        )));
    }

    if !path.is_empty() && !path.starts_with('/') && !path.starts_with('*') {
        return Err(ConfigError::InvalidRule(format!(
            "rule path must start with '/' or '*', got '{}'",
            path
        )));
    }

    Ok(())
}
