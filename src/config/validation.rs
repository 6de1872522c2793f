use crate::config::types::{Config, RobotsOptions};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent(&config.user_agent)?;
    validate_robots_options(&config.robots)?;
    Ok(())
}

/// Validates the crawler's user agent string
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // The agent goes out as an HTTP header value
    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent must not contain control characters, got {:?}",
            user_agent
        )));
    }

    Ok(())
}

/// Validates etiquette options
fn validate_robots_options(options: &RobotsOptions) -> Result<(), ConfigError> {
    if !options.timeout_seconds.is_finite() || options.timeout_seconds <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout_seconds must be a positive number, got {}",
            options.timeout_seconds
        )));
    }

    Ok(())
}
