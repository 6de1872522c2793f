//! Robots-Etiquette: per-host crawl etiquette for polite fetchers
//!
//! This crate decides whether a crawling agent may fetch a URL under the site's
//! robots.txt, how long it must wait between requests to that site, and how a
//! URL's query string should be cleaned according to `Clean-param` rules.

pub mod config;
pub mod fetch;
pub mod robots;
pub mod session;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Robots-Etiquette operations
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Cannot derive robots.txt location for {url}: {source}")]
    RobotsLocation {
        url: String,
        source: ::url::ParseError,
    },
}

/// Result type alias for Robots-Etiquette operations
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, RobotsOptions};
pub use fetch::{HttpFetcher, RobotsDocument, RobotsFetcher};
pub use robots::{Pattern, RuleSet};
pub use session::RobotsSession;
