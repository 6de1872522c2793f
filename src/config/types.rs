use serde::Deserialize;
use std::time::Duration;

/// Default bound on the robots.txt fetch, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 3.0;

/// Main configuration structure for Robots-Etiquette
///
/// One configuration describes one crawler identity: the agent string it
/// announces and matches rules against, plus the etiquette options.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// User agent string sent with the robots.txt request and matched
    /// against `User-agent` groups
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    #[serde(default)]
    pub robots: RobotsOptions,
}

/// Etiquette options applied by a session
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RobotsOptions {
    /// Disables the crawl-delay wait in `allowed`
    #[serde(rename = "skip-delay", default)]
    pub skip_delay: bool,

    /// Upper bound on the robots.txt fetch (seconds)
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: f64,
}

fn default_timeout_seconds() -> f64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for RobotsOptions {
    fn default() -> Self {
        Self {
            skip_delay: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl RobotsOptions {
    /// Options with the crawl-delay wait disabled
    pub fn non_blocking() -> Self {
        Self {
            skip_delay: true,
            ..Self::default()
        }
    }

    /// Returns the fetch timeout as a Duration
    ///
    /// Values that cannot be represented fall back to the default timeout.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS))
    }
}
