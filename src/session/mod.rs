//! Crawler-identity sessions
//!
//! A [`RobotsSession`] is bound to one user agent and one set of options. It
//! fetches and compiles each host's robots.txt on first use, keeps the rule
//! set for its whole life, and answers etiquette questions from it.

use crate::config::{validate, Config, RobotsOptions};
use crate::fetch::{HttpFetcher, RobotsFetcher};
use crate::robots::{parse_document, RobotsCache, RuleSet};
use crate::url::{host_key, request_target, robots_txt_url};
use crate::RobotsError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Per-crawler robots.txt etiquette
///
/// Sessions are `Send + Sync` and meant to be shared (e.g. behind an `Arc`)
/// by every worker of one crawler identity.
#[derive(Debug)]
pub struct RobotsSession<F = HttpFetcher> {
    user_agent: String,
    options: RobotsOptions,
    fetcher: F,
    cache: RobotsCache,
}

impl RobotsSession<HttpFetcher> {
    /// Creates a session that fetches robots.txt over HTTP
    ///
    /// # Example
    ///
    /// ```no_run
    /// use robots_etiquette::{RobotsOptions, RobotsSession};
    /// use url::Url;
    ///
    /// # async fn example() -> robots_etiquette::Result<()> {
    /// let session = RobotsSession::new("ExampleBot/1.0", RobotsOptions::default())?;
    /// let url = Url::parse("https://example.com/page")?;
    /// if session.allowed(&url).await {
    ///     // fetch the page
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(user_agent: &str, options: RobotsOptions) -> Result<Self, RobotsError> {
        let fetcher = HttpFetcher::new(user_agent, options.timeout())?;
        Ok(Self::with_fetcher(user_agent, options, fetcher))
    }

    /// Creates a session from a configuration, validating it first
    pub fn from_config(config: &Config) -> Result<Self, RobotsError> {
        validate(config)?;
        Self::new(&config.user_agent, config.robots.clone())
    }
}

impl<F: RobotsFetcher> RobotsSession<F> {
    /// Creates a session with a custom robots.txt fetcher
    pub fn with_fetcher(user_agent: &str, options: RobotsOptions, fetcher: F) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            options,
            fetcher,
            cache: RobotsCache::new(),
        }
    }

    /// Returns the user agent this session matches rules against
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the session's options
    pub fn options(&self) -> &RobotsOptions {
        &self.options
    }

    /// Returns the host-to-rules table
    pub fn cache(&self) -> &RobotsCache {
        &self.cache
    }

    /// Gets the rule set for a URL's host, fetching and compiling it on first use
    ///
    /// Fetch failures produce the permissive rule set, which is cached like
    /// any other: a host is not retried for the life of the session. URLs
    /// without a host get an uncached permissive rule set.
    pub async fn rules_for(&self, url: &Url) -> Arc<RuleSet> {
        let Some(host) = host_key(url) else {
            return Arc::new(RuleSet::permissive());
        };

        if let Some(rules) = self.cache.get(&host).await {
            return rules;
        }

        let document = match robots_txt_url(url) {
            Ok(robots_url) => {
                tracing::debug!("Fetching robots.txt for host: {}", host);
                self.fetcher.fetch(&robots_url).await
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };

        let rules = parse_document(document.as_ref());
        if rules.is_fallback() {
            tracing::debug!("Using permissive robots rules for host: {}", host);
        } else {
            tracing::debug!(
                "Compiled {} robots.txt groups for host: {}",
                rules.groups().len(),
                host
            );
        }

        self.cache.insert(&host, rules).await
    }

    /// Checks if a URL may be fetched, waiting out the host's crawl delay
    ///
    /// The path and query are matched against the host's rules. When the
    /// URL is allowed and `skip_delay` is off, this **waits** until the
    /// host's crawl delay has passed since the last allowed access, then
    /// records the access. The calling task is suspended for up to the full
    /// crawl delay; use [`RobotsOptions::non_blocking`] to never wait.
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed (never waits)
    pub async fn allowed(&self, url: &Url) -> bool {
        let rules = self.rules_for(url).await;
        let allowed = rules.allowed(request_target(url), &self.user_agent);

        if allowed && !self.options.skip_delay {
            if let Some(wait) = rules.pending_delay(&self.user_agent, Instant::now()) {
                tracing::debug!("Waiting {:?} for crawl delay before {}", wait, url);
                tokio::time::sleep(wait).await;
            }
            rules.record_access(Instant::now());
        }

        allowed
    }

    /// Gets the crawl delay in seconds for the URL's host (0 if none)
    pub async fn crawl_delay(&self, url: &Url) -> f64 {
        self.rules_for(url).await.crawl_delay(&self.user_agent)
    }

    /// Strips the host's `Clean-param` parameters from a URL's query
    pub async fn clean_url(&self, url: &Url) -> Url {
        self.rules_for(url).await.clean_url(url, &self.user_agent)
    }

    /// Gets the host's unrecognized directives (e.g. `sitemap`), keyed by
    /// lowercased name
    pub async fn other_values(&self, url: &Url) -> HashMap<String, Vec<String>> {
        self.rules_for(url).await.other_values().clone()
    }
}
