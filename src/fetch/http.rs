//! HTTP fetcher implementation
//!
//! This module retrieves robots.txt over HTTP(S):
//! - Building an HTTP client with the crawler's user agent string
//! - Bounding each retrieval by the configured timeout
//! - Turning timeouts and transport errors into "no document"

use crate::fetch::{RobotsDocument, RobotsFetcher};
use crate::RobotsError;
use hyper::ext::ReasonPhrase;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client for robots.txt retrieval
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header to send
/// * `timeout` - Upper bound on each request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches robots.txt with reqwest, bounded by a timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher announcing `user_agent`
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, RobotsError> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
            timeout,
        })
    }

    /// Creates a fetcher from an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Returns the timeout applied to each retrieval
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retrieves the document, reporting failures as errors
    ///
    /// Non-success statuses are not errors here: the response is returned
    /// as-is and judged by the parser. The reason phrase is the one the
    /// server sent.
    pub async fn fetch_document(&self, robots_url: &Url) -> Result<RobotsDocument, RobotsError> {
        let http_error = |source: reqwest::Error| {
            if source.is_timeout() {
                RobotsError::Timeout {
                    url: robots_url.to_string(),
                }
            } else {
                RobotsError::Http {
                    url: robots_url.to_string(),
                    source,
                }
            }
        };

        let response = self
            .client
            .get(robots_url.clone())
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        let reason_phrase = match response.extensions().get::<ReasonPhrase>() {
            Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
            None => status.canonical_reason().unwrap_or("").to_string(),
        };
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(http_error)?;

        Ok(RobotsDocument {
            status_code: status.as_u16(),
            reason_phrase,
            content_type,
            body,
        })
    }
}

impl RobotsFetcher for HttpFetcher {
    async fn fetch(&self, robots_url: &Url) -> Option<RobotsDocument> {
        let result = tokio::time::timeout(self.timeout, self.fetch_document(robots_url))
            .await
            .unwrap_or_else(|_| {
                Err(RobotsError::Timeout {
                    url: robots_url.to_string(),
                })
            });

        match result {
            Ok(document) => {
                tracing::debug!(
                    "Fetched {} ({} {})",
                    robots_url,
                    document.status_code,
                    document.content_type
                );
                Some(document)
            }
            Err(RobotsError::Timeout { url }) => {
                tracing::warn!("robots.txt request timed out: {}", url);
                None
            }
            Err(e) => {
                tracing::warn!("robots.txt request failed: {}", e);
                None
            }
        }
    }
}
