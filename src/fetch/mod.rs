//! Robots.txt retrieval
//!
//! This module defines what a fetched robots.txt looks like and the
//! collaborator that retrieves it:
//! - `RobotsDocument`: status, content type and body of a response
//! - `RobotsFetcher`: anything that can produce a document for a URL
//! - `HttpFetcher`: the reqwest-backed implementation with a timeout

mod http;

pub use http::{build_http_client, HttpFetcher};

use std::future::Future;
use url::Url;

/// A robots.txt response as received from a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsDocument {
    /// HTTP status code
    pub status_code: u16,
    /// Reason phrase from the status line
    pub reason_phrase: String,
    /// Content-Type header value
    pub content_type: String,
    /// Response body
    pub body: String,
}

impl RobotsDocument {
    /// Creates a `200 OK` `text/plain` document with the given body
    pub fn plain_text(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            reason_phrase: "OK".to_string(),
            content_type: "text/plain".to_string(),
            body: body.into(),
        }
    }

    /// Checks whether the response is a canonical `200 OK` plain-text document
    ///
    /// The reason phrase is compared case-insensitively. Only the media type
    /// of the Content-Type is considered, so `text/plain; charset=utf-8`
    /// qualifies but `text/html` does not.
    pub fn is_canonical_plain_text(&self) -> bool {
        let media_type = self
            .content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        self.status_code == 200
            && self.reason_phrase.trim().eq_ignore_ascii_case("OK")
            && media_type == "text/plain"
    }

    /// Returns the body lines, in order
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.body.lines()
    }
}

/// Retrieves robots.txt documents
///
/// Implementations must not fail on ordinary network errors: a timeout or
/// transport failure is reported as `None`.
pub trait RobotsFetcher: Send + Sync {
    /// Fetches the document at `robots_url`
    fn fetch(&self, robots_url: &Url) -> impl Future<Output = Option<RobotsDocument>> + Send;
}
