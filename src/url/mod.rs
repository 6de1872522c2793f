//! URL handling module for Robots-Etiquette
//!
//! This module provides host extraction, robots.txt location, request-target
//! extraction and query-parameter stripping.

mod domain;
mod query;

use url::{Position, Url};

// Re-export main functions
pub use domain::{host_key, robots_txt_url};
pub use query::strip_params;

/// Returns the request target of a URL: its path plus `?query`, if any
///
/// This is the subject robots.txt `Allow`/`Disallow` patterns are matched
/// against, so `Disallow: /mail` also covers `/mail?foo=bar`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use robots_etiquette::url::request_target;
///
/// let url = Url::parse("http://example.com/mail?foo=bar#top").unwrap();
/// assert_eq!(request_target(&url), "/mail?foo=bar");
/// ```
pub fn request_target(url: &Url) -> &str {
    &url[Position::BeforePath..Position::AfterQuery]
}
