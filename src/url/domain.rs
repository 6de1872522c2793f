use crate::UrlError;
use url::Url;

/// Extracts the host key used to look up a URL's rule set
///
/// The host is converted to lowercase; the port is not part of the key.
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use robots_etiquette::url::host_key;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(host_key(&url), Some("example.com".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Derives the robots.txt location for a URL: `<scheme>://<host>[:port]/robots.txt`
pub fn robots_txt_url(url: &Url) -> Result<Url, UrlError> {
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    url.join("/robots.txt")
        .map_err(|source| UrlError::RobotsLocation {
            url: url.to_string(),
            source,
        })
}
