/// Removes the named parameters from a raw query string
///
/// A parameter is removed when it is exactly a listed name (a bare key) or
/// starts with `name=`. Every occurrence goes; the remaining parameters keep
/// their relative order. Empty segments are dropped from the rewritten query.
///
/// # Arguments
///
/// * `query` - The raw query string, without the leading `?`
/// * `names` - Parameter names to strip
///
/// # Returns
///
/// The rewritten query string, possibly empty
///
/// # Examples
///
/// ```
/// use robots_etiquette::url::strip_params;
///
/// let names = vec!["term1".to_string()];
/// assert_eq!(strip_params("tt=qq&term1=test&term1=test2", &names), "tt=qq");
/// assert_eq!(strip_params("term1", &names), "");
/// ```
pub fn strip_params(query: &str, names: &[String]) -> String {
    query
        .split('&')
        .filter(|param| !param.is_empty())
        .filter(|param| !names.iter().any(|name| is_param(param, name)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Checks whether a `key` or `key=value` segment belongs to `name`
fn is_param(param: &str, name: &str) -> bool {
    match param.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('='),
        None => false,
    }
}
