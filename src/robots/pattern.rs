//! Wildcard pattern compilation
//!
//! Path and agent values in robots.txt are compiled into prefix matchers where
//! `*` stands for any (possibly empty) sequence and every other character is
//! literal.

use regex::Regex;

/// A compiled robots.txt wildcard pattern
///
/// Matching is anchored at the start of the subject only, so `/foo` matches
/// `/foo`, `/foobar` and `/foo/baz` alike.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Compiled from an empty value; matches nothing
    Never,
    /// Anchored prefix expression
    Prefix { source: String, regex: Regex },
}

impl Pattern {
    /// Compiles a wildcard pattern
    ///
    /// # Arguments
    ///
    /// * `text` - The raw pattern text, e.g. `/private/*.html`
    ///
    /// # Returns
    ///
    /// A pattern that never matches if `text` is blank, otherwise an anchored
    /// prefix matcher
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_etiquette::robots::Pattern;
    ///
    /// let pattern = Pattern::compile("/a*/c");
    /// assert!(pattern.matches("/a/b/c"));
    /// assert!(pattern.matches("/a/c/d"));
    /// assert!(!pattern.matches("/b/a/c"));
    /// ```
    pub fn compile(text: &str) -> Self {
        if text.trim().is_empty() {
            return Pattern::Never;
        }

        let body = text
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        match Regex::new(&format!("^{}", body)) {
            Ok(regex) => Pattern::Prefix {
                source: text.to_string(),
                regex,
            },
            Err(e) => {
                // Only reachable for oversized patterns
                tracing::warn!("Ignoring robots.txt pattern {:?}: {}", text, e);
                Pattern::Never
            }
        }
    }

    /// Pattern matching every subject, the compiled form of `*`
    pub fn any() -> Self {
        Self::compile("*")
    }

    /// Checks whether the subject starts with something this pattern describes
    pub fn matches(&self, subject: &str) -> bool {
        match self {
            Pattern::Never => false,
            Pattern::Prefix { regex, .. } => regex.is_match(subject),
        }
    }

    /// Returns the pattern text this was compiled from, if any
    pub fn source(&self) -> Option<&str> {
        match self {
            Pattern::Never => None,
            Pattern::Prefix { source, .. } => Some(source),
        }
    }
}
