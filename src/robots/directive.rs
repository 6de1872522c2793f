//! Line tokenizer for robots.txt directives

/// The kind of a robots.txt directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    UserAgent,
    Allow,
    Disallow,
    CrawlDelay,
    CleanParam,
    /// Any unrecognized key, lowercased (e.g. `sitemap`, `host`)
    Other(String),
}

impl DirectiveKind {
    /// Maps a lowercased, trimmed key to its directive kind
    pub fn from_key(key: &str) -> Self {
        match key {
            "user-agent" => Self::UserAgent,
            "allow" => Self::Allow,
            "disallow" => Self::Disallow,
            "crawl-delay" => Self::CrawlDelay,
            "clean-param" => Self::CleanParam,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One parsed `key: value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub value: String,
}

impl Directive {
    /// Tokenizes one line of a robots.txt document
    ///
    /// Blank lines, `#` comments and lines without a `:` yield `None`. The key
    /// is everything before the first colon; the value keeps any later colons.
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_etiquette::robots::{Directive, DirectiveKind};
    ///
    /// let directive = Directive::parse_line("Sitemap: http://example.com/map.xml").unwrap();
    /// assert_eq!(directive.kind, DirectiveKind::Other("sitemap".to_string()));
    /// assert_eq!(directive.value, "http://example.com/map.xml");
    /// ```
    pub fn parse_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            tracing::trace!("Skipping robots.txt line without a key: {:?}", trimmed);
            return None;
        };

        Some(Self {
            kind: DirectiveKind::from_key(&key.trim().to_lowercase()),
            value: value.trim().to_string(),
        })
    }
}
