//! Compiled robots.txt rules and the queries answered from them

use crate::robots::Pattern;
use crate::state::ThrottleState;
use crate::url::strip_params;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;

/// A `Clean-param` rule: parameters to strip from URLs whose path matches
#[derive(Debug, Clone)]
pub struct CleanParamRule {
    pub param_names: Vec<String>,
    pub path_pattern: Pattern,
}

impl CleanParamRule {
    /// Parses a `Clean-param` value of the form `<p1&p2&...> <path-pattern>`
    ///
    /// Tokens past the second are ignored. Returns `None` when the value has
    /// fewer than two tokens.
    pub fn parse(value: &str) -> Option<Self> {
        let mut tokens = value.split_whitespace();
        let params = tokens.next()?;
        let path = tokens.next()?;

        let param_names = params
            .split('&')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            param_names,
            path_pattern: Pattern::compile(path),
        })
    }
}

/// The rules attached to one `User-agent` line
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub agent: Pattern,
    pub allow: Vec<Pattern>,
    pub disallow: Vec<Pattern>,
    pub delay_seconds: Option<f64>,
    pub clean_params: Vec<CleanParamRule>,
}

impl RuleGroup {
    /// Creates an empty group for the given agent pattern
    pub fn new(agent: Pattern) -> Self {
        Self {
            agent,
            allow: Vec::new(),
            disallow: Vec::new(),
            delay_seconds: None,
            clean_params: Vec::new(),
        }
    }
}

/// Where a rule set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSetOrigin {
    /// Parsed from a served robots.txt document
    Document,
    /// Synthesized because no usable document was available
    Fallback,
}

/// The compiled, queryable form of one site's robots.txt
///
/// Groups are kept in file order and evaluation order depends on it. Note the
/// allow/disallow precedence in [`RuleSet::allowed`]: any matching `Allow`
/// overrides any matching `Disallow`, regardless of pattern length.
#[derive(Debug)]
pub struct RuleSet {
    groups: Vec<RuleGroup>,
    other: HashMap<String, Vec<String>>,
    origin: RuleSetOrigin,
    throttle: ThrottleState,
}

impl RuleSet {
    /// Creates a rule set from parsed parts
    pub fn new(
        groups: Vec<RuleGroup>,
        other: HashMap<String, Vec<String>>,
        origin: RuleSetOrigin,
    ) -> Self {
        Self {
            groups,
            other,
            origin,
            throttle: ThrottleState::new(),
        }
    }

    /// Creates the permissive rule set used when no usable robots.txt exists
    ///
    /// It holds a single group matching every agent with one allow rule
    /// matching every path: no disallows, no delay, no clean-param rules.
    pub fn permissive() -> Self {
        let mut group = RuleGroup::new(Pattern::any());
        group.allow.push(Pattern::any());
        Self::new(vec![group], HashMap::new(), RuleSetOrigin::Fallback)
    }

    /// Returns true if this is the synthesized permissive rule set
    pub fn is_fallback(&self) -> bool {
        self.origin == RuleSetOrigin::Fallback
    }

    /// Returns the rule groups in file order
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Returns the per-host throttle clock
    pub fn throttle(&self) -> &ThrottleState {
        &self.throttle
    }

    fn matching_groups<'a>(&'a self, agent: &'a str) -> impl Iterator<Item = &'a RuleGroup> + 'a {
        self.groups.iter().filter(move |group| group.agent.matches(agent))
    }

    /// Checks if a request target is allowed for the given agent
    ///
    /// Every matching `Disallow` across all groups for the agent is applied
    /// first; if the target ended up disallowed, any matching `Allow` in any
    /// group for the agent permits it again.
    ///
    /// # Arguments
    ///
    /// * `path` - The request target (path plus optional `?query`)
    /// * `agent` - The user agent string
    ///
    /// # Returns
    ///
    /// * `true` - If the target may be fetched
    /// * `false` - If a disallow applies and no allow overrides it
    pub fn allowed(&self, path: &str, agent: &str) -> bool {
        let mut allowed = true;

        for group in self.matching_groups(agent) {
            for rule in &group.disallow {
                if rule.matches(path) {
                    allowed = false;
                }
            }
        }

        if !allowed {
            for group in self.matching_groups(agent) {
                for rule in &group.allow {
                    if rule.matches(path) {
                        allowed = true;
                    }
                }
            }
        }

        allowed
    }

    /// Gets the crawl delay for an agent, in seconds
    ///
    /// The last matching group (in file order) that declares a delay wins.
    /// Returns 0 if no matching group declares one.
    pub fn crawl_delay(&self, agent: &str) -> f64 {
        let mut delay = 0.0;
        for group in self.matching_groups(agent) {
            if let Some(value) = group.delay_seconds {
                delay = value;
            }
        }
        delay
    }

    /// Calculates how long `agent` has to wait before its next access
    ///
    /// Returns `None` if the crawl delay has already elapsed since the last
    /// recorded access, or if nothing has been recorded yet.
    pub fn pending_delay(&self, agent: &str, now: Instant) -> Option<Duration> {
        let delay = self.crawl_delay(agent);
        self.throttle.time_until_next_access(delay, now)
    }

    /// Records an access to the host at `now`
    pub fn record_access(&self, now: Instant) {
        self.throttle.record_access(now);
    }

    /// Applies the matching `Clean-param` rules to a URL
    ///
    /// For every group matching the agent and every clean-param rule in it
    /// whose path pattern matches the URL path, the rule's parameters are
    /// removed from the query. An emptied query is dropped together with
    /// its `?`.
    pub fn clean_url(&self, url: &Url, agent: &str) -> Url {
        let mut cleaned = url.clone();
        let Some(mut query) = url.query().map(str::to_string) else {
            return cleaned;
        };
        if self.is_fallback() {
            return cleaned;
        }

        let path = url.path();
        for group in self.matching_groups(agent) {
            for rule in &group.clean_params {
                if rule.path_pattern.matches(path) {
                    query = strip_params(&query, &rule.param_names);
                }
            }
        }

        if query.is_empty() {
            cleaned.set_query(None);
        } else {
            cleaned.set_query(Some(&query));
        }
        cleaned
    }

    /// Returns the unrecognized directives, keyed by lowercased name
    pub fn other_values(&self) -> &HashMap<String, Vec<String>> {
        &self.other
    }
}
