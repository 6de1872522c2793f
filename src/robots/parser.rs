//! Robots.txt parser implementation
//!
//! This module threads tokenized directives into a [`RuleSet`]. Every
//! `User-agent` line opens a new group, even when its value repeats an earlier
//! one; groups are never merged.

use crate::fetch::RobotsDocument;
use crate::robots::{
    CleanParamRule, Directive, DirectiveKind, Pattern, RuleGroup, RuleSet, RuleSetOrigin,
};
use std::collections::HashMap;

/// Builds the rule set for an optional fetched document
///
/// Anything other than a `200 OK` `text/plain` response yields the
/// permissive rule set.
pub fn parse_document(document: Option<&RobotsDocument>) -> RuleSet {
    match document {
        Some(document) => parse_rules(document.lines(), document.is_canonical_plain_text()),
        None => RuleSet::permissive(),
    }
}

/// Parses robots.txt lines into a rule set
///
/// # Arguments
///
/// * `lines` - The document lines, in file order
/// * `usable` - Whether the fetch succeeded with a canonical plain-text
///   `200 OK` response; if not, `lines` are ignored
///
/// # Returns
///
/// The compiled rule set. Malformed lines are skipped or defaulted, never
/// reported.
///
/// # Examples
///
/// ```
/// use robots_etiquette::robots::parse_rules;
///
/// let rules = parse_rules("User-agent: *\nDisallow: /mail".lines(), true);
/// assert!(!rules.allowed("/mail?foo=bar", "TestBot"));
/// assert!(rules.allowed("/foo", "TestBot"));
/// ```
pub fn parse_rules<'a, I>(lines: I, usable: bool) -> RuleSet
where
    I: IntoIterator<Item = &'a str>,
{
    if !usable {
        return RuleSet::permissive();
    }

    let mut groups: Vec<RuleGroup> = Vec::new();
    let mut other: HashMap<String, Vec<String>> = HashMap::new();

    for directive in lines.into_iter().filter_map(Directive::parse_line) {
        let Directive { kind, value } = directive;

        match kind {
            DirectiveKind::UserAgent => {
                groups.push(RuleGroup::new(Pattern::compile(&value)));
            }
            DirectiveKind::Allow => {
                let pattern = Pattern::compile(&value);
                current_group(&mut groups).allow.push(pattern);
            }
            DirectiveKind::Disallow => {
                let pattern = Pattern::compile(&value);
                current_group(&mut groups).disallow.push(pattern);
            }
            DirectiveKind::CrawlDelay => {
                current_group(&mut groups).delay_seconds = Some(parse_delay(&value));
            }
            DirectiveKind::CleanParam => match CleanParamRule::parse(&value) {
                Some(rule) => current_group(&mut groups).clean_params.push(rule),
                None => tracing::trace!("Ignoring malformed Clean-param: {:?}", value),
            },
            DirectiveKind::Other(key) => {
                other.entry(key).or_default().push(value);
            }
        }
    }

    RuleSet::new(groups, other, RuleSetOrigin::Document)
}

/// Returns the group rules currently attach to
///
/// Rules that appear before any `User-agent` line go into an implicit group
/// matching every agent.
fn current_group(groups: &mut Vec<RuleGroup>) -> &mut RuleGroup {
    if groups.is_empty() {
        groups.push(RuleGroup::new(Pattern::any()));
    }
    let last = groups.len() - 1;
    &mut groups[last]
}

/// Parses a `Crawl-delay` value from its leading number
///
/// Trailing text is ignored (`10 # be nice` is 10, `2s` is 2). A value with
/// no leading number, or one that is not finite, counts as 0.
fn parse_delay(value: &str) -> f64 {
    match leading_number(value).parse::<f64>() {
        Ok(delay) if delay.is_finite() => delay,
        _ => {
            tracing::trace!("Treating Crawl-delay {:?} as 0", value);
            0.0
        }
    }
}

/// Returns the longest prefix of `value` shaped like a decimal number
fn leading_number(value: &str) -> &str {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    &value[..end]
}
