//! Robots.txt handling module
//!
//! This module compiles robots.txt documents into rule sets and answers the
//! etiquette questions a fetcher asks before each request:
//!
//! - `Pattern`: wildcard path/agent patterns, anchored at the start only
//! - `Directive`: one tokenized `key: value` line
//! - `parse_rules` / `parse_document`: directives threaded into a `RuleSet`
//! - `RuleSet`: allow/disallow decisions, crawl delay, clean-param rewriting
//! - `RobotsCache`: one rule set per host

mod cache;
mod directive;
mod parser;
mod pattern;
mod rule_set;

pub use cache::{CachedRobots, RobotsCache};
pub use directive::{Directive, DirectiveKind};
pub use parser::{parse_document, parse_rules};
pub use pattern::Pattern;
pub use rule_set::{CleanParamRule, RuleGroup, RuleSet, RuleSetOrigin};
