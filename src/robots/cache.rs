//! Robots.txt caching implementation
//!
//! This module keeps one compiled rule set per host for the life of a
//! session. Entries never expire; their age is kept for introspection only.

use crate::robots::RuleSet;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cached robots.txt rules for a host
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The compiled rule set (shared with every caller for the host)
    pub rules: Arc<RuleSet>,

    /// When the rules were built
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new CachedRobots instance with the current timestamp
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            fetched_at: Utc::now(),
        }
    }

    /// Returns how long ago the rules were built
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}

/// Host-to-rules table
///
/// Lookups and inserts are not deduplicated against in-flight fetches: two
/// first requests for the same host may both build a rule set. The first one
/// inserted is kept and handed to both.
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: RwLock<HashMap<String, CachedRobots>>,
}

impl RobotsCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cached rules for a host
    pub async fn get(&self, host: &str) -> Option<Arc<RuleSet>> {
        self.entries
            .read()
            .await
            .get(host)
            .map(|cached| Arc::clone(&cached.rules))
    }

    /// Gets the full cache entry for a host
    pub async fn entry(&self, host: &str) -> Option<CachedRobots> {
        self.entries.read().await.get(host).cloned()
    }

    /// Caches rules for a host, keeping an entry that is already present
    ///
    /// # Returns
    ///
    /// The rules now cached for the host
    pub async fn insert(&self, host: &str, rules: RuleSet) -> Arc<RuleSet> {
        let mut entries = self.entries.write().await;
        let cached = entries
            .entry(host.to_string())
            .or_insert_with(|| CachedRobots::new(Arc::new(rules)));
        Arc::clone(&cached.rules)
    }

    /// Returns the number of cached hosts
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no host has been cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
