use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tracks when a host was last accessed under its rule set
///
/// This is the per-host throttle clock. It is shared by every caller that
/// holds the host's rule set; concurrent updates are last-writer-wins, so
/// throttling under concurrency is best-effort.
#[derive(Debug, Default)]
pub struct ThrottleState {
    /// Timestamp of the last permitted access (None until the first one)
    last_accessed: Mutex<Option<Instant>>,
}

impl ThrottleState {
    /// Creates a ThrottleState that has never been accessed
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the timestamp of the last recorded access
    pub fn last_accessed(&self) -> Option<Instant> {
        *self
            .last_accessed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records an access at `now`
    pub fn record_access(&self, now: Instant) {
        *self
            .last_accessed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(now);
    }

    /// Calculates how long to wait before the next access
    ///
    /// # Arguments
    ///
    /// * `delay_seconds` - The crawl delay in effect
    /// * `now` - The current time instant
    ///
    /// # Returns
    ///
    /// `Some(wait)` while less than `delay_seconds` has passed since the last
    /// access, `None` if an access can happen now
    pub fn time_until_next_access(&self, delay_seconds: f64, now: Instant) -> Option<Duration> {
        let elapsed = match self.last_accessed() {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => return None,
        };

        let remaining = delay_seconds - elapsed;
        if remaining > 0.0 {
            Duration::try_from_secs_f64(remaining).ok()
        } else {
            None
        }
    }
}
