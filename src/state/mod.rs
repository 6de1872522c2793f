//! State module for per-host etiquette bookkeeping
//!
//! # Components
//!
//! - `ThrottleState`: Tracks the last access to a host for crawl-delay enforcement

mod throttle_state;

// Re-export main types
pub use throttle_state::ThrottleState;
