//! Configuration module for Robots-Etiquette
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use robots_etiquette::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robots.toml")).unwrap();
//! println!("Crawl-delay wait disabled: {}", config.robots.skip_delay);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, RobotsOptions, DEFAULT_TIMEOUT_SECONDS};

// Re-export parser functions
pub use parser::{load_config, parse_config};

// Re-export validation
pub use validation::validate;
