//! Configuration module for Review-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use review_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Collection ceiling: {} pages", config.collection.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, CollectionConfig, Config, OutputConfig, RateLimitConfig, TargetConfig};

// Re-export parser functions
pub use parser::{load_config, API_KEY_ENV_VAR};
