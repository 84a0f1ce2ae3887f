//! Review-Harvest: a resumable collector of paginated review data
//!
//! This crate collects review pages for a single configured target through a
//! SerpAPI-compatible search endpoint, persists each page as one immutable
//! JSON file, and resumes interrupted collections by filling the first gap
//! in the stored page sequence.

pub mod collector;
pub mod config;
pub mod model;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Review-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] collector::FetchError),

    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Review-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use collector::{next_missing_page, Collector, FetchError, PageFetcher, SerpApiFetcher};
pub use config::Config;
pub use model::{CollectionTarget, ReviewPage, ReviewRecord};
pub use output::{CollectionStats, StatsReporter};
pub use storage::{JsonPageStore, PageStore, StoreError};
