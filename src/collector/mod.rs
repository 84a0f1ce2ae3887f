//! Collection module: the fetch→store pipeline
//!
//! This module contains the core collection logic, including:
//! - HTTP page fetching with retry and jittered pacing
//! - Gap-filling resumption across runs
//! - The bounded orchestration loop driving one collection run

mod fetcher;
mod orchestrator;
mod progress;

pub use fetcher::{FetchError, PageFetcher, SerpApiFetcher};
pub use orchestrator::Collector;
pub use progress::next_missing_page;
