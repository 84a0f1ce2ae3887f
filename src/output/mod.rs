//! Run statistics and reporting

mod stats;

pub use stats::{print_summary, CollectionStats, StatsReporter};
