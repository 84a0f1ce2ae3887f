//! Run-scoped collection statistics
//!
//! [`CollectionStats`] is process-local telemetry: created at the start of
//! an orchestrator run, mutated only by the orchestrator, reported and
//! discarded at the end. It is never persisted.

use std::path::PathBuf;

/// Counters accumulated over one collection run
#[derive(Debug, Clone, Default)]
pub struct CollectionStats {
    /// Pages visited this run, whether fetched, skipped, or failed
    pub total_pages_requested: u32,

    /// Pages counted as collected (freshly saved or already on disk)
    pub successful_pages: u32,

    /// Pages that failed to fetch or save
    pub failed_pages: u32,

    /// Review records across all successful pages
    pub total_reviews_collected: u64,

    /// Files written this run
    pub saved_files: Vec<PathBuf>,
}

impl CollectionStats {
    /// Records a visited page
    pub fn add_requested_page(&mut self) {
        self.total_pages_requested += 1;
    }

    /// Records a successful page and its review count
    ///
    /// `saved_file` is present only for pages written this run; skipped
    /// pre-existing pages pass `None`.
    pub fn add_successful_page(&mut self, review_count: usize, saved_file: Option<PathBuf>) {
        self.successful_pages += 1;
        self.total_reviews_collected += review_count as u64;
        if let Some(path) = saved_file {
            self.saved_files.push(path);
        }
    }

    /// Records a failed page
    pub fn add_failed_page(&mut self) {
        self.failed_pages += 1;
    }

    /// Success rate as a percentage; 0.0 when nothing was requested
    pub fn success_rate(&self) -> f64 {
        if self.total_pages_requested == 0 {
            return 0.0;
        }
        f64::from(self.successful_pages) / f64::from(self.total_pages_requested) * 100.0
    }

    /// Mean reviews per successful page; 0.0 without successes
    pub fn average_reviews_per_page(&self) -> f64 {
        if self.successful_pages == 0 {
            return 0.0;
        }
        self.total_reviews_collected as f64 / f64::from(self.successful_pages)
    }
}

/// Renders run statistics to the log
///
/// Reporting is a pure projection of the counters; it never feeds back
/// into collection state.
#[derive(Debug, Default)]
pub struct StatsReporter;

impl StatsReporter {
    pub fn new() -> Self {
        Self
    }

    /// Logs the end-of-run summary
    pub fn log_summary(&self, stats: &CollectionStats) {
        tracing::info!("{}", "=".repeat(50));
        tracing::info!("Collection run summary:");
        tracing::info!("Pages requested: {}", stats.total_pages_requested);
        tracing::info!("Pages succeeded: {}", stats.successful_pages);
        tracing::info!("Pages failed: {}", stats.failed_pages);
        tracing::info!("Reviews collected: {}", stats.total_reviews_collected);
        tracing::info!("Files written: {}", stats.saved_files.len());
        tracing::info!("Success rate: {:.1}%", stats.success_rate());
        tracing::info!(
            "Average reviews per page: {:.2}",
            stats.average_reviews_per_page()
        );
        tracing::info!("{}", "=".repeat(50));
    }
}

/// Prints the operator-facing recap to stdout
///
/// # Arguments
///
/// * `stats` - Statistics from the run that just finished
/// * `total_reviews_stored` - Review count across everything on disk,
///   including earlier runs
pub fn print_summary(stats: &CollectionStats, total_reviews_stored: u64) {
    println!("\n{}", "=".repeat(50));
    println!("Collection run complete");
    println!(
        "  Pages: {} requested, {} succeeded, {} failed",
        stats.total_pages_requested, stats.successful_pages, stats.failed_pages
    );
    println!("  Reviews this run: {}", stats.total_reviews_collected);
    println!("  Reviews stored in total: {}", total_reviews_stored);
    println!("  Success rate: {:.1}%", stats.success_rate());
    println!("{}", "=".repeat(50));
}
