//! Review-Harvest main entry point
//!
//! This is the command-line interface for the review collector.

use clap::Parser;
use review_harvest::collector::next_missing_page;
use review_harvest::config::{load_config, Config};
use review_harvest::output::print_summary;
use review_harvest::{
    CollectionTarget, Collector, HarvestError, JsonPageStore, PageStore, SerpApiFetcher,
    StatsReporter,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Review-Harvest: a resumable review collector
///
/// Collects paginated review data for a configured place through a
/// SerpAPI-compatible endpoint, one immutable JSON file per page, and
/// resumes interrupted collections by filling gaps in the stored pages.
#[derive(Parser, Debug)]
#[command(name = "review-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A resumable review collector", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the per-run page budget from the config
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Show what is already collected and exit
    #[arg(long)]
    status: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load and validate configuration before anything else; logging setup
    // needs the log-file path from it
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    setup_logging(cli.verbose, cli.quiet, Path::new(&config.output.log_file))?;
    tracing::info!("Configuration loaded from {}", cli.config.display());

    let target = CollectionTarget::from_config(&config.target);
    let store = JsonPageStore::new(Path::new(&config.output.data_dir), &target.slug)
        .map_err(HarvestError::from)?;

    if cli.status {
        handle_status(&store, &target);
        return Ok(());
    }

    match handle_collect(config, target, store, cli.pages).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Collection run failed: {}", e);
            eprintln!("Collection run failed: {}", e);
            eprintln!("See the log file for details.");
            std::process::exit(1);
        }
    }
}

/// Sets up the tracing subscriber: a verbosity-filtered console layer plus
/// an info-level file layer appending to the configured log file
fn setup_logging(verbose: u8, quiet: bool, log_file: &Path) -> review_harvest::Result<()> {
    let console_filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("review_harvest=info,warn"),
            1 => EnvFilter::new("review_harvest=debug,info"),
            2 => EnvFilter::new("review_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(console_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::sync::Arc::new(file))
        .with_filter(EnvFilter::new("review_harvest=info,warn"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Handles the --status mode: reports what is already on disk
fn handle_status(store: &JsonPageStore, target: &CollectionTarget) {
    let existing = store.list_existing_pages();
    let total_reviews = store.total_reviews();

    println!("Target: {} ({})", target.name, target.data_id);
    if existing.is_empty() {
        println!("No pages collected yet.");
    } else {
        println!(
            "Collected pages ({}): {:?}",
            existing.len(),
            existing
        );
        println!("Total reviews stored: {}", total_reviews);
    }
    println!("Next page to collect: {}", next_missing_page(&existing));
}

/// Handles the default mode: one bounded collection run
async fn handle_collect(
    config: Config,
    target: CollectionTarget,
    store: JsonPageStore,
    pages_override: Option<u32>,
) -> review_harvest::Result<()> {
    let existing = store.list_existing_pages();
    if existing.is_empty() {
        tracing::info!("No existing data, starting from page 1");
    } else {
        tracing::info!(
            "Found {} existing pages with {} reviews: {:?}",
            existing.len(),
            store.total_reviews(),
            existing
        );
    }

    let start_page = next_missing_page(&existing);
    let requested_budget = pages_override.unwrap_or(config.collection.pages_per_run);

    let fetcher = SerpApiFetcher::new(config.api.clone(), config.rate_limit.clone())?;
    let collector = Collector::new(fetcher, store, config.collection.clone());

    let budget = collector.run_budget(start_page, requested_budget);
    if budget == 0 {
        let total = collector.store().total_reviews();
        tracing::info!("Page ceiling reached, nothing left to collect");
        println!(
            "Collection already complete: {} pages, {} reviews",
            config.collection.max_pages, total
        );
        return Ok(());
    }

    tracing::info!(
        "Starting run at page {} with a budget of {} pages",
        start_page,
        budget
    );

    let stats = collector.collect(&target, start_page, budget).await;

    StatsReporter::new().log_summary(&stats);
    print_summary(&stats, collector.store().total_reviews());

    Ok(())
}
