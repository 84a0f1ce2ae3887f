//! Collection orchestrator - the bounded fetch→store loop
//!
//! One run visits page numbers in strictly increasing order starting from
//! the resume point, skipping pages already on disk, fetching and storing
//! the missing ones, and following the remote continuation token until the
//! stream ends or the page budget is spent. Individual page failures never
//! abort the run; the gap finder picks them up next time.

use crate::collector::fetcher::PageFetcher;
use crate::config::CollectionConfig;
use crate::model::CollectionTarget;
use crate::output::CollectionStats;
use crate::storage::PageStore;

/// Drives one bounded collection run for a target
pub struct Collector<F, S> {
    fetcher: F,
    store: S,
    collection: CollectionConfig,
}

impl<F: PageFetcher, S: PageStore> Collector<F, S> {
    /// Creates a collector over the given fetcher and store
    pub fn new(fetcher: F, store: S, collection: CollectionConfig) -> Self {
        Self {
            fetcher,
            store,
            collection,
        }
    }

    /// Access to the underlying store, for resume-point and status queries
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Clamps a requested run budget so the run never walks past the
    /// configured page ceiling
    ///
    /// Returns 0 when `start_page` is already beyond the ceiling.
    pub fn run_budget(&self, start_page: u32, requested: u32) -> u32 {
        let remaining = self
            .collection
            .max_pages
            .saturating_add(1)
            .saturating_sub(start_page);
        requested.min(remaining)
    }

    /// Collects up to `budget` pages starting at `start_page`
    ///
    /// For each visited page number, in order:
    /// - already stored: read it back for its review count, count a
    ///   success, no network call;
    /// - missing: fetch (with the fetcher's internal retries) and save.
    ///   A successful save adopts the continuation token from the payload;
    ///   a missing token ends the run as complete. Fetch or save failure
    ///   counts a failed page, leaves the token untouched, and moves on.
    ///
    /// The continuation token lives only for the duration of this call. A
    /// run that starts mid-stream therefore re-enters the remote
    /// pagination without a token, re-anchoring at the head of the stream
    /// for its first fetched page. This mirrors how the stored data was
    /// originally collected and keeps page files self-contained.
    pub async fn collect(
        &self,
        target: &CollectionTarget,
        start_page: u32,
        budget: u32,
    ) -> CollectionStats {
        tracing::info!(
            "Collecting reviews for '{}' ({})",
            target.name,
            target.data_id
        );
        tracing::info!(
            "Page range: {} - {}",
            start_page,
            start_page + budget.saturating_sub(1)
        );

        let mut stats = CollectionStats::default();
        let mut page_number = start_page;
        let mut token: Option<String> = None;
        let mut pages_visited = 0;

        while pages_visited < budget {
            tracing::info!("Processing page {}...", page_number);
            stats.add_requested_page();

            // Resume support: a page on disk is immutable truth
            if self.store.exists(page_number) {
                tracing::info!("Page {} already stored, skipping", page_number);
                if let Some(existing) = self.store.read(page_number) {
                    stats.add_successful_page(existing.review_count(), None);
                }
                page_number += 1;
                pages_visited += 1;
                continue;
            }

            match self
                .fetcher
                .fetch_page(target, page_number, token.as_deref())
                .await
            {
                Ok(payload) => match self.store.save(page_number, &payload) {
                    Ok(saved_path) => {
                        stats.add_successful_page(payload.review_count(), Some(saved_path));
                        tracing::info!(
                            "Page {} saved, {} reviews",
                            page_number,
                            payload.review_count()
                        );

                        token = payload.next_page_token().map(str::to_owned);
                        if token.is_none() {
                            tracing::info!("No continuation token, stream exhausted");
                            break;
                        }
                    }
                    Err(e) => {
                        // Fetched but not durable: drop the payload and do
                        // not advance the token, so a later run re-fetches
                        // this page from the same cursor
                        stats.add_failed_page();
                        tracing::error!("Failed to save page {}: {}", page_number, e);
                    }
                },
                Err(e) => {
                    stats.add_failed_page();
                    tracing::error!("Failed to fetch page {}: {}", page_number, e);
                }
            }

            page_number += 1;
            pages_visited += 1;

            // Pace only between two real fetches
            if pages_visited < budget && token.is_some() {
                self.fetcher.request_delay().await;
            }
        }

        stats
    }
}
