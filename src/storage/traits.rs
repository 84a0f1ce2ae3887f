//! Storage trait and error types

use crate::model::ReviewPage;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid page number: {0}")]
    InvalidPageNumber(u32),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for durable page storage backends
///
/// Page numbers are positive integers starting at 1, scoped to a single
/// collection target. A saved page is immutable: implementations never
/// update or delete it, and the orchestrator treats its existence as proof
/// the page was collected.
pub trait PageStore {
    /// Persists the full payload keyed by page number
    ///
    /// The write must be atomic: a concurrent or later reader either sees
    /// the complete page or no page at all.
    ///
    /// # Returns
    ///
    /// The location the page was written to
    fn save(&self, page_number: u32, page: &ReviewPage) -> StoreResult<PathBuf>;

    /// Checks whether a page is already stored, without reading it
    fn exists(&self, page_number: u32) -> bool;

    /// Reads a previously saved page
    ///
    /// Returns `None` for a missing page. A present but unreadable page
    /// (corrupt JSON, permission error) also reads as `None`, with a
    /// warning logged; it never fails the caller.
    fn read(&self, page_number: u32) -> Option<ReviewPage>;

    /// Enumerates the stored page numbers, sorted ascending
    ///
    /// Files not matching the page naming convention are skipped with a
    /// warning.
    fn list_existing_pages(&self) -> Vec<u32>;

    /// Total review records across all stored pages
    fn total_reviews(&self) -> u64 {
        self.list_existing_pages()
            .into_iter()
            .filter_map(|n| self.read(n))
            .map(|page| page.review_count() as u64)
            .sum()
    }
}
