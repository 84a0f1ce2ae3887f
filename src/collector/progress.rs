//! Gap-filling resumption logic
//!
//! Given the set of page numbers already on disk, decides where the next
//! run should start. Holes left by failed pages in earlier runs are filled
//! before the frontier is extended.

/// Computes the next page number to collect
///
/// Scans the sorted existing page numbers against their 1-based expected
/// positions; the first position that does not match is the first missing
/// page. A fully contiguous set `{1, 2, …, n}` yields `n + 1`.
///
/// Page 1 is never assumed: `{2, 3}` yields 1.
///
/// # Arguments
///
/// * `existing` - Stored page numbers, sorted ascending
///
/// # Example
///
/// ```
/// use review_harvest::collector::next_missing_page;
///
/// assert_eq!(next_missing_page(&[1, 2, 4, 5]), 3);
/// assert_eq!(next_missing_page(&[1, 2, 3]), 4);
/// ```
pub fn next_missing_page(existing: &[u32]) -> u32 {
    for (index, page) in existing.iter().enumerate() {
        let expected = index as u32 + 1;
        if *page != expected {
            return expected;
        }
    }
    existing.len() as u32 + 1
}
