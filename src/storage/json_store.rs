//! File-backed page store
//!
//! One pretty-printed JSON file per page, named `<slug>_page_<n>.json`
//! inside the configured data directory. Saves go through a temporary file
//! in the same directory followed by a rename, so a crash mid-write leaves
//! at most a `.tmp` file that the naming convention ignores.

use crate::model::ReviewPage;
use crate::storage::traits::{PageStore, StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file implementation of [`PageStore`]
#[derive(Debug, Clone)]
pub struct JsonPageStore {
    data_dir: PathBuf,
    slug: String,
}

impl JsonPageStore {
    /// Creates a store rooted at `data_dir` for the given target slug
    ///
    /// The directory is created if missing; failure to create it is a
    /// startup error, not a per-page one.
    pub fn new(data_dir: &Path, slug: &str) -> StoreResult<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            slug: slug.to_string(),
        })
    }

    /// Path of the file holding the given page
    pub fn page_path(&self, page_number: u32) -> PathBuf {
        self.data_dir
            .join(format!("{}_page_{}.json", self.slug, page_number))
    }

    /// Extracts the page number from a filename matching the convention
    fn parse_page_number(&self, file_name: &str) -> Option<u32> {
        let prefix = format!("{}_page_", self.slug);
        let stem = file_name.strip_suffix(".json")?;
        let digits = stem.strip_prefix(prefix.as_str())?;
        digits.parse::<u32>().ok().filter(|n| *n >= 1)
    }
}

impl PageStore for JsonPageStore {
    fn save(&self, page_number: u32, page: &ReviewPage) -> StoreResult<PathBuf> {
        if page_number == 0 {
            return Err(StoreError::InvalidPageNumber(page_number));
        }

        let final_path = self.page_path(page_number);
        let tmp_path = final_path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(page)?;

        // Write the temporary file first, rename only on success
        if let Err(e) = fs::write(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!("Saved page {} to {}", page_number, final_path.display());
        Ok(final_path)
    }

    fn exists(&self, page_number: u32) -> bool {
        self.page_path(page_number).exists()
    }

    fn read(&self, page_number: u32) -> Option<ReviewPage> {
        let path = self.page_path(page_number);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read page {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!("Failed to parse stored page {}: {}", path.display(), e);
                None
            }
        }
    }

    fn list_existing_pages(&self) -> Vec<u32> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Failed to scan data directory {}: {}",
                    self.data_dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut pages = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            match self.parse_page_number(name) {
                Some(page_number) => pages.push(page_number),
                None => {
                    // Only warn about files that look like page data
                    if name.starts_with(&self.slug) && name.ends_with(".json") {
                        tracing::warn!("Ignoring file with unexpected name: {}", name);
                    }
                }
            }
        }

        pages.sort_unstable();
        pages
    }
}
