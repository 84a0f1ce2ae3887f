//! Payload model for review pages
//!
//! A page is the unit of collection and storage: the full structured
//! response for one pagination step, containing a batch of review records
//! and, for every page but the last, the continuation token needed to fetch
//! the next one. Fields the collector does not interpret are preserved
//! verbatim through [`serde_json`] flattening so that the stored file is the
//! complete raw response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::TargetConfig;

/// The place whose reviews are being collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    /// Human-readable label
    pub name: String,
    /// Opaque identifier understood by the remote service
    pub data_id: String,
    /// Short name embedded in page filenames
    pub slug: String,
}

impl CollectionTarget {
    /// Builds a target from the `[target]` configuration section
    ///
    /// When no slug is configured, one is derived from the name by
    /// lowercasing and mapping every non-alphanumeric run to a single
    /// underscore.
    pub fn from_config(config: &TargetConfig) -> Self {
        let slug = config
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&config.name));
        Self {
            name: config.name.clone(),
            data_id: config.data_id.clone(),
            slug,
        }
    }
}

/// Derives a filename-safe slug from a target name
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("target");
    }
    slug
}

/// One page of the review stream, as returned by the remote API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPage {
    /// Review records on this page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<ReviewRecord>,

    /// Pagination block carrying the continuation token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serpapi_pagination: Option<Pagination>,

    /// Error message reported by the remote service; a payload carrying
    /// this field is treated as a failed fetch, never stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Everything else in the response (place metadata, search parameters),
    /// preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReviewPage {
    /// Returns the token required to fetch the next page, if any
    ///
    /// Absence signals the stream is exhausted.
    pub fn next_page_token(&self) -> Option<&str> {
        self.serpapi_pagination
            .as_ref()
            .and_then(|p| p.next_page_token.as_deref())
    }

    /// Number of review records on this page
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

/// Remote pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single review within a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Star rating given by the reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Free-text excerpt of the review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    /// Relative date string as shown by the service ("a week ago")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Absolute timestamp of the review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_date: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
