use serde::Deserialize;

/// Main configuration structure for Review-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub target: TargetConfig,
    pub collection: CollectionConfig,
    #[serde(rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub output: OutputConfig,
}

/// Remote search API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API key for the search service; the `SERP_API_KEY` environment
    /// variable takes precedence over this value
    #[serde(default)]
    pub key: String,

    /// Endpoint URL for the search service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Language code passed as the `hl` request parameter
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout", rename = "timeout")]
    pub timeout_secs: u64,
}

/// The place whose reviews are collected
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Human-readable label for the target
    pub name: String,

    /// Opaque identifier of the place in the remote service
    #[serde(rename = "data-id")]
    pub data_id: String,

    /// Short name used in page filenames; derived from `name` when absent
    #[serde(default)]
    pub slug: Option<String>,
}

/// Collection limits
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Hard ceiling on total pages ever collected for this target
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Expected reviews per page; informational, the actual count comes
    /// from each response
    #[serde(rename = "reviews-per-page", default = "default_reviews_per_page")]
    pub reviews_per_page: u32,

    /// Default page budget for a single run
    #[serde(rename = "pages-per-run", default = "default_pages_per_run")]
    pub pages_per_run: u32,
}

/// Request pacing and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Lower bound of the jittered inter-request delay (seconds)
    #[serde(rename = "request-delay-min")]
    pub request_delay_min: f64,

    /// Upper bound of the jittered inter-request delay (seconds)
    #[serde(rename = "request-delay-max")]
    pub request_delay_max: f64,

    /// Attempts per page fetch before giving up
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed wait between retry attempts (seconds)
    #[serde(rename = "retry-delay")]
    pub retry_delay: f64,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory holding one JSON file per collected page
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Path to the persistent log file
    #[serde(rename = "log-file")]
    pub log_file: String,
}

fn default_endpoint() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_language() -> String {
    "zh-TW".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_reviews_per_page() -> u32 {
    20
}

fn default_pages_per_run() -> u32 {
    10
}
