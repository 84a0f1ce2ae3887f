//! HTTP page fetcher
//!
//! This module handles all outbound requests for the collector, including:
//! - Building the HTTP client with timeouts
//! - One GET request per fetch attempt against the search endpoint
//! - Fixed-delay retry for failed attempts
//! - Jittered inter-request delay for rate limiting
//! - Uniform error classification
//!
//! The remote service paginates with an opaque continuation token: the
//! first page of a stream is requested without one, every later page with
//! the token carried by its predecessor.

use crate::config::{ApiConfig, RateLimitConfig};
use crate::model::{CollectionTarget, ReviewPage};
use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Reviews requested per page when a continuation token is present; the
/// first page of a stream ignores this and returns the service default
const TOKEN_PAGE_SIZE: u32 = 20;

/// Errors from a page fetch
///
/// All variants are equivalent to the orchestrator: the page failed. The
/// distinction exists only for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("remote service error: {0}")]
    Api(String),

    #[error("all {attempts} attempts failed, last: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

/// Trait for page retrieval, the seam for test doubles
#[async_trait]
pub trait PageFetcher {
    /// Fetches one page of reviews for a target
    ///
    /// Retries internally up to the configured attempt count, sleeping a
    /// fixed delay between attempts. The page number is only used for
    /// logging; pagination itself is driven by the token.
    async fn fetch_page(
        &self,
        target: &CollectionTarget,
        page_number: u32,
        token: Option<&str>,
    ) -> Result<ReviewPage, FetchError>;

    /// Sleeps the jittered inter-request delay
    ///
    /// Callers invoke this between two successive fetches; the uniform
    /// jitter avoids a predictable request cadence against the remote
    /// rate limit.
    async fn request_delay(&self);
}

/// Fetcher for a SerpAPI-compatible `google_maps_reviews` endpoint
pub struct SerpApiFetcher {
    client: Client,
    api: ApiConfig,
    rate_limit: RateLimitConfig,
}

impl SerpApiFetcher {
    /// Builds a fetcher with its own HTTP client
    pub fn new(api: ApiConfig, rate_limit: RateLimitConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            api,
            rate_limit,
        })
    }

    /// Performs a single fetch attempt: exactly one outbound request
    async fn fetch_once(
        &self,
        target: &CollectionTarget,
        token: Option<&str>,
    ) -> Result<ReviewPage, FetchError> {
        let mut params: Vec<(&str, String)> = vec![
            ("api_key", self.api.key.clone()),
            ("engine", "google_maps_reviews".to_string()),
            ("data_id", target.data_id.clone()),
            ("hl", self.api.language.clone()),
            ("sort_by", "newestFirst".to_string()),
        ];
        if let Some(token) = token {
            params.push(("next_page_token", token.to_string()));
            params.push(("num", TOKEN_PAGE_SIZE.to_string()));
        }

        let response = self
            .client
            .get(&self.api.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let mut page: ReviewPage = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        // The service reports its own failures inside a 200 body
        if let Some(message) = page.error.take() {
            return Err(FetchError::Api(message));
        }

        Ok(page)
    }
}

#[async_trait]
impl PageFetcher for SerpApiFetcher {
    async fn fetch_page(
        &self,
        target: &CollectionTarget,
        page_number: u32,
        token: Option<&str>,
    ) -> Result<ReviewPage, FetchError> {
        let max_retries = self.rate_limit.max_retries;
        let mut last_error: Option<FetchError> = None;

        for attempt in 1..=max_retries {
            tracing::info!(
                "Requesting page {} (attempt {}/{})",
                page_number,
                attempt,
                max_retries
            );
            let started = Instant::now();

            match self.fetch_once(target, token).await {
                Ok(page) => {
                    tracing::info!(
                        "Page {} fetched: {} reviews in {:.2}s",
                        page_number,
                        page.review_count(),
                        started.elapsed().as_secs_f64()
                    );
                    return Ok(page);
                }
                Err(e) => {
                    tracing::warn!(
                        "Page {} attempt {}/{} failed after {:.2}s: {}",
                        page_number,
                        attempt,
                        max_retries,
                        started.elapsed().as_secs_f64(),
                        e
                    );
                    last_error = Some(e);

                    if attempt < max_retries {
                        tracing::debug!("Retrying in {}s", self.rate_limit.retry_delay);
                        tokio::time::sleep(Duration::from_secs_f64(self.rate_limit.retry_delay))
                            .await;
                    }
                }
            }
        }

        let last = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!("Page {} failed after {} attempts: {}", page_number, max_retries, last);
        Err(FetchError::RetriesExhausted {
            attempts: max_retries,
            last,
        })
    }

    async fn request_delay(&self) {
        let min = self.rate_limit.request_delay_min;
        let max = self.rate_limit.request_delay_max;
        let delay = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        tracing::debug!("Waiting {:.2}s before next request", delay);
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;
    }
}

/// Maps transport errors into the fetch error taxonomy
fn classify_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Network(format!("connection failed: {}", e))
    } else {
        FetchError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api_config(endpoint: &str) -> ApiConfig {
        ApiConfig {
            key: "test-key".to_string(),
            endpoint: endpoint.to_string(),
            language: "zh-TW".to_string(),
            timeout_secs: 5,
        }
    }

    fn test_rate_limit() -> RateLimitConfig {
        RateLimitConfig {
            request_delay_min: 0.0,
            request_delay_max: 0.0,
            max_retries: 2,
            retry_delay: 0.0,
        }
    }

    #[test]
    fn test_build_fetcher() {
        let fetcher = SerpApiFetcher::new(
            test_api_config("https://serpapi.com/search.json"),
            test_rate_limit(),
        );
        assert!(fetcher.is_ok());
    }

    #[tokio::test]
    async fn test_zero_width_jitter_is_instant() {
        let fetcher = SerpApiFetcher::new(
            test_api_config("https://serpapi.com/search.json"),
            test_rate_limit(),
        )
        .unwrap();

        let started = Instant::now();
        fetcher.request_delay().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    // Retry behavior against a live socket is covered by the wiremock
    // integration tests in tests/collection_tests.rs
}
