//! HTTP client for published price-list pages and catalog files.

mod origin;

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

pub use origin::{catalog_filename, extract_domain, resolve_href};

/// HTTP client shared by every fetch of one crawl.
///
/// Maps 429, 404, and other non-2xx responses to typed errors. Transient
/// failures (429, 5xx, network errors) are retried with exponential backoff
/// up to `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct PriceListClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl PriceListClient {
    /// Creates a client with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the `PRICEDB_SCRAPER_*` settings.
    ///
    /// # Errors
    ///
    /// Same as [`PriceListClient::new`].
    pub fn from_config(config: &pricedb_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
        )
    }

    /// Fetches an HTML page as text, honouring the response charset.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.send_checked(url).await?;
            Ok(response.text().await?)
        })
        .await
    }

    /// Fetches a response body as raw bytes. Catalog files are decoded by the
    /// caller because their charset is rarely declared correctly.
    ///
    /// # Errors
    ///
    /// Same as [`PriceListClient::fetch_text`].
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.send_checked(url).await?;
            Ok(response.bytes().await?.to_vec())
        })
        .await
    }

    async fn send_checked(&self, url: &str) -> Result<Response, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,text/csv,*/*;q=0.8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(ScraperError::RateLimited {
                domain: extract_domain(url),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
