//! Crawl orchestration: index page → catalog URLs → assembled stores.
//!
//! Every catalog URL is processed in its own task, bounded by a semaphore. A
//! failing URL is skipped and recorded; only an unreachable index page fails
//! the crawl as a whole. Cancellation and the optional deadline abort the
//! tasks still in flight and return what has been assembled so far.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use pricedb_core::{AppConfig, Store};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::{Id as TaskId, JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::client::{catalog_filename, resolve_href, PriceListClient};
use crate::error::ScraperError;
use crate::fetch::fetch_catalog;
use crate::index::extract_catalog_urls;
use crate::normalize::normalize_row;
use crate::rows::parse_rows;
use crate::source::Source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Catalog files processed at the same time. Values below 1 act as 1.
    pub max_concurrent_files: usize,
    /// Deadline for the whole crawl, index fetch included.
    pub timeout: Option<Duration>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_concurrent_files: 4,
            timeout: None,
        }
    }
}

impl CrawlOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_concurrent_files: config.scraper_max_concurrent_files,
            timeout: (config.crawl_timeout_secs > 0)
                .then(|| Duration::from_secs(config.crawl_timeout_secs)),
        }
    }
}

/// A catalog URL that produced no store, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCatalog {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Stores with at least one product, in completion order.
    pub stores: Vec<Store>,
    pub skipped: Vec<SkippedCatalog>,
    /// Set when cancellation or the deadline cut the crawl short.
    pub interrupted: bool,
}

impl CrawlReport {
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.stores.iter().map(|s| s.items.len()).sum()
    }
}

#[derive(Debug, Clone, Copy)]
enum Interruption {
    Cancelled,
    TimedOut,
}

impl Interruption {
    fn as_str(self) -> &'static str {
        match self {
            Interruption::Cancelled => "cancelled",
            Interruption::TimedOut => "timed out",
        }
    }
}

/// Crawls one source's published price lists.
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Arc<PriceListClient>,
    source: Arc<Source>,
    options: CrawlOptions,
}

impl Crawler {
    #[must_use]
    pub fn new(client: PriceListClient, source: Source, options: CrawlOptions) -> Self {
        Self {
            client: Arc::new(client),
            source: Arc::new(source),
            options,
        }
    }

    #[must_use]
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Lists the absolute catalog URLs currently linked from the index page.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the index page cannot be fetched.
    /// Links that cannot be resolved against the index URL are skipped.
    pub async fn catalog_urls(&self) -> Result<Vec<String>, ScraperError> {
        let config = &self.source.config;
        let index_url = config.index_url.as_str();
        let markup = self.client.fetch_text(index_url).await?;

        let mut urls = BTreeSet::new();
        for href in extract_catalog_urls(&markup, &config.file_extension) {
            match resolve_href(index_url, &href) {
                Ok(url) => {
                    urls.insert(url);
                }
                Err(e) => tracing::warn!(%href, error = %e, "skipping unresolvable catalog link"),
            }
        }

        if urls.is_empty() {
            tracing::warn!(
                chain = %config.chain,
                index_url,
                "index page lists no catalog files"
            );
        }
        Ok(urls.into_iter().collect())
    }

    /// Runs a full crawl and returns every store that yielded products.
    ///
    /// `target_date` exists so all sources share one signature; sources that
    /// only publish current price lists ignore it.
    ///
    /// # Errors
    ///
    /// Only a failure to fetch or read the index page is an error. Per-file
    /// failures land in [`CrawlReport::skipped`].
    pub async fn crawl(
        &self,
        target_date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<CrawlReport, ScraperError> {
        let chain = self.source.chain().to_owned();
        if let Some(date) = target_date {
            tracing::warn!(
                %chain,
                %date,
                "source publishes only its current price lists; ignoring target date"
            );
        }

        let deadline = self.options.timeout.map(|t| Instant::now() + t);
        let mut report = CrawlReport::default();

        let urls = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                report.interrupted = true;
                tracing::warn!(%chain, "crawl cancelled before the index page was read");
                return Ok(report);
            }
            () = deadline_elapsed(deadline) => {
                report.interrupted = true;
                tracing::warn!(%chain, "crawl timed out before the index page was read");
                return Ok(report);
            }
            urls = self.catalog_urls() => urls?,
        };
        if urls.is_empty() {
            return Ok(report);
        }
        tracing::info!(%chain, files = urls.len(), "processing catalog files");

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrent_files.max(1)));
        let mut unfinished: HashMap<TaskId, String> = HashMap::with_capacity(urls.len());
        let mut tasks = JoinSet::new();
        for url in urls {
            let client = Arc::clone(&self.client);
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let task_url = url.clone();
            let handle = tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                process_catalog(&client, &source, &task_url).await
            });
            unfinished.insert(handle.id(), url);
        }

        let interruption = loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break Some(Interruption::Cancelled),
                () = deadline_elapsed(deadline) => break Some(Interruption::TimedOut),
                joined = tasks.join_next_with_id() => match joined {
                    None => break None,
                    Some(joined) => record_joined(&mut report, &mut unfinished, joined),
                },
            }
        };

        if let Some(interruption) = interruption {
            tasks.abort_all();
            // Tasks that finished before the abort still hand back their stores.
            while let Some(joined) = tasks.join_next_with_id().await {
                record_joined(&mut report, &mut unfinished, joined);
            }
            report.interrupted = true;
            tracing::warn!(
                %chain,
                reason = interruption.as_str(),
                unfinished = unfinished.len(),
                stores = report.stores.len(),
                "crawl interrupted; keeping stores assembled so far"
            );

            let reason = format!("crawl {} before this file was processed", interruption.as_str());
            let mut leftover: Vec<String> = unfinished.into_values().collect();
            leftover.sort();
            report
                .skipped
                .extend(leftover.into_iter().map(|url| SkippedCatalog {
                    url,
                    reason: reason.clone(),
                }));
        }

        tracing::info!(
            %chain,
            stores = report.stores.len(),
            products = report.product_count(),
            skipped = report.skipped.len(),
            interrupted = report.interrupted,
            "crawl finished"
        );
        Ok(report)
    }
}

/// Files whose task was aborted stay in `unfinished`; everything else is
/// moved into the report.
fn record_joined(
    report: &mut CrawlReport,
    unfinished: &mut HashMap<TaskId, String>,
    joined: Result<(TaskId, Result<Store, ScraperError>), JoinError>,
) {
    match joined {
        Ok((id, outcome)) => {
            if let Some(url) = unfinished.remove(&id) {
                record_outcome(report, url, outcome);
            }
        }
        Err(e) if e.is_cancelled() => {}
        Err(e) => {
            let Some(url) = unfinished.remove(&e.id()) else {
                return;
            };
            tracing::error!(%url, error = %e, "catalog task panicked");
            report.skipped.push(SkippedCatalog {
                url,
                reason: "processing task panicked".to_string(),
            });
        }
    }
}

fn record_outcome(report: &mut CrawlReport, url: String, outcome: Result<Store, ScraperError>) {
    match outcome {
        Ok(store) => {
            tracing::info!(
                %url,
                store_id = %store.identity.store_id,
                products = store.items.len(),
                "assembled store"
            );
            report.stores.push(store);
        }
        Err(e) => {
            tracing::warn!(
                %url,
                filename = %catalog_filename(&url),
                error = %e,
                "skipping catalog file"
            );
            report.skipped.push(SkippedCatalog {
                url,
                reason: e.to_string(),
            });
        }
    }
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Resolves, downloads, and normalizes one catalog file into a store.
///
/// Identity comes first, so files with unrecognized names are never
/// downloaded. Rows missing a required field are dropped individually.
///
/// # Errors
///
/// [`ScraperError::UnrecognizedFormat`], any transport or
/// [`ScraperError::Decode`] error, or [`ScraperError::NoProducts`] when no
/// row survives normalization.
pub async fn process_catalog(
    client: &PriceListClient,
    source: &Source,
    url: &str,
) -> Result<Store, ScraperError> {
    let config = &source.config;
    let identity = (source.resolve_identity)(url, config)?;
    let catalog = fetch_catalog(client, url, &config.encodings).await?;
    let rows = parse_rows(&catalog.text, config.delimiter_byte());

    let total = rows.len();
    let mut items = Vec::with_capacity(total);
    let mut dropped = 0usize;
    for row in &rows {
        match normalize_row(row, config, source.fixup) {
            Ok(product) => items.push(product),
            Err(e) => {
                dropped += 1;
                tracing::debug!(url, error = %e, "dropping row");
            }
        }
    }
    if dropped > 0 {
        tracing::warn!(
            url,
            store_id = %identity.store_id,
            dropped,
            total,
            "dropped rows missing required fields"
        );
    }

    Store::assemble(identity, items).ok_or_else(|| ScraperError::NoProducts {
        url: url.to_owned(),
    })
}
