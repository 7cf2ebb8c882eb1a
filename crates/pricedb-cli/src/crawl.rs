//! `crawl` command handler.
//!
//! Per-file failures are logged by the pipeline and reported in the output;
//! only configuration problems and an unreachable index page fail the
//! command.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use pricedb_core::AppConfig;
use pricedb_scraper::{zabac, CrawlOptions, Crawler, PriceListClient, Source};
use tokio_util::sync::CancellationToken;

use crate::CrawlArgs;

/// Picks the source definition: the sources file if one is configured and
/// lists the chain, the built-in definition otherwise.
pub(crate) fn load_source(
    config: &AppConfig,
    override_path: Option<&Path>,
) -> anyhow::Result<Source> {
    let Some(path) = override_path.or(config.sources_path.as_deref()) else {
        return Ok(zabac::source());
    };

    let sources = pricedb_core::load_sources(path)
        .with_context(|| format!("failed to load sources from {}", path.display()))?;
    if let Some(source_config) = sources.find(zabac::CHAIN) {
        tracing::info!(path = %path.display(), "using source definition from file");
        Ok(zabac::with_config(source_config.clone()))
    } else {
        tracing::warn!(
            path = %path.display(),
            chain = zabac::CHAIN,
            "sources file has no entry for chain; using built-in definition"
        );
        Ok(zabac::source())
    }
}

pub(crate) fn crawl_options(config: &AppConfig, timeout_secs: Option<u64>) -> CrawlOptions {
    let mut options = CrawlOptions::from_config(config);
    if let Some(secs) = timeout_secs {
        options.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    options
}

/// Run the crawl and write its JSON to `--output` or stdout.
///
/// # Errors
///
/// Returns an error if the source definition or HTTP client cannot be set
/// up, the index page cannot be read, or the output cannot be written.
pub(crate) async fn run_crawl(config: &AppConfig, args: &CrawlArgs) -> anyhow::Result<()> {
    let source = load_source(config, args.sources.as_deref())?;
    let client = PriceListClient::from_config(config).context("failed to build HTTP client")?;
    let crawler = Crawler::new(client, source, crawl_options(config, args.timeout_secs));

    if args.dry_run {
        return run_dry(&crawler).await;
    }

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("received ctrl-c, cancelling crawl");
            on_ctrl_c.cancel();
        }
    });

    let report = crawler
        .crawl(args.date, &cancel)
        .await
        .context("crawl failed")?;

    let json = if args.report {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.stores)?
    };
    write_output(args.output.as_deref(), &json)?;

    if report.stores.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "crawl produced no stores"
        );
    }
    Ok(())
}

async fn run_dry(crawler: &Crawler) -> anyhow::Result<()> {
    let urls = crawler
        .catalog_urls()
        .await
        .context("failed to read index page")?;
    let source = crawler.source();

    for url in &urls {
        match (source.resolve_identity)(url, &source.config) {
            Ok(identity) => println!(
                "{url}\t{}\t{}",
                identity.store_id, identity.display_name
            ),
            Err(e) => println!("{url}\tskipped: {e}"),
        }
    }
    println!("dry-run: {} catalog files listed", urls.len());
    Ok(())
}

pub(crate) fn write_output(path: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote crawl output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
