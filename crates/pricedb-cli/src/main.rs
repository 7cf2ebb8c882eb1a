mod crawl;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricedb-cli")]
#[command(about = "Retail price-list crawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the Žabac price-list page and emit normalized stores as JSON
    Crawl(CrawlArgs),
}

#[derive(Debug, Args)]
struct CrawlArgs {
    /// Target date (YYYY-MM-DD); Žabac only publishes current lists and ignores it
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Write JSON to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Sources YAML overriding the built-in definition (defaults to PRICEDB_SOURCES_PATH)
    #[arg(long)]
    sources: Option<PathBuf>,

    /// Whole-crawl deadline in seconds, 0 disables (defaults to PRICEDB_CRAWL_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// List catalog files and their resolved stores without downloading them
    #[arg(long)]
    dry_run: bool,

    /// Emit the full report (stores, skipped files, interrupted flag)
    #[arg(long)]
    report: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = pricedb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "loaded configuration");

    match cli.command {
        Commands::Crawl(args) => crawl::run_crawl(&config, &args).await,
    }
}
