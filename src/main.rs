//! EO-Archive main entry point
//!
//! Command-line interface for the executive order scraper. The default mode
//! runs a full scrape of the paginated listing; query flags inspect the
//! store without touching the network.

use clap::Parser;
use eo_archive::config::load_config_with_hash;
use eo_archive::fetch::BrowserSession;
use eo_archive::storage::{open_storage, RecordStore};
use eo_archive::Crawler;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// EO-Archive: a White House executive order scraper
///
/// Crawls the paginated presidential-actions listing, extracts structured
/// records from each executive order page, and stores them deduplicated in
/// SQLite. Without a query flag, runs a full scrape.
#[derive(Parser, Debug)]
#[command(name = "eo-archive")]
#[command(version = "1.0.0")]
#[command(about = "Scrape and search executive orders", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Search stored records for a substring and exit
    #[arg(long, value_name = "TERM", conflicts_with_all = ["list", "show", "dry_run"])]
    search: Option<String>,

    /// List all stored records and exit
    #[arg(long, conflicts_with_all = ["search", "show", "dry_run"])]
    list: bool,

    /// Show the full record with the given id and exit
    #[arg(long, value_name = "ID", conflicts_with_all = ["search", "list", "dry_run"])]
    show: Option<i64>,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with_all = ["search", "list", "show"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(term) = cli.search {
        handle_search(&config, &term)?;
    } else if cli.list {
        handle_list(&config)?;
    } else if let Some(id) = cli.show {
        handle_show(&config, id)?;
    } else if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_scrape(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("eo_archive=info,warn"),
            1 => EnvFilter::new("eo_archive=debug,info"),
            2 => EnvFilter::new("eo_archive=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the default mode: a full scrape of the listing
///
/// The browser session is scoped to this run and released on every path;
/// the store connection closes when the store drops at function exit. An
/// operator interrupt stops further fetching, keeps everything committed so
/// far, and exits non-zero.
async fn handle_scrape(config: eo_archive::Config) -> anyhow::Result<()> {
    let mut store = open_storage(&config.storage.database_path())?;
    let session = BrowserSession::launch(&config.browser).await?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current fetch...");
            signal_cancel.cancel();
        }
    });

    let result = Crawler::new(&session, &mut store, &config.scraper, cancel)
        .run()
        .await;

    // Release the browser before inspecting the result, on success or error
    session.close().await;

    let report = result?;
    println!(
        "Added {} new executive orders ({} links discovered, {} duplicates skipped, {} failures)",
        report.records_inserted,
        report.links_discovered,
        report.duplicates_skipped,
        report.failures
    );

    if report.interrupted {
        anyhow::bail!("scrape interrupted before completion");
    }

    Ok(())
}

/// Handles --search: substring search over the store
fn handle_search(config: &eo_archive::Config, term: &str) -> anyhow::Result<()> {
    let store = open_storage(&config.storage.database_path())?;
    let hits = store.search(term)?;

    if hits.is_empty() {
        println!("No records match '{}'", term);
        return Ok(());
    }

    for summary in &hits {
        println!("{:>5}  {:<10}  {}", summary.id, summary.date, summary.title.trim());
    }
    println!("\n{} record(s) match '{}'", hits.len(), term);

    Ok(())
}

/// Handles --list: all stored records as summaries
fn handle_list(config: &eo_archive::Config) -> anyhow::Result<()> {
    let store = open_storage(&config.storage.database_path())?;
    let all = store.all()?;

    for summary in &all {
        println!("{:>5}  {:<10}  {}", summary.id, summary.date, summary.title.trim());
    }
    println!("\n{} record(s) stored", all.len());

    Ok(())
}

/// Handles --show: the full record for one id
fn handle_show(config: &eo_archive::Config, id: i64) -> anyhow::Result<()> {
    let store = open_storage(&config.storage.database_path())?;

    match store.find_by_id(id)? {
        Some(record) => {
            println!("Title: {}", record.title.trim());
            println!("Date:  {}", record.date);
            println!("URL:   {}", record.url);
            println!("\n{}", record.content);
        }
        None => {
            println!("No record with id {}", id);
        }
    }

    Ok(())
}

/// Handles --dry-run: validate config and show what would be scraped
fn handle_dry_run(config: &eo_archive::Config) {
    println!("=== EO-Archive Dry Run ===\n");

    println!("Scraper:");
    println!("  Listing root: {}", config.scraper.listing_url);
    println!("  Safety delays: {}", config.scraper.safety_delays);
    println!(
        "  Navigation timeout: {}ms",
        config.scraper.navigation_timeout_ms
    );

    println!("\nBrowser:");
    println!("  Profile dir: {}", config.browser.profile_dir.display());
    println!("  Visible: {}", config.browser.visible);

    println!("\nStorage:");
    println!("  Database: {}", config.storage.database_path().display());

    println!("\n✓ Configuration is valid");
}
