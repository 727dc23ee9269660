//! Paged-Harvest main entry point
//!
//! This is the command-line interface for the Paged-Harvest listing harvester.

use anyhow::{bail, Context};
use clap::Parser;
use paged_harvest::config::{load_config_with_hash, Config, PaginationConfig};
use paged_harvest::crawler::{locator_from_config, run_crawl, user_agent_string};
use paged_harvest::output::{export_collection, load_statistics, print_statistics, print_summary};
use paged_harvest::storage::{open_storage, RecordRepository, SharedStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Paged-Harvest: an incremental listing-page harvester
///
/// Paged-Harvest walks a paginated listing one page at a time, extracts a
/// record from every item on the page, and appends the ones it has not seen
/// before to a stored collection.
#[derive(Parser, Debug)]
#[command(name = "paged-harvest")]
#[command(version = "1.0.0")]
#[command(about = "An incremental listing-page harvester", long_about = None)]
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

    /// Delete the stored collection before crawling
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "export"])]
    dry_run: bool,

    /// Show record counts per stored collection and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export"])]
    stats: bool,

    /// Write the collection as JSON and exit (defaults to output.export-path)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["dry_run", "stats"])]
    export: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(path) = cli.export {
        handle_export(&config, &config_hash, path)?;
    } else {
        handle_crawl(&config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("paged_harvest=info,warn"),
            1 => EnvFilter::new("paged_harvest=debug,info"),
            2 => EnvFilter::new("paged_harvest=trace,debug"),
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

fn open_store(config: &Config) -> anyhow::Result<SharedStore> {
    let path = Path::new(&config.output.database_path);
    open_storage(path).with_context(|| format!("Failed to open database {}", path.display()))
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Paged-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Site: {}", config.crawler.site);
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Settle delay: {}ms", config.crawler.settle_delay_ms);
    match config.crawler.max_pages {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unlimited"),
    }

    let rule = config.pagination_rule();
    let locator = locator_from_config(&rule)?;
    let source = if config.pagination.is_some() {
        "configured"
    } else {
        "site default"
    };
    println!("\nPagination ({}):", source);
    println!("  Next page: {}", locator.describe());
    if let PaginationConfig::LinkText { .. } = rule {
        println!("  Match: exact trimmed link text");
    }

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Collection key: {}", config.collection_key());
    if let Some(path) = &config.output.export_path {
        println!("  Export path: {}", path);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", config.crawler.start_url);

    Ok(())
}

/// Handles the --stats mode: shows record counts from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = open_store(config)?;
    let stats = {
        let guard = store
            .lock()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        load_statistics(&*guard)?
    };

    print_statistics(&stats);

    Ok(())
}

/// Handles the --export mode: writes the collection as JSON
fn handle_export(config: &Config, config_hash: &str, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path
        .or_else(|| config.output.export_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", config.collection_key())));

    println!("=== Exporting Collection ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Collection: {}", config.collection_key());
    println!("Output: {}", path.display());
    println!();

    let store = open_store(config)?;
    let count = {
        let guard = store
            .lock()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        export_collection(&*guard, config.collection_key(), config_hash, &path)?
    };

    println!("✓ Exported {} records to: {}", count, path.display());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, fresh: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if fresh {
        // Clearing never decodes records
        let collection: RecordRepository<serde_json::Value> =
            RecordRepository::new(Arc::clone(&store), config.collection_key());
        let removed = collection.clear()?;
        if removed {
            tracing::info!(
                "Starting fresh crawl (cleared collection '{}')",
                config.collection_key()
            );
        } else {
            tracing::info!("Starting fresh crawl (no stored collection)");
        }
    } else {
        tracing::info!("Starting crawl (appending to any stored collection)");
    }

    let summary = run_crawl(config, store).await?;
    print_summary(&summary);

    if summary.is_failure() {
        bail!("Crawl stopped after a failed page");
    }

    tracing::info!("Crawl completed successfully");
    Ok(())
}
