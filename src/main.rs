//! Bookshelf main entry point
//!
//! This is the command-line interface for the Bookshelf catalog archiver.

use anyhow::Context;
use bookshelf::config::{load_config_with_hash, validate, Config};
use bookshelf::crawler::{PageRequest, Pipeline, TracingReporter};
use bookshelf::output::{resolve_catalog_path, save_catalog};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Bookshelf: download books in TXT format for your home library
///
/// Crawls a catalog (or a range of book identifiers), saves each book's
/// text, cover and comments, and writes a JSON catalog of everything
/// downloaded. Books that fail to download are logged and skipped.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version)]
#[command(about = "Download books in TXT format for your home library", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root directory for downloaded files
    #[arg(long, global = true, value_name = "DIR")]
    dest_folder: Option<PathBuf>,

    /// Path of the JSON catalog file
    #[arg(long, global = true, value_name = "FILE")]
    json_path: Option<PathBuf>,

    /// Do not save book texts
    #[arg(long, global = true)]
    skip_txt: bool,

    /// Do not download cover images
    #[arg(long, global = true)]
    skip_imgs: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download every book listed on a range of catalog pages
    Category {
        /// Catalog (genre) page URL; the configured catalog when omitted
        #[arg(value_name = "CATEGORY_URL")]
        category_url: Option<Url>,

        /// First catalog page to crawl
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        start_page: i64,

        /// Last catalog page to crawl; the catalog's last page when omitted
        #[arg(long, allow_negative_numbers = true)]
        end_page: Option<i64>,
    },

    /// Download books by identifier, from START to STOP inclusive
    Range {
        #[arg(allow_negative_numbers = true)]
        start: i64,

        #[arg(allow_negative_numbers = true)]
        stop: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_settings(&cli)?;
    let catalog_path = resolve_catalog_path(&config.output);

    let pipeline = Pipeline::new(&config, Arc::new(TracingReporter))
        .context("Failed to set up the archiver")?
        .with_skips(cli.skip_txt, cli.skip_imgs);

    let (records, requested) = match cli.command {
        Command::Category {
            category_url,
            start_page,
            end_page,
        } => {
            let request = PageRequest {
                start_page,
                end_page,
            };
            let records = pipeline
                .run_catalog(category_url, request)
                .await
                .context("Catalog crawl aborted")?;
            (records, None)
        }
        Command::Range { start, stop } => {
            let records = pipeline
                .run_id_range(start, stop)
                .await
                .context("Range download aborted")?;
            let requested = (stop - start.max(1) + 1).max(0);
            (records, Some(requested))
        }
    };

    match requested {
        Some(requested) => tracing::info!("Archived {} of {} books", records.len(), requested),
        None => tracing::info!("Archived {} books", records.len()),
    }

    let written = save_catalog(&records, &catalog_path)
        .with_context(|| format!("Failed to write catalog {}", catalog_path.display()))?;
    tracing::info!("Catalog saved to {}", written.display());

    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(dest) = &cli.dest_folder {
        config.output.destination = Some(dest.to_string_lossy().into_owned());
    }
    if let Some(json_path) = &cli.json_path {
        config.output.catalog_path = Some(json_path.to_string_lossy().into_owned());
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookshelf=info,warn"),
            1 => EnvFilter::new("bookshelf=debug,info"),
            2 => EnvFilter::new("bookshelf=trace,debug"),
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
