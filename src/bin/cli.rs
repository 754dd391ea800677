//! subscrape CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::Parser;
use subscrape::{
    error::Result,
    models::{Config, ScrapeParams},
    pipeline,
    utils::http::HttpFetcher,
};

/// subscrape - scrape text posts from a subreddit
#[derive(Parser, Debug)]
#[command(name = "subscrape", version, about = "Subreddit text-post scraper")]
struct Cli {
    /// The subreddit to scrape
    subreddit: String,

    /// Stop after collecting this many text posts
    #[arg(short, long, default_value_t = 50)]
    count: usize,

    /// Root directory for the page cache
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Pause after each real network fetch, in seconds
    #[arg(short, long, default_value_t = 0.33)]
    politeness: f64,

    /// Output file path (default: {subreddit}.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Re-fetch every page, overwriting cached copies
    #[arg(short, long)]
    refresh: bool,

    /// Drop stickied posts from listing pages
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    ignore_stickied: bool,

    /// Path to an optional config file with HTTP identity settings
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let params = ScrapeParams {
        output: cli
            .output
            .unwrap_or_else(|| ScrapeParams::default_output(&cli.subreddit)),
        subreddit: cli.subreddit,
        target_count: cli.count,
        cache_dir: cli.cache_dir,
        politeness_secs: cli.politeness,
        refresh: cli.refresh,
        ignore_stickied: cli.ignore_stickied,
    };

    let fetcher = HttpFetcher::new(&config.crawler)?;
    pipeline::run_scraper(&params, &fetcher).await?;

    log::info!("Done!");

    Ok(())
}
