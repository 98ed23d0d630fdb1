//! Sitemapper main entry point
//!
//! This is the command-line interface for the Sitemapper crawler.

use clap::Parser;
use sitemapper::config::{resolve_config, Config, ConfigOverrides};
use sitemapper::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemapper: crawl a site and write its sitemap
///
/// Sitemapper follows links that start with the base URL, up to a fixed
/// number of distinct pages, and writes them to a sitemaps.org XML file.
#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(version)]
#[command(about = "Crawl a website and write a sitemap", long_about = None)]
struct Cli {
    /// Target URL to start crawling from
    #[arg(short = 't', long = "target", value_name = "URL")]
    target: Option<String>,

    /// Number of links to crawl [default: 100]
    #[arg(short = 'n', long = "max-links", value_name = "COUNT")]
    max_links: Option<usize>,

    /// Output file for the sitemap [default: ./sitemap.xml]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Only follow links starting with this prefix [default: target URL]
    #[arg(short = 'b', long = "base", value_name = "URL")]
    base: Option<String>,

    /// Maximum number of pages fetched at once, 0 for unbounded [default: 16]
    #[arg(short = 'j', long = "concurrency", value_name = "N")]
    concurrency: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target_url: self.target.clone(),
            base_url: self.base.clone(),
            max_links: self.max_links,
            max_concurrency: self.concurrency,
            sitemap_path: self.output.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::debug!("Resolving configuration");
    let config = match resolve_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemapper=info,warn"),
            1 => EnvFilter::new("sitemapper=debug,info"),
            2 => EnvFilter::new("sitemapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sitemapper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Target: {}",
        config.crawler.target_url.as_deref().unwrap_or_default()
    );
    println!(
        "  Base prefix: {}",
        config.crawler.base_origin().unwrap_or_default()
    );
    println!("  Max links: {}", config.crawler.max_links);
    match config.crawler.concurrency_limit() {
        Some(limit) => println!("  Max concurrency: {}", limit),
        None => println!("  Max concurrency: unbounded"),
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Sitemap: {}", config.output.sitemap_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let sitemap_path = config.output.sitemap_path.clone();

    match run_crawl(config).await {
        Ok(summary) => {
            if !quiet {
                println!(
                    "Scraping completed: {} URLs written to {} ({} fetched, {} failed, {:.2?})",
                    summary.urls_discovered,
                    sitemap_path,
                    summary.pages_fetched,
                    summary.pages_failed,
                    summary.elapsed
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
