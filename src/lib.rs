//! Sitemapper: a bounded same-origin crawler that writes sitemaps
//!
//! This crate crawls a website from a seed URL, follows links that share the
//! configured base prefix, and writes every discovered URL into a
//! sitemaps.org `urlset` document once the crawl has drained.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Sitemapper operations
#[derive(Debug, Error)]
pub enum SitemapperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] output::SitemapError),

    #[error("HTML parse error: {message}")]
    HtmlParse { message: String },

    #[error("Seed URL must not be empty")]
    EmptySeed,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("You must specify a target url")]
    MissingTarget,
}

/// Result type alias for Sitemapper operations
pub type Result<T> = std::result::Result<T, SitemapperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlSummary, Crawler};
pub use state::{Admission, CrawlState};
