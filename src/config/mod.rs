//! Configuration module for Sitemapper
//!
//! This module handles loading TOML configuration files, merging
//! command-line overrides, and validating the result.
//!
//! # Example
//!
//! ```no_run
//! use sitemapper::config::{resolve_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("sitemapper.toml")), ConfigOverrides::default()).unwrap();
//! println!("Crawler will admit at most {} links", config.crawler.max_links);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, resolve_config, ConfigOverrides};
pub use validation::validate;
