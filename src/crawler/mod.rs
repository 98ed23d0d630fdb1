//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Anchor href extraction behind the `LinkExtractor` trait
//! - A bounded frontier of admitted URLs
//! - Overall crawl coordination and termination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, CrawlSummary, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use parser::{HtmlLinkExtractor, LinkExtractor};
pub use scheduler::Scheduler;
