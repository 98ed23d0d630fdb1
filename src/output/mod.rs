//! Output module for writing crawl results
//!
//! This module turns the exported URL set into a sitemap document on disk.

mod sitemap;

pub use sitemap::{
    format_sitemap, write_sitemap, SitemapError, SitemapResult, SITEMAP_NAMESPACE,
    XML_DECLARATION,
};
