//! Sitemap XML generation
//!
//! Serializes the exported URL set into a sitemaps.org `urlset` document.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// XML declaration written before the `urlset` element
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Errors that can occur while producing a sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to write sitemap: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize sitemap: {0}")]
    Serialize(String),
}

/// Result type for sitemap operations
pub type SitemapResult<T> = Result<T, SitemapError>;

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<UrlEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct UrlEntry<'a> {
    loc: &'a str,
}

/// Formats URLs as a sitemap document
///
/// Entries keep the order of `urls`; each nesting level is indented by two
/// spaces and text is XML-escaped.
pub fn format_sitemap(urls: &[String]) -> SitemapResult<String> {
    let urlset = UrlSet {
        xmlns: SITEMAP_NAMESPACE,
        urls: urls.iter().map(|loc| UrlEntry { loc }).collect(),
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    urlset
        .serialize(serializer)
        .map_err(|e| SitemapError::Serialize(e.to_string()))?;

    let mut xml = String::with_capacity(XML_DECLARATION.len() + body.len() + 2);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&body);
    xml.push('\n');

    Ok(xml)
}

/// Writes a sitemap of `urls` to `output_path`
///
/// The document is fully formatted before the file is created, so a
/// serialization failure leaves no partial file behind.
pub fn write_sitemap(urls: &[String], output_path: &Path) -> SitemapResult<()> {
    let xml = format_sitemap(urls)?;

    let mut file = File::create(output_path)?;
    file.write_all(xml.as_bytes())?;
    file.flush()?;

    tracing::debug!(
        "Wrote {} URLs ({} bytes) to {}",
        urls.len(),
        xml.len(),
        output_path.display()
    );

    Ok(())
}
