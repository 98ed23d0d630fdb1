//! HTML parser for extracting candidate links
//!
//! The crawler matches links against the base origin as plain strings, so
//! hrefs are returned exactly as written in the document: no resolution
//! against the page URL, no normalization.

use crate::SitemapperError;
use scraper::{Html, Selector};

/// Produces candidate hrefs from a fetched document
pub trait LinkExtractor: Send + Sync {
    /// Extracts every candidate href from `document`
    ///
    /// Called once per fetched page; the returned sequence is finite.
    fn extract_hrefs(&self, document: &str) -> Result<Vec<String>, SitemapperError>;
}

/// Extracts the `href` attribute of every `<a>` element
#[derive(Debug, Clone)]
pub struct HtmlLinkExtractor {
    selector: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Result<Self, SitemapperError> {
        let selector = Selector::parse("a[href]").map_err(|e| SitemapperError::HtmlParse {
            message: format!("invalid anchor selector: {:?}", e),
        })?;
        Ok(Self { selector })
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_hrefs(&self, document: &str) -> Result<Vec<String>, SitemapperError> {
        let html = Html::parse_document(document);

        let hrefs = html
            .select(&self.selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        Ok(hrefs)
    }
}
