use serde::Deserialize;

/// Main configuration structure for Sitemapper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URL the crawl starts from
    #[serde(rename = "target-url", default)]
    pub target_url: Option<String>,

    /// Prefix a discovered link must start with to be followed.
    /// Falls back to the target URL when unset.
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,

    /// Maximum number of distinct URLs admitted into the sitemap
    #[serde(rename = "max-links", default = "default_max_links")]
    pub max_links: usize,

    /// Maximum number of fetches in flight (0 means unbounded)
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl CrawlerConfig {
    /// Returns the effective same-origin prefix
    pub fn base_origin(&self) -> Option<&str> {
        self.base_url.as_deref().or(self.target_url.as_deref())
    }

    /// Returns the concurrency bound, `None` when fan-out is unbounded
    pub fn concurrency_limit(&self) -> Option<usize> {
        match self.max_concurrency {
            0 => None,
            n => Some(n),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            target_url: None,
            base_url: None,
            max_links: default_max_links(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the sitemap XML is written to
    #[serde(rename = "sitemap-path", default = "default_sitemap_path")]
    pub sitemap_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sitemap_path: default_sitemap_path(),
        }
    }
}

fn default_max_links() -> usize {
    100
}

fn default_max_concurrency() -> usize {
    16
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_sitemap_path() -> String {
    "./sitemap.xml".to_string()
}
