//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the crawler's user agent
//! - GET requests returning status and body
//! - Classifying transport errors and non-success statuses
//!
//! There is no retry: every failure abandons the URL that produced it.

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::Client;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Retrieves documents for the crawler
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, reporting the status and body or the failure
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// No request timeout is set: a hung server stalls only the task that
/// requested it.
///
/// # Example
///
/// ```no_run
/// use sitemapper::config::UserAgentConfig;
/// use sitemapper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from the user agent configuration
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success with body |
/// | Any other status | HttpError |
/// | Timeout / connect / body error | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
