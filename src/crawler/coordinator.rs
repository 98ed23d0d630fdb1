//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that:
//! - Admits the seed URL and dispatches the first task
//! - Feeds admitted URLs from the frontier to a bounded set of tasks
//! - Waits for every dispatched task before declaring the crawl done
//! - Exports the seen set and writes the sitemap
//!
//! # Budget semantics
//!
//! Admission is decided inside one critical section on [`CrawlState`], so the
//! seen set never grows past the link budget. Stopping is soft: once the
//! budget is used up no new task is started, but fetches already in flight run
//! to completion and their links are only checked against the set. Queued
//! tasks that start after the stop return without fetching.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchResult, Fetcher, HttpFetcher};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::scheduler::Scheduler;
use crate::output::write_sitemap;
use crate::state::CrawlState;
use crate::{ConfigError, SitemapperError};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Counters describing a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Distinct URLs admitted into the sitemap
    pub urls_discovered: usize,

    /// Pages fetched and scanned for links
    pub pages_fetched: usize,

    /// Pages abandoned after a fetch or parse failure
    pub pages_failed: usize,

    /// Tasks that returned without fetching because the budget was used up
    pub pages_skipped: usize,

    /// Whether the link budget stopped the crawl
    pub stopped_early: bool,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// What a single task did with its URL
#[derive(Debug)]
enum TaskOutcome {
    Fetched { discovered: Vec<String> },
    Failed,
    Skipped,
}

/// Shared handles a task needs; cloned into every spawned task
#[derive(Clone)]
struct Worker {
    state: Arc<Mutex<CrawlState>>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Worker {
    fn lock_state(&self) -> MutexGuard<'_, CrawlState> {
        lock(&self.state)
    }

    /// Fetches one URL and admits the same-origin links it contains
    ///
    /// Returns the URLs admitted by this task, in discovery order.
    async fn process_one(self, url: String) -> TaskOutcome {
        let exhausted = self.lock_state().is_exhausted();
        if exhausted {
            tracing::trace!("Budget exhausted, skipping {}", url);
            return TaskOutcome::Skipped;
        }

        let body = match self.fetcher.fetch(&url).await {
            FetchResult::Success { status_code, body } => {
                tracing::debug!("Fetched {} ({}, {} bytes)", url, status_code, body.len());
                body
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Non-success status {} for {}", status_code, url);
                return TaskOutcome::Failed;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                return TaskOutcome::Failed;
            }
        };

        let hrefs = match self.extractor.extract_hrefs(&body) {
            Ok(hrefs) => hrefs,
            Err(e) => {
                tracing::warn!("Failed to parse HTML for {}: {}", url, e);
                return TaskOutcome::Failed;
            }
        };

        let mut discovered = Vec::new();
        let mut state = self.lock_state();
        for href in hrefs {
            if state.admit(&href).should_dispatch() {
                tracing::debug!("Link found: {}", href);
                discovered.push(href);
            }
        }

        TaskOutcome::Fetched { discovered }
    }
}

/// Concurrent same-origin crawler
pub struct Crawler {
    state: Arc<Mutex<CrawlState>>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    max_concurrency: Option<usize>,
}

impl Crawler {
    /// Creates a crawler with the given collaborators
    ///
    /// The base origin, link budget and concurrency bound come from `config`.
    pub fn new(
        config: &CrawlerConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Result<Self, SitemapperError> {
        let base_origin = config.base_origin().ok_or(ConfigError::MissingTarget)?;

        Ok(Self {
            state: Arc::new(Mutex::new(CrawlState::new(base_origin, config.max_links))),
            fetcher,
            extractor,
            max_concurrency: config.concurrency_limit(),
        })
    }

    /// Creates a crawler that fetches over HTTP and extracts anchor hrefs
    pub fn from_config(config: &Config) -> Result<Self, SitemapperError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent)?;
        let extractor = HtmlLinkExtractor::new()?;
        Self::new(&config.crawler, Arc::new(fetcher), Arc::new(extractor))
    }

    fn lock_state(&self) -> MutexGuard<'_, CrawlState> {
        lock(&self.state)
    }

    fn worker(&self) -> Worker {
        Worker {
            state: Arc::clone(&self.state),
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
        }
    }

    /// Crawls from `seed_url` until no work remains
    ///
    /// The seed is admitted first and counts toward the budget. The returned
    /// future completes only after every dispatched task has finished.
    pub async fn start(&self, seed_url: &str) -> Result<CrawlSummary, SitemapperError> {
        if seed_url.is_empty() {
            return Err(SitemapperError::EmptySeed);
        }

        let started = Instant::now();
        let mut scheduler = Scheduler::new(self.max_concurrency);

        {
            let mut state = self.lock_state();
            tracing::info!(
                "Starting crawl of {} (base {}, budget {})",
                seed_url,
                state.base_origin(),
                state.link_budget()
            );
            if state.admit_seed(seed_url).should_dispatch() {
                scheduler.add_to_frontier(seed_url.to_string());
            }
        }

        let worker = self.worker();
        let mut tasks = JoinSet::new();
        let mut summary = CrawlSummary::default();
        let mut completed = 0usize;

        loop {
            while let Some(url) = scheduler.next_url() {
                tasks.spawn(worker.clone().process_one(url));
            }

            let joined = match tasks.join_next().await {
                Some(joined) => joined,
                None => break,
            };
            scheduler.task_finished();
            completed += 1;

            match joined {
                Ok(TaskOutcome::Fetched { discovered }) => {
                    summary.pages_fetched += 1;
                    for url in discovered {
                        scheduler.add_to_frontier(url);
                    }
                }
                Ok(TaskOutcome::Failed) => summary.pages_failed += 1,
                Ok(TaskOutcome::Skipped) => summary.pages_skipped += 1,
                Err(e) => {
                    tracing::error!("Crawl task aborted: {}", e);
                    summary.pages_failed += 1;
                }
            }

            if completed % 10 == 0 {
                let elapsed = started.elapsed();
                tracing::info!(
                    "Progress: {} pages done, {} in frontier, {} in flight, {:.2} pages/sec",
                    completed,
                    scheduler.frontier_size(),
                    scheduler.in_flight(),
                    completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
                );
            }
        }

        debug_assert!(scheduler.is_drained());

        {
            let state = self.lock_state();
            summary.urls_discovered = state.discovered_count();
            summary.stopped_early = state.is_stopped();
        }
        summary.elapsed = started.elapsed();

        tracing::info!(
            "Crawl completed: {} URLs discovered, {} fetched, {} failed in {:?}",
            summary.urls_discovered,
            summary.pages_fetched,
            summary.pages_failed,
            summary.elapsed
        );

        Ok(summary)
    }

    /// Returns every URL in the seen set, sorted
    ///
    /// Meant to be called after [`Crawler::start`] has returned, when no task
    /// can change the set any more.
    pub fn export(&self) -> Vec<String> {
        self.lock_state().export()
    }

    pub fn discovered_count(&self) -> usize {
        self.lock_state().discovered_count()
    }

    pub fn is_stopped(&self) -> bool {
        self.lock_state().is_stopped()
    }
}

fn lock(state: &Mutex<CrawlState>) -> MutexGuard<'_, CrawlState> {
    // Every mutation completes inside one `CrawlState` call, so a poisoned
    // lock still guards a consistent state.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs a complete crawl operation
///
/// 1. Build the HTTP fetcher and link extractor
/// 2. Crawl from the target URL until drained
/// 3. Export the seen set
/// 4. Write the sitemap (a failure here is fatal)
///
/// # Example
///
/// ```no_run
/// use sitemapper::config::{resolve_config, ConfigOverrides};
/// use sitemapper::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let overrides = ConfigOverrides {
///     target_url: Some("https://example.com/".to_string()),
///     ..Default::default()
/// };
/// let config = resolve_config(None, overrides)?;
/// run_crawl(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, SitemapperError> {
    let seed_url = config
        .crawler
        .target_url
        .clone()
        .ok_or(ConfigError::MissingTarget)?;

    let crawler = Crawler::from_config(&config)?;
    let summary = crawler.start(&seed_url).await?;

    let urls = crawler.export();
    let sitemap_path = Path::new(&config.output.sitemap_path);
    write_sitemap(&urls, sitemap_path)?;

    tracing::info!("Wrote {} URLs to {}", urls.len(), sitemap_path.display());

    Ok(summary)
}
