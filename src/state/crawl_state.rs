//! Shared crawl state
//!
//! `CrawlState` is the only mutable resource shared between crawl tasks. The
//! crawler keeps it behind a single mutex and every admission decision goes
//! through [`CrawlState::admit`], so the membership check, the insert, the
//! counter and the stop flag always change together.

use std::collections::HashSet;

/// Outcome of offering a URL to the crawl state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The URL was new and has been recorded; a task should be dispatched
    Admitted,
    /// The URL was recorded earlier
    AlreadySeen,
    /// The URL does not start with the base origin
    OffOrigin,
    /// The link budget is used up; the URL was not recorded
    BudgetExhausted,
}

impl Admission {
    /// Returns true if the caller should dispatch a task for the URL
    pub fn should_dispatch(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Seen set, discovery counter, budget and stop flag of one crawl run
#[derive(Debug)]
pub struct CrawlState {
    base_origin: String,
    seen: HashSet<String>,
    discovered_count: usize,
    link_budget: usize,
    stopped: bool,
}

impl CrawlState {
    /// Creates an empty state for one crawl run
    pub fn new(base_origin: impl Into<String>, link_budget: usize) -> Self {
        Self {
            base_origin: base_origin.into(),
            seen: HashSet::new(),
            discovered_count: 0,
            link_budget,
            stopped: false,
        }
    }

    /// The prefix deciding same-site membership
    pub fn base_origin(&self) -> &str {
        &self.base_origin
    }

    pub fn link_budget(&self) -> usize {
        self.link_budget
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered_count
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Returns true if no further URL may be admitted
    pub fn is_exhausted(&self) -> bool {
        self.stopped || self.discovered_count >= self.link_budget
    }

    /// Plain string prefix match, no normalization
    pub fn is_same_origin(&self, href: &str) -> bool {
        href.starts_with(&self.base_origin)
    }

    /// Admits the seed URL
    ///
    /// The seed is exempt from the origin check but still counts toward the
    /// budget.
    pub fn admit_seed(&mut self, seed_url: &str) -> Admission {
        self.record(seed_url)
    }

    /// Offers a discovered href to the crawl
    ///
    /// Origin filter, membership check, budget check, insert, increment and
    /// stop transition happen in this one call; the caller holds the lock for
    /// its duration.
    pub fn admit(&mut self, href: &str) -> Admission {
        if !self.is_same_origin(href) {
            return Admission::OffOrigin;
        }
        self.record(href)
    }

    fn record(&mut self, url: &str) -> Admission {
        if self.seen.contains(url) {
            return Admission::AlreadySeen;
        }

        if self.discovered_count >= self.link_budget {
            self.stop();
            return Admission::BudgetExhausted;
        }

        self.seen.insert(url.to_string());
        self.discovered_count += 1;
        debug_assert_eq!(self.discovered_count, self.seen.len());

        if self.discovered_count >= self.link_budget {
            self.stop();
        }

        Admission::Admitted
    }

    /// Sets the stop flag; returns true only on the first transition
    pub fn stop(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        self.stopped = true;
        tracing::info!(
            "Link budget of {} reached, no new pages will be dispatched",
            self.link_budget
        );
        true
    }

    /// Snapshot of every recorded URL, sorted
    pub fn export(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.seen.iter().cloned().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    #[test]
    fn test_new_state_is_empty() {
        let state = CrawlState::new(BASE, 10);
        assert_eq!(state.discovered_count(), 0);
        assert!(!state.is_stopped());
        assert!(!state.is_exhausted());
        assert!(state.export().is_empty());
    }

    #[test]
    fn test_seed_counts_toward_budget() {
        let mut state = CrawlState::new(BASE, 10);
        assert_eq!(
            state.admit_seed("https://example.com/"),
            Admission::Admitted
        );
        assert_eq!(state.discovered_count(), 1);
        assert_eq!(state.export(), vec!["https://example.com/".to_string()]);
    }

    #[test]
    fn test_seed_outside_origin_is_admitted() {
        let mut state = CrawlState::new("https://example.com/docs/", 10);
        assert_eq!(
            state.admit_seed("https://example.com/"),
            Admission::Admitted
        );
        assert_eq!(
            state.admit("https://example.com/about"),
            Admission::OffOrigin
        );
    }

    #[test]
    fn test_duplicate_is_recorded_once() {
        let mut state = CrawlState::new(BASE, 10);
        assert_eq!(state.admit("https://example.com/a"), Admission::Admitted);
        assert_eq!(state.admit("https://example.com/a"), Admission::AlreadySeen);
        assert_eq!(state.discovered_count(), 1);
        assert_eq!(state.export(), vec!["https://example.com/a".to_string()]);
    }

    #[test]
    fn test_off_origin_is_not_recorded() {
        let mut state = CrawlState::new(BASE, 10);
        assert_eq!(state.admit("https://other.com/a"), Admission::OffOrigin);
        assert_eq!(state.admit("/relative"), Admission::OffOrigin);
        assert_eq!(state.discovered_count(), 0);
    }

    #[test]
    fn test_prefix_match_is_literal() {
        let state = CrawlState::new(BASE, 10);
        assert!(state.is_same_origin("https://example.com.evil.net/"));
        assert!(!state.is_same_origin("HTTPS://EXAMPLE.COM/"));
        assert!(!state.is_same_origin("http://example.com/"));
    }

    #[test]
    fn test_budget_stops_admission() {
        let mut state = CrawlState::new(BASE, 3);
        state.admit_seed("https://example.com/");
        assert_eq!(state.admit("https://example.com/1"), Admission::Admitted);
        assert!(!state.is_stopped());
        assert_eq!(state.admit("https://example.com/2"), Admission::Admitted);
        assert!(state.is_stopped());
        assert_eq!(
            state.admit("https://example.com/3"),
            Admission::BudgetExhausted
        );

        assert_eq!(state.discovered_count(), 3);
        assert_eq!(state.export().len(), 3);
        let exported = state.export();
        assert!(!exported.contains(&"https://example.com/3".to_string()));
    }

    #[test]
    fn test_known_url_after_stop_is_already_seen() {
        let mut state = CrawlState::new(BASE, 1);
        state.admit_seed("https://example.com/");
        assert_eq!(state.admit("https://example.com/"), Admission::AlreadySeen);
    }

    #[test]
    fn test_stop_transitions_once() {
        let mut state = CrawlState::new(BASE, 5);
        assert!(state.stop());
        assert!(!state.stop());
        assert!(state.is_stopped());
        assert!(state.is_exhausted());
    }

    #[test]
    fn test_count_matches_seen_len() {
        let mut state = CrawlState::new(BASE, 50);
        state.admit_seed("https://example.com/");
        for i in 0..30 {
            state.admit(&format!("https://example.com/{}", i % 20));
        }
        assert_eq!(state.discovered_count(), 21);
        assert_eq!(state.export().len(), state.discovered_count());
    }

    #[test]
    fn test_export_is_stable() {
        let mut state = CrawlState::new(BASE, 10);
        state.admit_seed("https://example.com/");
        state.admit("https://example.com/b");
        state.admit("https://example.com/a");

        let first = state.export();
        let second = state.export();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "https://example.com/".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_should_dispatch() {
        assert!(Admission::Admitted.should_dispatch());
        assert!(!Admission::AlreadySeen.should_dispatch());
        assert!(!Admission::OffOrigin.should_dispatch());
        assert!(!Admission::BudgetExhausted.should_dispatch());
    }
}
