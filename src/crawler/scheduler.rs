//! Scheduler for the crawl frontier
//!
//! Admitted URLs wait in a FIFO frontier until a worker slot is free. The
//! concurrency bound caps how many fetch tasks run at once; `None` lets every
//! queued URL start immediately.

use std::collections::VecDeque;

/// Frontier queue with a worker-slot limit
#[derive(Debug)]
pub struct Scheduler {
    /// URLs admitted but not yet dispatched
    frontier: VecDeque<String>,

    /// Maximum number of tasks in flight
    max_concurrency: Option<usize>,

    /// Tasks dispatched and not yet completed
    in_flight: usize,
}

impl Scheduler {
    /// Creates a scheduler with an empty frontier
    pub fn new(max_concurrency: Option<usize>) -> Self {
        Self {
            frontier: VecDeque::new(),
            max_concurrency: max_concurrency.map(|n| n.max(1)),
            in_flight: 0,
        }
    }

    /// Adds an admitted URL to the back of the frontier
    pub fn add_to_frontier(&mut self, url: String) {
        self.frontier.push_back(url);
    }

    /// Returns true if another task may start now
    pub fn has_capacity(&self) -> bool {
        match self.max_concurrency {
            Some(limit) => self.in_flight < limit,
            None => true,
        }
    }

    /// Takes the next URL to dispatch and counts it as in flight
    ///
    /// Returns `None` when the frontier is empty or every worker slot is
    /// taken.
    pub fn next_url(&mut self) -> Option<String> {
        if !self.has_capacity() {
            return None;
        }
        let url = self.frontier.pop_front()?;
        self.in_flight += 1;
        Some(url)
    }

    /// Releases the slot of a completed task
    pub fn task_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Returns true once no task is running and nothing is queued
    pub fn is_drained(&self) -> bool {
        self.in_flight == 0 && self.frontier.is_empty()
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
