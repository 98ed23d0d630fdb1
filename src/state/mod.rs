//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the seen set, discovery counter, link budget and stop flag
//! - `Admission`: the result of offering a URL to the crawl state

mod crawl_state;

pub use crawl_state::{Admission, CrawlState};
