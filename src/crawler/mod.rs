//! Crawler module - listing walk, profile extraction, orchestration
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with rate-limit classification
//! - HTML extraction of profile references and homepage links
//! - The resilient page-by-page walk with session deduplication
//! - Overall run orchestration

mod coordinator;
mod fetcher;
mod parser;
mod profile;
mod walker;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, DEFAULT_RETRY_AFTER};
pub use parser::{extract_homepage_link, extract_profile_refs};
pub use profile::{extract_profile, UserProfile};
pub use walker::{CrawlSession, Walker};
