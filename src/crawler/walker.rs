//! Listing walker - the resilient crawl-and-persist loop
//!
//! The walker paginates the target listing, rotating egress before every
//! page fetch, deduplicating profile references within the run, and pushing
//! each enriched profile through the persistence gateway as soon as it is
//! seen. No failure short of process death stops the walk; the worst cases
//! are a skipped page or a pause for the operator.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::parser::extract_profile_refs;
use crate::crawler::profile::{extract_profile, UserProfile};
use crate::egress::{EgressControl, Rotator};
use crate::intervention::InterventionGate;
use crate::storage::{Gateway, UserStore};
use crate::url::{page_url, profile_segments};
use reqwest::Client;
use std::collections::HashSet;
use tokio::time::sleep;
use url::Url;

/// In-memory scope of one crawl run
///
/// Bounds deduplication to the run and accumulates the report returned to
/// the caller. Storage has already seen every entry by the time the run
/// ends, so the report is never a second source of truth.
#[derive(Debug, Default)]
pub struct CrawlSession {
    seen: HashSet<String>,
    collected: Vec<UserProfile>,
}

impl CrawlSession {
    /// Marks a user id as processed, returning false if it already was
    fn mark_seen(&mut self, user_id: &str) -> bool {
        self.seen.insert(user_id.to_string())
    }
}

/// Walks the paginated listing, driving extraction and persistence
pub struct Walker<S, E, G>
where
    S: UserStore,
    E: EgressControl,
    G: InterventionGate,
{
    client: Client,
    base_url: Url,
    origin: String,
    crawl: CrawlConfig,
    vpn_retries: u32,
    rotator: Rotator<E>,
    gateway: Gateway<S>,
    gate: G,
    session: CrawlSession,
}

impl<S, E, G> Walker<S, E, G>
where
    S: UserStore,
    E: EgressControl,
    G: InterventionGate,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client: Client,
        base_url: Url,
        origin: String,
        crawl: CrawlConfig,
        vpn_retries: u32,
        rotator: Rotator<E>,
        gateway: Gateway<S>,
        gate: G,
    ) -> Self {
        Self {
            client,
            base_url,
            origin,
            crawl,
            vpn_retries,
            rotator,
            gateway,
            gate,
            session: CrawlSession::default(),
        }
    }

    /// Walks every configured page and returns the run's collection
    ///
    /// Infallible: page-level failures are recovered or skipped, never
    /// raised.
    pub async fn walk(mut self) -> Vec<UserProfile> {
        let end_page = self.crawl.start_page.saturating_add(self.crawl.max_pages);
        let mut page = self.crawl.start_page;
        let mut rate_limit_hits = 0u32;

        while page < end_page {
            self.ensure_egress().await;

            let url = page_url(&self.base_url, page);
            tracing::info!(page, url = %url, "Scraping listing page");

            match fetch_page(&self.client, url.as_str()).await {
                FetchOutcome::Success { body, .. } => {
                    self.process_listing(&body).await;
                    rate_limit_hits = 0;
                    page += 1;
                }

                FetchOutcome::RateLimited { retry_after } => {
                    rate_limit_hits += 1;
                    if rate_limit_hits > self.crawl.max_rate_limit_retries {
                        tracing::error!(page, "Rate limit retries exhausted, skipping page");
                        rate_limit_hits = 0;
                        page += 1;
                    } else {
                        tracing::warn!(
                            page,
                            wait_secs = retry_after.as_secs(),
                            "Rate limited, waiting before retrying page"
                        );
                        sleep(retry_after).await;
                        // same page index is fetched again
                    }
                }

                FetchOutcome::HttpError { status_code } => {
                    // This page's data is lost for the run
                    tracing::error!(page, status_code, "Failed to fetch listing page");
                    rate_limit_hits = 0;
                    page += 1;
                }

                FetchOutcome::NetworkError { error } => {
                    tracing::error!(page, %error, "Network error while fetching listing page");
                    rate_limit_hits = 0;
                    page += 1;
                }
            }
        }

        tracing::info!(
            total = self.session.collected.len(),
            "Total user data collected"
        );
        self.session.collected
    }

    /// Rotates egress before a page fetch
    ///
    /// When the rotation budget runs out the walk does not fail: it parks on
    /// the intervention gate, and once the operator resumes it the budget is
    /// considered reset and the fetch proceeds over whatever egress exists.
    async fn ensure_egress(&self) {
        if !self.rotator.rotate(self.vpn_retries).await {
            tracing::error!("Maximum VPN retries reached, pausing for manual intervention");
            self.gate
                .wait_for_operator("VPN rotation failed; resolve connectivity to resume the crawl")
                .await;
        }
    }

    /// Processes every candidate profile reference on one listing page
    async fn process_listing(&mut self, body: &str) {
        let refs = extract_profile_refs(body, &self.origin);
        let mut processed = 0usize;

        for reference in refs {
            let parsed = match Url::parse(&reference) {
                Ok(url) => url,
                Err(_) => continue,
            };

            let user_id = match profile_segments(&parsed) {
                Some((user_id, _)) => user_id,
                None => continue,
            };

            if !self.session.mark_seen(&user_id) {
                continue;
            }

            if let Some(profile) = extract_profile(&self.client, &reference, &self.origin).await {
                self.gateway
                    .upsert(
                        &profile.user_id,
                        &profile.username,
                        profile.homepage_url.as_deref(),
                    )
                    .await;
                self.session.collected.push(profile);
            }
            processed += 1;
        }

        tracing::info!(processed, "Links processed on page");
    }
}
