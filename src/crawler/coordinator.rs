//! Run orchestration - wires configuration into one bounded crawl
//!
//! The coordinator owns nothing clever: it derives the site origin, builds
//! the shared HTTP client, makes one best-effort initial egress connection,
//! and hands everything to the walker for a single end-to-end pass.

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::profile::UserProfile;
use crate::crawler::walker::Walker;
use crate::egress::{EgressControl, Rotator, VpnCli};
use crate::intervention::{ConsoleGate, InterventionGate};
use crate::storage::{Gateway, MySqlUserStore, UserStore};
use crate::url::site_origin;
use crate::ScoutError;
use reqwest::Client;
use url::Url;

/// Top-level orchestrator for a single crawl run
pub struct Coordinator<S, E, G>
where
    S: UserStore,
    E: EgressControl,
    G: InterventionGate,
{
    config: Config,
    base_url: Url,
    origin: String,
    client: Client,
    rotator: Rotator<E>,
    gateway: Gateway<S>,
    gate: G,
}

impl<S, E, G> Coordinator<S, E, G>
where
    S: UserStore,
    E: EgressControl,
    G: InterventionGate,
{
    /// Creates a coordinator from validated configuration and collaborators
    pub fn new(config: Config, store: S, control: E, gate: G) -> Result<Self, ScoutError> {
        let base_url = Url::parse(&config.crawl.base_url)?;
        let origin = site_origin(&base_url)?;
        let client = build_http_client()?;
        let rotator = Rotator::new(control, config.vpn.servers.clone());
        let gateway = Gateway::new(store);

        Ok(Self {
            config,
            base_url,
            origin,
            client,
            rotator,
            gateway,
            gate,
        })
    }

    /// Runs the crawl once and returns everything collected
    pub async fn run(self) -> Vec<UserProfile> {
        tracing::info!(
            base_url = %self.base_url,
            start_page = self.config.crawl.start_page,
            max_pages = self.config.crawl.max_pages,
            "Starting crawl run"
        );

        // Best-effort startup connection; per-page rotation covers failures
        self.rotator.connect_initial().await;

        let walker = Walker::new(
            self.client,
            self.base_url,
            self.origin,
            self.config.crawl.clone(),
            self.config.vpn.retries,
            self.rotator,
            self.gateway,
            self.gate,
        );

        let collected = walker.walk().await;
        tracing::info!(total = collected.len(), "Crawl run finished");
        collected
    }
}

/// Runs a crawl with the production collaborators
///
/// Connects to MySQL, shells egress changes out to the configured VPN
/// client, and parks on the operator console when rotation is exhausted.
pub async fn run_crawl(config: Config) -> Result<Vec<UserProfile>, ScoutError> {
    let store = MySqlUserStore::connect(&config.database).await?;
    let control = VpnCli::new(config.vpn.command.clone());
    let coordinator = Coordinator::new(config, store, control, ConsoleGate)?;
    Ok(coordinator.run().await)
}
