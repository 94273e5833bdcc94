//! Profile page extraction

use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::parser::extract_homepage_link;
use crate::url::{normalize_reference, profile_segments};
use reqwest::Client;

/// One user's identity and optional homepage, as observed during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable identifier from the profile path
    pub user_id: String,

    /// Display name from the profile path
    pub username: String,

    /// Declared homepage link, absent when not published
    pub homepage_url: Option<String>,
}

/// Fetches a profile page and recovers the user's identity and homepage
///
/// Identity comes from the reference path alone, so it survives any fetch
/// or parse failure; only the homepage enrichment depends on the page body.
/// Returns `None` solely for references too short to carry an identity.
/// Failures are logged, never raised.
pub async fn extract_profile(
    client: &Client,
    reference: &str,
    origin: &str,
) -> Option<UserProfile> {
    let url = match normalize_reference(reference, origin) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(reference, error = %e, "Failed to normalize profile reference");
            return None;
        }
    };

    let (user_id, username) = match profile_segments(&url) {
        Some(identity) => identity,
        None => {
            tracing::error!(url = %url, "Profile reference has no identity segments");
            return None;
        }
    };

    tracing::info!(%user_id, %username, "Scraping profile");

    let homepage_url = match fetch_page(client, url.as_str()).await {
        FetchOutcome::Success { body, .. } => extract_homepage_link(&body),
        FetchOutcome::RateLimited { .. } => {
            tracing::warn!(url = %url, "Rate limited while scraping profile");
            None
        }
        FetchOutcome::HttpError { status_code } => {
            tracing::warn!(url = %url, status_code, "Failed to fetch profile page");
            None
        }
        FetchOutcome::NetworkError { error } => {
            tracing::error!(url = %url, %error, "Network error while scraping profile");
            None
        }
    };

    Some(UserProfile {
        user_id,
        username,
        homepage_url,
    })
}
