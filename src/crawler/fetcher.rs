//! HTTP fetcher for listing and profile pages
//!
//! Classifies every response into the outcomes the crawl loop actually
//! distinguishes: success, rate limiting with its retry hint, other HTTP
//! errors, and network failures. Nothing here retries; retry policy belongs
//! to the callers.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fallback wait when a 429 response carries no Retry-After header
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(10);

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its body
    Success { status_code: u16, body: String },

    /// HTTP 429 with the server's requested wait
    RateLimited { retry_after: Duration },

    /// Any other non-success status
    HttpError { status_code: u16 },

    /// Connection, timeout, or body-read failure
    NetworkError { error: String },
}

/// Builds the HTTP client shared by the whole run
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::NetworkError { error };
        }
    };

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return FetchOutcome::RateLimited {
            retry_after: retry_after_hint(response.headers()),
        };
    }

    if !status.is_success() {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchOutcome::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Reads the Retry-After header as whole seconds, falling back to the default
fn retry_after_hint(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}
