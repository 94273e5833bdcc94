//! URL helpers for listing pages and profile references
//!
//! Listing pages link to profiles with relative or absolute hrefs; the
//! helpers here resolve them against the site origin and carve the stable
//! identity fields out of the path.

use crate::{UrlError, UrlResult};
use url::Url;

/// Path segment that marks a hyperlink as a profile reference
pub const PROFILE_PATH_MARKER: &str = "users";

/// Derives the site origin (scheme + host + port) from the listing URL
///
/// Relative profile references are resolved against this origin rather than
/// against the full listing URL, so `/users/123/alice` lands on the site
/// root no matter which listing page it was found on.
pub fn site_origin(base_url: &Url) -> UrlResult<String> {
    let host = base_url
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(base_url.to_string()))?;

    let origin = match base_url.port() {
        Some(port) => format!("{}://{}:{}", base_url.scheme(), host, port),
        None => format!("{}://{}", base_url.scheme(), host),
    };

    Ok(origin)
}

/// Resolves a profile reference to an absolute URL
///
/// Absolute references pass through untouched; relative ones are joined
/// against the site origin.
pub fn normalize_reference(reference: &str, origin: &str) -> UrlResult<Url> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Url::parse(reference)
            .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)));
    }

    let base =
        Url::parse(origin).map_err(|e| UrlError::Parse(format!("{}: {}", origin, e)))?;
    base.join(reference)
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))
}

/// Checks whether a URL's path contains the profile marker segment
pub fn is_profile_path(url: &Url) -> bool {
    url.path_segments()
        .map(|mut segments| segments.any(|s| s == PROFILE_PATH_MARKER))
        .unwrap_or(false)
}

/// Splits the last two path segments into `(user_id, username)`
///
/// A trailing slash is ignored. Returns `None` when the path carries fewer
/// than two non-empty segments, the only way identification can fail.
pub fn profile_segments(url: &Url) -> Option<(String, String)> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    if segments.len() < 2 {
        return None;
    }

    let user_id = segments[segments.len() - 2].to_string();
    let username = segments[segments.len() - 1].to_string();
    Some((user_id, username))
}

/// Appends the page-number query parameter to the listing URL
pub fn page_url(base_url: &Url, page: u32) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    url
}
