use serde::Deserialize;

/// Main configuration structure for Profile-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub vpn: VpnConfig,
    pub database: DbConfig,
}

/// Listing crawl parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Listing URL the page-number query parameter is appended to
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First page index to fetch
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Number of listing pages to walk
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Upper bound on same-page retries after HTTP 429
    #[serde(
        rename = "max-rate-limit-retries",
        default = "default_rate_limit_retries"
    )]
    pub max_rate_limit_retries: u32,
}

fn default_rate_limit_retries() -> u32 {
    5
}

/// VPN egress rotation settings
#[derive(Debug, Clone, Deserialize)]
pub struct VpnConfig {
    /// VPN client binary to shell out to
    #[serde(default = "default_vpn_command")]
    pub command: String,

    /// Rotation attempts allowed before each listing page
    pub retries: u32,

    /// Server pool to pick from
    pub servers: Vec<String>,
}

fn default_vpn_command() -> String {
    "nordvpn".to_string()
}

/// MySQL connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}
