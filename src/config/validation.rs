use crate::config::types::{Config, CrawlConfig, DbConfig, VpnConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_vpn_config(&config.vpn)?;
    validate_db_config(&config.database)?;
    Ok(())
}

/// Validates listing crawl parameters
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    // max_pages >= 0 is always true for u32, so no check needed

    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    if config.max_rate_limit_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-rate-limit-retries must be >= 1, got {}",
            config.max_rate_limit_retries
        )));
    }

    Ok(())
}

/// Validates VPN rotation settings
fn validate_vpn_config(config: &VpnConfig) -> Result<(), ConfigError> {
    if config.command.is_empty() {
        return Err(ConfigError::Validation(
            "vpn command cannot be empty".to_string(),
        ));
    }

    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "vpn retries must be >= 1, got {}",
            config.retries
        )));
    }

    if config.servers.is_empty() {
        return Err(ConfigError::Validation(
            "vpn servers cannot be empty".to_string(),
        ));
    }

    for server in &config.servers {
        if server.is_empty() {
            return Err(ConfigError::Validation(
                "vpn server names cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates database connection settings
///
/// The password may legitimately be empty for local development servers.
fn validate_db_config(config: &DbConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation(
            "database host cannot be empty".to_string(),
        ));
    }

    if config.user.is_empty() {
        return Err(ConfigError::Validation(
            "database user cannot be empty".to_string(),
        ));
    }

    if config.database.is_empty() {
        return Err(ConfigError::Validation(
            "database name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawl: CrawlConfig {
                base_url: "https://example.com/users?tab=reputation".to_string(),
                start_page: 1,
                max_pages: 10,
                max_rate_limit_retries: 5,
            },
            vpn: VpnConfig {
                command: "nordvpn".to_string(),
                retries: 10,
                servers: vec!["Europe".to_string(), "Germany".to_string()],
            },
            database: DbConfig {
                host: "localhost".to_string(),
                user: "crawler".to_string(),
                password: "secret".to_string(),
                database: "profiles".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_allowed() {
        let mut config = valid_config();
        config.crawl.max_pages = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = valid_config();
        config.crawl.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_hostless_base_url_rejected() {
        let mut config = valid_config();
        config.crawl.base_url = "data:text/plain,hello".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_rate_limit_retries_rejected() {
        let mut config = valid_config();
        config.crawl.max_rate_limit_retries = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_vpn_retries_rejected() {
        let mut config = valid_config();
        config.vpn.retries = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_server_pool_rejected() {
        let mut config = valid_config();
        config.vpn.servers.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_server_name_rejected() {
        let mut config = valid_config();
        config.vpn.servers.push(String::new());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_db_host_rejected() {
        let mut config = valid_config();
        config.database.host = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_db_password_allowed() {
        let mut config = valid_config();
        config.database.password = String::new();
        assert!(validate(&config).is_ok());
    }
}
