use crate::config::types::{BrowserConfig, Config, ScraperConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_browser_config(&config.browser)?;
    validate_scraper_config(&config.scraper)?;
    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "database-dir cannot be empty".to_string(),
        ));
    }

    if config.database_file.is_empty() {
        return Err(ConfigError::Validation(
            "database-file cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.profile_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "profile-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.listing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "listing-url must use an HTTP(S) scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.navigation_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "navigation-timeout-ms must be >= 1000ms, got {}ms",
            config.navigation_timeout_ms
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            storage: StorageConfig {
                database_dir: PathBuf::from("./data"),
                database_file: "storage.db".to_string(),
            },
            browser: BrowserConfig {
                profile_dir: PathBuf::from("./tmp/browser_profile"),
                visible: false,
            },
            scraper: ScraperConfig {
                listing_url: "https://www.whitehouse.gov/presidential-actions/executive-orders/"
                    .to_string(),
                safety_delays: false,
                navigation_timeout_ms: 10_000,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_database_dir_rejected() {
        let mut config = valid_config();
        config.storage.database_dir = PathBuf::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_listing_url_rejected() {
        let mut config = valid_config();
        config.scraper.listing_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.scraper.listing_url = "ftp://example.com/listing".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_tiny_timeout_rejected() {
        let mut config = valid_config();
        config.scraper.navigation_timeout_ms = 50;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
