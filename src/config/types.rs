use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for EO-Archive
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub browser: BrowserConfig,
    pub scraper: ScraperConfig,
}

/// Storage location configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the SQLite database (created if missing)
    #[serde(rename = "database-dir")]
    pub database_dir: PathBuf,

    /// Database file name within the directory
    #[serde(rename = "database-file", default = "default_database_file")]
    pub database_file: String,
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Persistent browser profile directory
    #[serde(rename = "profile-dir")]
    pub profile_dir: PathBuf,

    /// Run the browser with a visible window (debugging)
    #[serde(default)]
    pub visible: bool,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Root URL of the paginated executive order listing
    #[serde(rename = "listing-url", default = "default_listing_url")]
    pub listing_url: String,

    /// Insert randomized delays between requests to avoid rate limiting
    #[serde(rename = "safety-delays", default)]
    pub safety_delays: bool,

    /// Bound on each navigation and readiness wait, in milliseconds
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,
}

impl StorageConfig {
    /// Full path to the database file
    pub fn database_path(&self) -> PathBuf {
        self.database_dir.join(&self.database_file)
    }
}

fn default_database_file() -> String {
    "storage.db".to_string()
}

fn default_listing_url() -> String {
    "https://www.whitehouse.gov/presidential-actions/executive-orders/".to_string()
}

fn default_navigation_timeout() -> u64 {
    10_000
}
