//! EO-Archive: a White House executive order scraper
//!
//! This crate crawls the paginated presidential-actions listing, extracts a
//! structured record from each executive order page, and persists the records
//! into a deduplicated SQLite store queryable by substring search.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetch;
pub mod storage;

use thiserror::Error;

/// Main error type for EO-Archive operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl interrupted by operator")]
    Interrupted,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for EO-Archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler};
pub use extract::{normalize_date, Extraction};
pub use fetch::{BrowserSession, FetchClient};
pub use storage::{DraftRecord, Record, RecordStore, SqliteStore, StoreOutcome};
