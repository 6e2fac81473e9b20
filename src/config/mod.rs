//! Configuration module for EO-Archive
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use eo_archive::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Listing root: {}", config.scraper.listing_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, ScraperConfig, StorageConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
