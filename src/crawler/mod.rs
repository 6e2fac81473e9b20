//! Crawler module for walking the paginated order listing
//!
//! This module contains the core crawl logic, including:
//! - Pagination discovery and the sequential page walk
//! - Listing link extraction and in-run deduplication
//! - Safety delay pacing between requests
//! - Driving the document extractor and the record store

mod coordinator;
mod listing;
mod pace;

pub use coordinator::{CrawlReport, Crawler};
pub use listing::{extract_document_links, resolve_total_pages, LinkSet, LISTING_READY_SELECTOR};
pub use pace::Pace;
