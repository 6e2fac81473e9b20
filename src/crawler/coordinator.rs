//! Crawl coordination - the pagination walk
//!
//! The crawler owns the run's cursor state: it resolves the total page count
//! from the first listing page, walks pages sequentially, collects and
//! deduplicates document links, and drives the document extractor for each
//! new link. Failures are contained at the smallest useful granularity: a
//! listing page that fails to load is skipped, a document that fails to
//! extract becomes a sentinel record, and neither aborts the run.

use crate::config::ScraperConfig;
use crate::crawler::listing::{
    extract_document_links, resolve_total_pages, LinkSet, LISTING_READY_SELECTOR,
};
use crate::crawler::pace::Pace;
use crate::extract::extract_document;
use crate::fetch::FetchClient;
use crate::storage::{RecordStore, StoreOutcome};
use crate::ArchiveError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Totals reported at the end of a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Listing pages fetched successfully
    pub pages_visited: u32,
    /// Unique document links discovered across all pages
    pub links_discovered: usize,
    /// New records committed to the store
    pub records_inserted: u32,
    /// Drafts skipped because a record with the same url or title existed
    pub duplicates_skipped: u32,
    /// Documents that degraded to a sentinel record
    pub failures: u32,
    /// True when the run stopped early on operator interrupt
    pub interrupted: bool,
}

/// Walks the paginated listing and persists extracted records
pub struct Crawler<'a, F: FetchClient, S: RecordStore> {
    fetch: &'a F,
    store: &'a mut S,
    config: &'a ScraperConfig,
    pace: Pace,
    cancel: CancellationToken,
}

impl<'a, F: FetchClient, S: RecordStore> Crawler<'a, F, S> {
    /// Creates a crawler for one run
    ///
    /// # Arguments
    ///
    /// * `fetch` - The run's fetch client
    /// * `store` - Destination record store
    /// * `config` - Scraper configuration (listing root, delays, timeout)
    /// * `cancel` - Cancellation token checked at every suspension point
    pub fn new(
        fetch: &'a F,
        store: &'a mut S,
        config: &'a ScraperConfig,
        cancel: CancellationToken,
    ) -> Self {
        let pace = Pace::new(config.safety_delays);
        Self {
            fetch,
            store,
            config,
            pace,
            cancel,
        }
    }

    /// Runs the crawl to completion (or interruption)
    ///
    /// The cursor starts at page 1 with a provisional total of 1; the real
    /// total is resolved from the first page's pagination control and fixed
    /// for the remainder of the run. The loop terminates once the cursor
    /// passes the total, or earlier on cancellation. Already-committed
    /// records always survive an interrupted run.
    pub async fn run(&mut self) -> Result<CrawlReport, ArchiveError> {
        let root = normalized_root(&self.config.listing_url);
        // Parent of the listing root, e.g. the generic presidential-actions
        // category page; linked from every listing item but not a document.
        let category_url = Url::parse(&root)?.join("..")?.to_string();
        let timeout = Duration::from_millis(self.config.navigation_timeout_ms);

        let mut links = LinkSet::default();
        let mut report = CrawlReport::default();

        let mut current_page: u32 = 1;
        let mut total_pages: u32 = 1;
        let mut selected_url = root.clone();

        while current_page <= total_pages {
            if self.cancel.is_cancelled() {
                report.interrupted = true;
                break;
            }

            if current_page > 1 {
                self.pace.page_delay().await;
            }

            tracing::info!("Scraping page {} of {}", current_page, total_pages);

            let html = match self
                .fetch
                .navigate(&selected_url, LISTING_READY_SELECTOR, timeout)
                .await
            {
                Ok(html) => html,
                Err(e) => {
                    // Transient page failure: skip and continue
                    tracing::warn!("Skipping listing page {}: {}", current_page, e);
                    current_page += 1;
                    selected_url = page_url(&root, current_page);
                    continue;
                }
            };
            report.pages_visited += 1;

            if current_page == 1 {
                total_pages = resolve_total_pages(&html).unwrap_or(1);
                tracing::info!("Listing spans {} page(s)", total_pages);
            }

            let batch =
                extract_document_links(&html, &[root.as_str(), category_url.as_str()], &mut links);
            tracing::debug!("Found {} new link(s) on page {}", batch.len(), current_page);

            for url in &batch {
                if self.cancel.is_cancelled() {
                    report.interrupted = true;
                    break;
                }

                let extraction = extract_document(self.fetch, &self.pace, url, timeout).await;
                if extraction.is_failure() {
                    report.failures += 1;
                }

                match self.store.store_if_absent(&extraction.into_draft())? {
                    StoreOutcome::Inserted(id) => {
                        report.records_inserted += 1;
                        tracing::debug!("Stored record {} for {}", id, url);
                    }
                    StoreOutcome::SkippedDuplicate => {
                        report.duplicates_skipped += 1;
                        tracing::debug!("Record for {} already stored, skipping", url);
                    }
                }
            }

            if report.interrupted {
                break;
            }

            current_page += 1;
            selected_url = page_url(&root, current_page);
        }

        report.links_discovered = links.len();
        tracing::info!(
            "Crawl finished: {} page(s) visited, {} link(s) discovered, {} record(s) inserted, \
             {} duplicate(s) skipped, {} failure(s){}",
            report.pages_visited,
            report.links_discovered,
            report.records_inserted,
            report.duplicates_skipped,
            report.failures,
            if report.interrupted { " [interrupted]" } else { "" },
        );

        Ok(report)
    }
}

/// Listing URL for a given page of the index
fn page_url(root: &str, page: u32) -> String {
    format!("{root}page/{page}/")
}

fn normalized_root(listing_url: &str) -> String {
    if listing_url.ends_with('/') {
        listing_url.to_string()
    } else {
        format!("{listing_url}/")
    }
}
