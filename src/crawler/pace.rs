//! Safety delay policy
//!
//! Randomized pauses between requests to reduce the chance of remote rate
//! limiting or bot detection. Disabled by default; the crawler consults this
//! before every listing page beyond the first and before every document
//! fetch.

use rand::Rng;
use std::time::Duration;

/// Inter-request delay policy for one scrape run
#[derive(Debug, Clone)]
pub struct Pace {
    enabled: bool,
}

impl Pace {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Pause taken before fetching a listing page beyond the first
    pub async fn page_delay(&self) {
        if !self.enabled {
            return;
        }
        let secs = rand::thread_rng().gen_range(2..=5);
        tracing::debug!("Safety delay: {}s before next listing page", secs);
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }

    /// Pause taken before fetching a document page
    pub async fn document_delay(&self) {
        if !self.enabled {
            return;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_disabled_pace_does_not_sleep() {
        let pace = Pace::new(false);
        let start = Instant::now();
        pace.page_delay().await;
        pace.document_delay().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
