//! Fetch client boundary
//!
//! The crawler never talks to the network directly; it goes through the
//! [`FetchClient`] trait, which captures the navigate / wait-for-readiness /
//! read-content contract of a rendering fetch engine. The production
//! implementation is a headless Chromium session ([`BrowserSession`]); tests
//! substitute a scripted double.

mod browser;

pub use browser::BrowserSession;

use std::time::Duration;
use thiserror::Error;

/// Errors produced by a fetch client
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Navigation timeout after {timeout:?} for {url}")]
    Timeout { url: String, timeout: Duration },

    #[error("Element '{selector}' never became ready on {url}")]
    ElementNotReady { url: String, selector: String },

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Contract for a rendering fetch engine
///
/// Implementations own a browsing session for the duration of a scrape run.
/// `navigate` resolves once the page has loaded and `ready_selector` matches
/// an element, both within the single `timeout` budget, and returns the fully
/// rendered markup as text.
#[allow(async_fn_in_trait)]
pub trait FetchClient {
    /// Navigates to `url` and returns the rendered markup once
    /// `ready_selector` is present
    async fn navigate(
        &self,
        url: &str,
        ready_selector: &str,
        timeout: Duration,
    ) -> Result<String, FetchError>;

    /// Suppresses sub-requests whose URL matches `pattern` (`*` wildcards)
    async fn block_requests(&self, pattern: &str) -> Result<(), FetchError>;
}
