//! Headless Chromium fetch client
//!
//! Wraps a chromiumoxide browser with a persistent profile directory and the
//! launch arguments needed to scrape an anti-automation-hardened site. The
//! session is a scoped resource: acquired once per scrape run and released
//! unconditionally at run end via [`BrowserSession::close`].

use crate::config::BrowserConfig;
use crate::fetch::{FetchClient, FetchError};
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::network::{EnableParams, SetBlockedUrLsParams};
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Interval between readiness polls while waiting for a selector
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Sub-request URL patterns blocked on every page (tracking/analytics)
const TRACKER_PATTERNS: &[&str] = &["*analytics*", "*gtm*", "*google*"];

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// A live Chromium session shared by all fetches within one scrape run
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    blocked_patterns: Mutex<Vec<String>>,
}

impl BrowserSession {
    /// Launches a browser with the configured profile directory
    ///
    /// The profile directory is created if missing. Tracking sub-requests
    /// are blocked from the start.
    ///
    /// # Arguments
    ///
    /// * `config` - Browser configuration (profile dir, visibility)
    ///
    /// # Returns
    ///
    /// * `Ok(BrowserSession)` - Session ready for navigation
    /// * `Err(FetchError)` - Browser failed to launch
    pub async fn launch(config: &BrowserConfig) -> Result<Self, FetchError> {
        std::fs::create_dir_all(&config.profile_dir)
            .map_err(|e| FetchError::Browser(format!("profile dir: {}", e)))?;

        let mut launch_args: Vec<String> = [
            "--disable-blink-features=AutomationControlled",
            "--disable-dev-shm-usage",
            "--no-sandbox",
            "--disable-web-security",
            "--disable-features=IsolateOrigins,site-per-process",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        launch_args.push(format!("--user-agent={}", USER_AGENT));

        let mut builder = ChromeConfig::builder()
            .user_data_dir(&config.profile_dir)
            .window_size(1280, 800)
            .args(launch_args);

        if config.visible {
            builder = builder.with_head();
        }

        let chrome_config = builder.build().map_err(FetchError::Browser)?;

        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        // The handler stream must be driven for the browser to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        page.execute(EnableParams::default())
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        let session = Self {
            browser,
            page,
            handler_task,
            blocked_patterns: Mutex::new(Vec::new()),
        };

        for pattern in TRACKER_PATTERNS {
            session.block_requests(pattern).await?;
        }

        tracing::debug!("Browser session launched (visible: {})", config.visible);
        Ok(session)
    }

    /// Closes the page and browser, releasing the session
    ///
    /// Called unconditionally at run end, including on error paths, so no
    /// browser process outlives the run.
    pub async fn close(mut self) {
        if let Err(e) = self.page.clone().close().await {
            tracing::warn!("Failed to close browser page: {}", e);
        }
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Browser did not exit cleanly: {}", e);
        }
        self.handler_task.abort();
        tracing::debug!("Browser session closed");
    }

    async fn apply_blocked_patterns(&self, patterns: Vec<String>) -> Result<(), FetchError> {
        self.page
            .execute(SetBlockedUrLsParams::new(patterns))
            .await
            .map(|_| ())
            .map_err(|e| FetchError::Browser(e.to_string()))
    }
}

impl FetchClient for BrowserSession {
    async fn navigate(
        &self,
        url: &str,
        ready_selector: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let deadline = Instant::now() + timeout;

        tokio::time::timeout(timeout, self.page.goto(url))
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                timeout,
            })?
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        // Wait for the readiness selector within the remaining budget
        loop {
            if self.page.find_element(ready_selector).await.is_ok() {
                break;
            }
            if Instant::now() >= deadline {
                return Err(FetchError::ElementNotReady {
                    url: url.to_string(),
                    selector: ready_selector.to_string(),
                });
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }

        self.page
            .content()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))
    }

    async fn block_requests(&self, pattern: &str) -> Result<(), FetchError> {
        let patterns = {
            let mut blocked = self
                .blocked_patterns
                .lock()
                .map_err(|_| FetchError::Browser("blocked pattern lock poisoned".to_string()))?;
            blocked.push(pattern.to_string());
            blocked.clone()
        };
        self.apply_blocked_patterns(patterns).await
    }
}
