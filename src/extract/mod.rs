//! Document extraction
//!
//! Given the URL of a single executive order page, produce a structured
//! draft record (title, normalized date, body text) or a sentinel failure
//! draft. Extraction never propagates an error past its own boundary: a
//! fetch timeout, a missing element, or malformed markup all degrade to the
//! `"N/A"` sentinel with the source URL preserved, so the gap stays visible
//! and re-attemptable on a future run.

mod date;

pub use date::normalize_date;

use crate::crawler::Pace;
use crate::fetch::FetchClient;
use crate::storage::DraftRecord;
use scraper::{Html, Selector};
use std::time::Duration;

/// Selector for the order headline; also the readiness condition for the
/// document page
pub const HEADLINE_SELECTOR: &str = "h1.wp-block-whitehouse-topper__headline";

/// Result of extracting one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// All fields were read from the page
    Success(DraftRecord),
    /// The page could not be fetched or parsed; the url is preserved
    Failure { url: String, reason: String },
}

impl Extraction {
    /// Degrades this result to a storable draft
    ///
    /// A failure becomes the sentinel draft for its URL.
    pub fn into_draft(self) -> DraftRecord {
        match self {
            Extraction::Success(draft) => draft,
            Extraction::Failure { url, .. } => DraftRecord::sentinel(url),
        }
    }

    /// True when extraction failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Extraction::Failure { .. })
    }
}

/// Extracts a draft record from a single order page
///
/// Applies the optional per-document safety delay, fetches the page waiting
/// for its headline to become ready within `timeout`, and reads title, date,
/// and body paragraphs. Any failure yields `Extraction::Failure` rather than
/// an error.
///
/// # Arguments
///
/// * `fetch` - The fetch client for this run
/// * `pace` - Safety delay policy
/// * `url` - The document page URL
/// * `timeout` - Bound on navigation plus readiness wait
pub async fn extract_document<F: FetchClient>(
    fetch: &F,
    pace: &Pace,
    url: &str,
    timeout: Duration,
) -> Extraction {
    pace.document_delay().await;

    let html = match fetch.navigate(url, HEADLINE_SELECTOR, timeout).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Failed to fetch document {}: {}", url, e);
            return Extraction::Failure {
                url: url.to_string(),
                reason: e.to_string(),
            };
        }
    };

    match parse_document(&html) {
        Ok(fields) => {
            tracing::info!("Extracted '{}' ({}) from {}", fields.title, fields.date, url);
            Extraction::Success(DraftRecord {
                title: fields.title,
                date: fields.date,
                content: fields.content,
                url: url.to_string(),
            })
        }
        Err(reason) => {
            tracing::warn!("Failed to extract document {}: {}", url, reason);
            Extraction::Failure {
                url: url.to_string(),
                reason,
            }
        }
    }
}

#[derive(Debug)]
struct DocumentFields {
    title: String,
    date: String,
    content: String,
}

/// Reads headline, first time element, and body paragraphs from rendered
/// document markup
fn parse_document(html: &str) -> Result<DocumentFields, String> {
    let document = Html::parse_document(html);

    let headline_selector =
        Selector::parse(HEADLINE_SELECTOR).map_err(|e| format!("bad headline selector: {e:?}"))?;
    let time_selector = Selector::parse("time").map_err(|e| format!("bad time selector: {e:?}"))?;
    let paragraph_selector =
        Selector::parse("p").map_err(|e| format!("bad paragraph selector: {e:?}"))?;

    let title = document
        .select(&headline_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .ok_or_else(|| "headline element not found".to_string())?;

    let raw_date = document
        .select(&time_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .ok_or_else(|| "time element not found".to_string())?;

    let paragraphs: Vec<String> = document
        .select(&paragraph_selector)
        .map(|element| element.text().collect::<String>())
        .collect();

    Ok(DocumentFields {
        title,
        date: normalize_date(&raw_date),
        content: paragraphs.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_page() -> &'static str {
        r#"<html><body>
            <h1 class="wp-block-whitehouse-topper__headline">
                Securing Our Borders
            </h1>
            <time datetime="2025-01-20">January 20, 2025</time>
            <p>First paragraph.</p>
            <p>Second paragraph.</p>
        </body></html>"#
    }

    #[test]
    fn test_parse_full_document() {
        let fields = parse_document(order_page()).unwrap();
        assert_eq!(fields.title, "Securing Our Borders");
        assert_eq!(fields.date, "2025-01-20");
        assert_eq!(fields.content, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_missing_headline_is_error() {
        let html = r#"<html><body><time>January 20, 2025</time><p>Text</p></body></html>"#;
        let err = parse_document(html).unwrap_err();
        assert!(err.contains("headline"));
    }

    #[test]
    fn test_missing_time_is_error() {
        let html = r#"<html><body>
            <h1 class="wp-block-whitehouse-topper__headline">Title</h1>
            <p>Text</p>
        </body></html>"#;
        let err = parse_document(html).unwrap_err();
        assert!(err.contains("time"));
    }

    #[test]
    fn test_unparseable_date_kept_raw() {
        let html = r#"<html><body>
            <h1 class="wp-block-whitehouse-topper__headline">Title</h1>
            <time>Inauguration Day</time>
        </body></html>"#;
        let fields = parse_document(html).unwrap();
        assert_eq!(fields.date, "Inauguration Day");
    }

    #[test]
    fn test_no_paragraphs_yields_empty_content() {
        let html = r#"<html><body>
            <h1 class="wp-block-whitehouse-topper__headline">Title</h1>
            <time>January 20, 2025</time>
        </body></html>"#;
        let fields = parse_document(html).unwrap();
        assert_eq!(fields.content, "");
    }

    #[test]
    fn test_failure_degrades_to_sentinel() {
        let extraction = Extraction::Failure {
            url: "https://example.com/eo/1".to_string(),
            reason: "timeout".to_string(),
        };
        let draft = extraction.into_draft();
        assert!(draft.is_sentinel());
        assert_eq!(draft.url, "https://example.com/eo/1");
    }
}
