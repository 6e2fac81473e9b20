//! Listing page parsing
//!
//! Helpers for reading one page of the paginated order index: resolving the
//! total page count from the pagination control and collecting candidate
//! document links from the listing's item container.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Selector whose readiness marks a loaded listing page
pub const LISTING_READY_SELECTOR: &str = "div.wp-block-query";

/// The ordered set of document URLs discovered so far in one run
///
/// Membership is checked before any fetch so a URL is never visited twice
/// within a run; cross-run duplicates are caught by the record store.
#[derive(Debug, Default)]
pub struct LinkSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl LinkSet {
    /// Adds a URL; returns false if it was already present
    pub fn insert(&mut self, url: &str) -> bool {
        if self.seen.insert(url.to_string()) {
            self.order.push(url.to_string());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// URLs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Resolves the total page count from the first listing page
///
/// Reads the last numbered link of the pagination control. Returns None when
/// the control is missing or empty (single-page listing).
pub fn resolve_total_pages(html: &str) -> Option<u32> {
    let document = Html::parse_document(html);
    let pagination_selector = Selector::parse("div.wp-block-query-pagination-numbers").ok()?;
    let number_selector = Selector::parse("a.page-numbers").ok()?;

    let control = document.select(&pagination_selector).next()?;
    let final_page = control.select(&number_selector).last()?;

    final_page.text().collect::<String>().trim().parse().ok()
}

/// Collects new document links from a listing page
///
/// Anchors are read from the list items of the query container. A link
/// survives when it is not one of the `excluded` URLs (exact string match
/// against the listing root and the generic category URL) and has not been
/// seen before in this run. Survivors are appended to `links` and returned
/// as this page's batch, in document order.
pub fn extract_document_links(
    html: &str,
    excluded: &[&str],
    links: &mut LinkSet,
) -> Vec<String> {
    let document = Html::parse_document(html);

    let item_selector = match Selector::parse("div.wp-block-query li a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Bad listing item selector: {e:?}");
            return Vec::new();
        }
    };

    let mut batch = Vec::new();
    for element in document.select(&item_selector) {
        let href = match element.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if excluded.contains(&href) {
            continue;
        }
        if links.insert(href) {
            batch.push(href.to_string());
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://www.whitehouse.gov/presidential-actions/executive-orders/";
    const CATEGORY: &str = "https://www.whitehouse.gov/presidential-actions/";

    fn listing_page(links: &[&str], last_page: Option<u32>) -> String {
        let items: String = links
            .iter()
            .map(|href| format!(r#"<li><a href="{href}">An order</a></li>"#))
            .collect();

        let pagination = match last_page {
            Some(n) => format!(
                r#"<div class="wp-block-query-pagination-numbers">
                    <a class="page-numbers" href="?page=1">1</a>
                    <a class="page-numbers" href="?page={n}">{n}</a>
                </div>"#
            ),
            None => String::new(),
        };

        format!(
            r#"<html><body>
                <div class="wp-block-query is-layout-flow wp-block-query-is-layout-flow">
                    <ul>{items}</ul>
                </div>
                {pagination}
            </body></html>"#
        )
    }

    #[test]
    fn test_resolve_total_pages() {
        let html = listing_page(&[], Some(17));
        assert_eq!(resolve_total_pages(&html), Some(17));
    }

    #[test]
    fn test_missing_pagination_control() {
        let html = listing_page(&[], None);
        assert_eq!(resolve_total_pages(&html), None);
    }

    #[test]
    fn test_empty_pagination_control() {
        let html = r#"<html><body>
            <div class="wp-block-query-pagination-numbers"></div>
        </body></html>"#;
        assert_eq!(resolve_total_pages(html), None);
    }

    #[test]
    fn test_extracts_links_in_document_order() {
        let html = listing_page(&["https://example.com/eo/a/", "https://example.com/eo/b/"], None);
        let mut links = LinkSet::default();

        let batch = extract_document_links(&html, &[ROOT, CATEGORY], &mut links);

        assert_eq!(
            batch,
            vec![
                "https://example.com/eo/a/".to_string(),
                "https://example.com/eo/b/".to_string()
            ]
        );
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_excludes_root_and_category_urls() {
        let html = listing_page(&[ROOT, CATEGORY, "https://example.com/eo/a/"], None);
        let mut links = LinkSet::default();

        let batch = extract_document_links(&html, &[ROOT, CATEGORY], &mut links);

        assert_eq!(batch, vec!["https://example.com/eo/a/".to_string()]);
    }

    #[test]
    fn test_skips_links_already_in_set() {
        let mut links = LinkSet::default();
        links.insert("https://example.com/eo/a/");

        let html = listing_page(&["https://example.com/eo/a/", "https://example.com/eo/b/"], None);
        let batch = extract_document_links(&html, &[ROOT, CATEGORY], &mut links);

        assert_eq!(batch, vec!["https://example.com/eo/b/".to_string()]);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_duplicate_within_page_collected_once() {
        let html = listing_page(
            &["https://example.com/eo/a/", "https://example.com/eo/a/"],
            None,
        );
        let mut links = LinkSet::default();

        let batch = extract_document_links(&html, &[ROOT, CATEGORY], &mut links);

        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_link_set_preserves_discovery_order() {
        let mut links = LinkSet::default();
        links.insert("b");
        links.insert("a");
        links.insert("b");

        let order: Vec<&str> = links.iter().collect();
        assert_eq!(order, vec!["b", "a"]);
        assert!(links.contains("a"));
        assert!(!links.contains("c"));
    }
}
