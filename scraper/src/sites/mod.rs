//! Per-board scrapers.

use async_trait::async_trait;
use common::{JobRecord, ScrapeError, ScrapeRequest, Site};
use reqwest::Client;
use scraper::{ElementRef, Selector};
use tracing::debug;

pub mod indeed;
pub mod linkedin;
pub mod weworkremotely;

pub use indeed::IndeedScraper;
pub use linkedin::LinkedInScraper;
pub use weworkremotely::WeWorkRemotelyScraper;

/// One job board.
#[async_trait]
pub trait SiteScraper: Send + Sync {
    fn site(&self) -> Site;

    /// Fetches up to `request.results_wanted` postings, newest pages first.
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<JobRecord>, ScrapeError>;
}

/// GETs `url` and returns the body, turning non-2xx answers into errors.
pub(crate) async fn fetch_text(
    client: &Client,
    site: Site,
    url: &str,
    query: &[(&str, String)],
) -> Result<String, ScrapeError> {
    debug!(%site, url, ?query, "fetching page");

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ScrapeError::Http {
            site,
            source: Box::new(e),
        })?;

    if !response.status().is_success() {
        return Err(ScrapeError::Status {
            site,
            status: response.status().as_u16(),
        });
    }

    response.text().await.map_err(|e| ScrapeError::Http {
        site,
        source: Box::new(e),
    })
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Text of the first element under `element` matching `selector`,
/// whitespace-collapsed. Empty text counts as missing.
pub(crate) fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
}

pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Loose remote check on the text a board shows next to a posting.
pub(crate) fn mentions_remote(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ["remote", "work from home", "wfh"]
        .iter()
        .any(|needle| lowered.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Senior\n\t Rust   Engineer \n"), "Senior Rust Engineer");
    }

    #[test]
    fn test_mentions_remote() {
        assert!(mentions_remote("Bengaluru (Remote)"));
        assert!(mentions_remote("Work From Home"));
        assert!(!mentions_remote("Pune, Maharashtra"));
    }
}
