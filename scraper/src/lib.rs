//! Job board scraping.
//!
//! [`JobSpy`] runs a [`ScrapeRequest`] against each requested board in turn
//! and returns the postings as [`JobRecord`]s, in site order.

use async_trait::async_trait;
use common::{JobRecord, JobSource, ScrapeError, ScrapeRequest, Site};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

pub mod country;
pub mod salary;
pub mod sites;

pub use country::Country;
use sites::{IndeedScraper, LinkedInScraper, SiteScraper, WeWorkRemotelyScraper};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP settings shared by all site scrapers.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Limit for each outbound request.
    pub timeout: Duration,
    /// Pause between result pages of the same board.
    pub page_delay: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            page_delay: Duration::from_secs(2),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

pub struct JobSpy {
    client: Client,
    page_delay: Duration,
}

impl JobSpy {
    pub fn new(config: ScraperConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            page_delay: config.page_delay,
        })
    }

    fn backend(&self, site: Site, country: &'static Country) -> Option<Box<dyn SiteScraper>> {
        let client = self.client.clone();
        match site {
            Site::Indeed => Some(Box::new(IndeedScraper::new(client, country, self.page_delay))),
            Site::LinkedIn => Some(Box::new(LinkedInScraper::new(client, self.page_delay))),
            Site::WeWorkRemotely => Some(Box::new(WeWorkRemotelyScraper::new(client, self.page_delay))),
            Site::Glassdoor => None,
        }
    }
}

#[async_trait]
impl JobSource for JobSpy {
    async fn scrape_jobs(&self, request: &ScrapeRequest) -> Result<Vec<JobRecord>, ScrapeError> {
        let country = Country::from_name(&request.country_indeed)?;
        let sites = requested_sites(&request.site_names);

        let mut jobs = Vec::new();
        let mut scraped_any = false;

        for site in &sites {
            let Some(backend) = self.backend(*site, country) else {
                warn!(%site, "no scraper for site, skipping");
                continue;
            };
            scraped_any = true;

            info!(
                site = %backend.site(),
                search_term = %request.search_term,
                location = %request.location,
                results_wanted = request.results_wanted,
                hours_old = request.hours_old,
                "scraping"
            );
            let mut found = backend.scrape(request).await?;
            found.truncate(request.results_wanted);
            info!(%site, count = found.len(), "site finished");
            jobs.extend(found);
        }

        if !scraped_any {
            let names: Vec<&str> = sites.iter().map(|s| s.as_str()).collect();
            return Err(ScrapeError::NoSupportedSite(names.join(", ")));
        }

        info!(total = jobs.len(), "scrape finished");
        Ok(jobs)
    }
}

/// The default boards when none is named; otherwise the named ones, first
/// mention wins.
fn requested_sites(names: &[Site]) -> Vec<Site> {
    if names.is_empty() {
        return common::DEFAULT_SITES.to_vec();
    }
    let mut sites = Vec::with_capacity(names.len());
    for site in names {
        if !sites.contains(site) {
            sites.push(*site);
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_sites_dedupes_in_order() {
        let sites = requested_sites(&[Site::LinkedIn, Site::Indeed, Site::LinkedIn]);
        assert_eq!(sites, vec![Site::LinkedIn, Site::Indeed]);
    }

    #[test]
    fn test_requested_sites_defaults_to_default_sites() {
        assert_eq!(
            requested_sites(&[]),
            vec![Site::Indeed, Site::LinkedIn, Site::Glassdoor]
        );
    }

    #[tokio::test]
    async fn test_only_unsupported_sites_is_an_error() {
        let spy = JobSpy::new(ScraperConfig::default()).unwrap();
        let mut request = ScrapeRequest::new("rust", "Remote");
        request.site_names = vec![Site::Glassdoor];

        let err = spy.scrape_jobs(&request).await.unwrap_err();
        assert!(matches!(err, ScrapeError::NoSupportedSite(ref s) if s == "glassdoor"));
    }

    #[tokio::test]
    async fn test_unknown_country_fails_before_any_request() {
        let spy = JobSpy::new(ScraperConfig::default()).unwrap();
        let mut request = ScrapeRequest::new("rust", "Remote");
        request.country_indeed = "Atlantis".to_string();

        let err = spy.scrape_jobs(&request).await.unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownCountry(_)));
    }
}
