//! Interface to the scraping collaborator.

use crate::{InvalidSite, JobRecord, Site};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SITES: [Site; 3] = [Site::Indeed, Site::LinkedIn, Site::Glassdoor];
pub const DEFAULT_RESULTS_WANTED: usize = 20;
pub const DEFAULT_HOURS_OLD: u32 = 72;
pub const DEFAULT_COUNTRY: &str = "India";

/// Parameters of one search, as handed to a [`JobSource`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub site_names: Vec<Site>,
    pub search_term: String,
    pub location: String,
    /// Rows wanted from each site.
    pub results_wanted: usize,
    pub hours_old: u32,
    /// Country whose Indeed domain is searched.
    pub country_indeed: String,
}

impl ScrapeRequest {
    pub fn new(search_term: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            site_names: DEFAULT_SITES.to_vec(),
            search_term: search_term.into(),
            location: location.into(),
            results_wanted: DEFAULT_RESULTS_WANTED,
            hours_old: DEFAULT_HOURS_OLD,
            country_indeed: DEFAULT_COUNTRY.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    InvalidSite(#[from] InvalidSite),

    #[error("invalid country for Indeed: {0}")]
    UnknownCountry(String),

    #[error("none of the requested sites can be scraped: {0}")]
    NoSupportedSite(String),

    #[error("request to {site} failed: {source}")]
    Http {
        site: Site,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{site} responded with HTTP {status}")]
    Status { site: Site, status: u16 },

    #[error("could not read {site} response: {message}")]
    Parse { site: Site, message: String },
}

/// Something that can run a job search across one or more boards.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn scrape_jobs(&self, request: &ScrapeRequest) -> Result<Vec<JobRecord>, ScrapeError>;
}
