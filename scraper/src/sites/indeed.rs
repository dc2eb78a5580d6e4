//! Indeed search result pages.
//!
//! Indeed renders its result cards from a JSON blob assigned to
//! `window.mosaic.providerData["mosaic-provider-jobcards"]`; the cards are
//! read from that blob rather than from the markup.

use super::{fetch_text, mentions_remote, SiteScraper};
use crate::country::Country;
use async_trait::async_trait;
use chrono::DateTime;
use common::{CompensationInterval, JobRecord, JobType, SalarySource, ScrapeError, ScrapeRequest, Site};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

const PAGE_SIZE: usize = 10;

static JOBCARDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)window\.mosaic\.providerData\["mosaic-provider-jobcards"\]\s*=\s*(\{.*\});\s*$"#)
        .expect("job card pattern compiles")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderData {
    meta_data: MetaData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaData {
    mosaic_provider_job_cards_model: JobCardsModel,
}

#[derive(Debug, Deserialize)]
struct JobCardsModel {
    #[serde(default)]
    results: Vec<JobCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobCard {
    jobkey: String,
    #[serde(alias = "title")]
    display_title: String,
    company: Option<String>,
    formatted_location: Option<String>,
    /// Milliseconds since the epoch.
    pub_date: Option<i64>,
    #[serde(default)]
    job_types: Vec<String>,
    extracted_salary: Option<ExtractedSalary>,
    salary_snippet: Option<SalarySnippet>,
    #[serde(default)]
    remote_location: bool,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractedSalary {
    min: Option<f64>,
    max: Option<f64>,
    #[serde(rename = "type")]
    interval: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SalarySnippet {
    currency: Option<String>,
}

pub struct IndeedScraper {
    client: Client,
    country: &'static Country,
    page_delay: Duration,
}

impl IndeedScraper {
    pub fn new(client: Client, country: &'static Country, page_delay: Duration) -> Self {
        Self {
            client,
            country,
            page_delay,
        }
    }
}

#[async_trait]
impl SiteScraper for IndeedScraper {
    fn site(&self) -> Site {
        Site::Indeed
    }

    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<JobRecord>, ScrapeError> {
        let base_url = self.country.indeed_base_url();
        let search_url = format!("{base_url}/jobs");
        let mut jobs = Vec::new();
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut start = 0;

        while jobs.len() < request.results_wanted {
            let mut query = vec![
                ("q", request.search_term.clone()),
                ("l", request.location.clone()),
                ("filter", "0".to_string()),
                ("start", start.to_string()),
            ];
            if request.hours_old > 0 {
                query.push(("fromage", days_from_hours(request.hours_old).to_string()));
            }

            let html = fetch_text(&self.client, Site::Indeed, &search_url, &query).await?;
            let page = parse_search_page(&html, &base_url, self.country.currency)?;
            debug!(start, cards = page.len(), country = self.country.name, "parsed Indeed page");

            let before = jobs.len();
            for job in page {
                let key = job.id.clone().unwrap_or_else(|| job.job_url.clone());
                if seen_keys.insert(key) {
                    jobs.push(job);
                }
            }
            // Indeed repeats the last page once results run out.
            if jobs.len() == before {
                break;
            }

            start += PAGE_SIZE;
            if jobs.len() < request.results_wanted {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        jobs.truncate(request.results_wanted);
        info!(count = jobs.len(), country = self.country.name, "Indeed search finished");
        Ok(jobs)
    }
}

/// Reads the embedded job card data of one result page.
pub fn parse_search_page(
    html: &str,
    base_url: &str,
    default_currency: &str,
) -> Result<Vec<JobRecord>, ScrapeError> {
    let blob = JOBCARDS_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .ok_or_else(|| ScrapeError::Parse {
            site: Site::Indeed,
            message: "job card data not found in page".to_string(),
        })?;

    let data: ProviderData = serde_json::from_str(blob.as_str()).map_err(|e| ScrapeError::Parse {
        site: Site::Indeed,
        message: e.to_string(),
    })?;

    Ok(data
        .meta_data
        .mosaic_provider_job_cards_model
        .results
        .into_iter()
        .map(|card| card_to_record(card, base_url, default_currency))
        .collect())
}

fn card_to_record(card: JobCard, base_url: &str, default_currency: &str) -> JobRecord {
    let job_url = format!("{base_url}/viewjob?jk={}", card.jobkey);
    let mut job = JobRecord::new(Site::Indeed, card.display_title, job_url);

    let location_text = card.formatted_location.clone().unwrap_or_default();
    job.is_remote = Some(card.remote_location || mentions_remote(&location_text));
    job.id = Some(card.jobkey);
    job.company = card.company;
    job.location = card.formatted_location;
    job.date_posted = card
        .pub_date
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.date_naive());
    job.job_type = card
        .job_types
        .iter()
        .filter_map(|label| JobType::from_label(label))
        .collect();
    job.description = card.snippet;

    if let Some(salary) = card.extracted_salary {
        if let (Some(min), Some(max)) = (salary.min, salary.max) {
            job.min_amount = Some(min);
            job.max_amount = Some(max);
            job.interval = salary.interval.as_deref().and_then(CompensationInterval::from_label);
            job.currency = card
                .salary_snippet
                .and_then(|s| s.currency)
                .or_else(|| Some(default_currency.to_string()));
            job.salary_source = Some(SalarySource::DirectData);
        }
    }

    job
}

fn days_from_hours(hours: u32) -> u32 {
    hours.div_ceil(24).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PAGE: &str = r#"<html><head><script>
window.mosaic.providerData["mosaic-provider-jobcards"]={"metaData":{"mosaicProviderJobCardsModel":{"results":[{"jobkey":"a1b2c3","displayTitle":"Backend Engineer","company":"Initech","formattedLocation":"Hyderabad, Telangana","pubDate":1715817600000,"jobTypes":["Full-time"],"extractedSalary":{"max":1800000,"min":1200000,"type":"yearly"},"salarySnippet":{"currency":"INR"},"remoteLocation":false,"snippet":"Build services"},{"jobkey":"d4e5f6","displayTitle":"Support Engineer","company":"Hooli","formattedLocation":"Remote","remoteLocation":false}]}}};
window.mosaic.providerData["other"]={};
</script></head><body></body></html>"#;

    #[test]
    fn test_parse_search_page() {
        let jobs = parse_search_page(PAGE, "https://in.indeed.com", "INR").unwrap();
        assert_eq!(jobs.len(), 2);

        let backend = &jobs[0];
        assert_eq!(backend.title, "Backend Engineer");
        assert_eq!(backend.job_url, "https://in.indeed.com/viewjob?jk=a1b2c3");
        assert_eq!(backend.company.as_deref(), Some("Initech"));
        assert_eq!(backend.date_posted, NaiveDate::from_ymd_opt(2024, 5, 16));
        assert_eq!(backend.job_type, vec![JobType::FullTime]);
        assert_eq!(backend.min_amount, Some(1200000.0));
        assert_eq!(backend.max_amount, Some(1800000.0));
        assert_eq!(backend.interval, Some(CompensationInterval::Yearly));
        assert_eq!(backend.currency.as_deref(), Some("INR"));
        assert_eq!(backend.is_remote, Some(false));

        let support = &jobs[1];
        assert_eq!(support.min_amount, None);
        assert_eq!(support.salary_source, None);
        assert_eq!(support.is_remote, Some(true));
    }

    #[test]
    fn test_missing_blob_is_a_parse_error() {
        let err = parse_search_page("<html>captcha</html>", "https://in.indeed.com", "INR").unwrap_err();
        assert!(matches!(err, ScrapeError::Parse { site: Site::Indeed, .. }));
    }

    #[test]
    fn test_days_from_hours() {
        assert_eq!(days_from_hours(72), 3);
        assert_eq!(days_from_hours(25), 2);
        assert_eq!(days_from_hours(0), 1);
    }
}
