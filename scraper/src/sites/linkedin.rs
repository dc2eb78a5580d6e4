//! LinkedIn guest job search.

use super::{clean_text, fetch_text, first_text, mentions_remote, selector, SiteScraper};
use crate::salary::extract_salary_range;
use async_trait::async_trait;
use chrono::NaiveDate;
use common::{JobRecord, SalarySource, ScrapeError, ScrapeRequest, Site};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

const SEARCH_URL: &str = "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
const PAGE_SIZE: usize = 25;
// The guest endpoint stops answering past this offset.
const MAX_OFFSET: usize = 1000;

struct CardSelectors {
    card: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    link: Selector,
    date: Selector,
    salary: Selector,
}

static SELECTORS: LazyLock<CardSelectors> = LazyLock::new(|| CardSelectors {
    card: selector("div.base-search-card"),
    title: selector("h3.base-search-card__title, span.sr-only"),
    company: selector("h4.base-search-card__subtitle"),
    location: selector("span.job-search-card__location"),
    link: selector("a.base-card__full-link"),
    date: selector("time.job-search-card__listdate, time.job-search-card__listdate--new"),
    salary: selector("span.job-search-card__salary-info"),
});

pub struct LinkedInScraper {
    client: Client,
    page_delay: Duration,
}

impl LinkedInScraper {
    pub fn new(client: Client, page_delay: Duration) -> Self {
        Self { client, page_delay }
    }
}

#[async_trait]
impl SiteScraper for LinkedInScraper {
    fn site(&self) -> Site {
        Site::LinkedIn
    }

    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<JobRecord>, ScrapeError> {
        let mut jobs = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut start = 0;

        while jobs.len() < request.results_wanted && start < MAX_OFFSET {
            let mut query = vec![
                ("keywords", request.search_term.clone()),
                ("location", request.location.clone()),
                ("pageNum", "0".to_string()),
                ("start", start.to_string()),
            ];
            if request.hours_old > 0 {
                query.push(("f_TPR", format!("r{}", u64::from(request.hours_old) * 3600)));
            }

            let html = fetch_text(&self.client, Site::LinkedIn, SEARCH_URL, &query).await?;
            let page = parse_search_page(&html);
            debug!(start, cards = page.len(), "parsed LinkedIn page");
            if page.is_empty() {
                break;
            }

            for job in page {
                let key = job.id.clone().unwrap_or_else(|| job.job_url.clone());
                // Promoted cards repeat across pages.
                if seen_ids.insert(key) {
                    jobs.push(job);
                }
            }

            start += PAGE_SIZE;
            if jobs.len() < request.results_wanted {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        jobs.truncate(request.results_wanted);
        info!(count = jobs.len(), "LinkedIn search finished");
        Ok(jobs)
    }
}

/// Turns one page of guest search cards into records.
pub fn parse_search_page(html: &str) -> Vec<JobRecord> {
    let document = Html::parse_fragment(html);
    document
        .select(&SELECTORS.card)
        .filter_map(|card| parse_card(&card))
        .collect()
}

fn parse_card(card: &ElementRef<'_>) -> Option<JobRecord> {
    let s = &*SELECTORS;

    let title = first_text(card, &s.title)?;
    let href = card
        .select(&s.link)
        .next()
        .and_then(|a| a.value().attr("href"))?;
    let job_url = href.split('?').next().unwrap_or(href).to_string();

    let mut job = JobRecord::new(Site::LinkedIn, title, job_url);
    job.id = card
        .value()
        .attr("data-entity-urn")
        .and_then(|urn| urn.rsplit(':').next())
        .map(String::from)
        .or_else(|| job_id_from_url(&job.job_url));
    job.company = first_text(card, &s.company);
    job.location = first_text(card, &s.location);
    job.date_posted = card
        .select(&s.date)
        .next()
        .and_then(|t| t.value().attr("datetime"))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

    if let Some(salary) = first_text(card, &s.salary).and_then(|t| extract_salary_range(&t)) {
        job.min_amount = Some(salary.min);
        job.max_amount = Some(salary.max);
        job.interval = salary.interval;
        job.currency = salary.currency;
        job.salary_source = Some(SalarySource::DirectData);
    }

    let card_text = clean_text(&card.text().collect::<Vec<_>>().join(" "));
    job.is_remote = Some(mentions_remote(&card_text));
    Some(job)
}

// /jobs/view/rust-engineer-at-acme-3912345678 -> 3912345678
fn job_id_from_url(url: &str) -> Option<String> {
    let tail = url.trim_end_matches('/').rsplit('-').next()?;
    (!tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit())).then(|| tail.to_string())
}
