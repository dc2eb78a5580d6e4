//! WeWorkRemotely category listings.
//!
//! The board has no search endpoint, so the programming categories are
//! fetched and filtered locally by the search term.

use super::{clean_text, fetch_text, first_text, selector, SiteScraper};
use crate::salary::extract_salary_range;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use common::{JobRecord, JobType, SalarySource, ScrapeError, ScrapeRequest, Site};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

const BASE_URL: &str = "https://weworkremotely.com";

const CATEGORY_URLS: [&str; 4] = [
    "https://weworkremotely.com/remote-software-developer-jobs",
    "https://weworkremotely.com/categories/remote-full-stack-programming-jobs",
    "https://weworkremotely.com/categories/remote-back-end-programming-jobs",
    "https://weworkremotely.com/categories/remote-front-end-programming-jobs",
];

struct ListingSelectors {
    job: Selector,
    title: Selector,
    company: Selector,
    region: Selector,
    link: Selector,
    category: Selector,
    age: Selector,
    time: Selector,
}

static SELECTORS: LazyLock<ListingSelectors> = LazyLock::new(|| ListingSelectors {
    job: selector("li.feature, .new-listing-container"),
    title: selector(".new-listing__header__title"),
    company: selector(".new-listing__company-name"),
    region: selector(".new-listing__company-headquarters"),
    link: selector(".listing-link--unlocked, ._blank"),
    category: selector(".new-listing__categories__category"),
    age: selector(".new-listing__header__icons__date"),
    time: selector("time"),
});

pub struct WeWorkRemotelyScraper {
    client: Client,
    page_delay: Duration,
}

impl WeWorkRemotelyScraper {
    pub fn new(client: Client, page_delay: Duration) -> Self {
        Self { client, page_delay }
    }
}

#[async_trait]
impl SiteScraper for WeWorkRemotelyScraper {
    fn site(&self) -> Site {
        Site::WeWorkRemotely
    }

    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<JobRecord>, ScrapeError> {
        let today = Utc::now().date_naive();
        let mut jobs: Vec<JobRecord> = Vec::new();
        let mut seen_urls: HashSet<String> = HashSet::new();

        for (i, url) in CATEGORY_URLS.iter().enumerate() {
            if jobs.len() >= request.results_wanted {
                break;
            }
            if i > 0 {
                tokio::time::sleep(self.page_delay).await;
            }

            // A single broken category should not sink the other three.
            let html = match fetch_text(&self.client, Site::WeWorkRemotely, url, &[]).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url, error = %e, "skipping WeWorkRemotely category");
                    continue;
                }
            };
            debug!(url, bytes = html.len(), "fetched WeWorkRemotely category");

            for job in parse_listing_page(&html, today) {
                if !matches_search(&job, &request.search_term)
                    || !is_recent(job.date_posted, today, request.hours_old)
                {
                    continue;
                }
                // The same job may appear on multiple category pages.
                if seen_urls.insert(job.job_url.clone()) {
                    jobs.push(job);
                }
            }
        }

        jobs.truncate(request.results_wanted);
        info!(count = jobs.len(), "WeWorkRemotely search finished");
        Ok(jobs)
    }
}

/// Parses the listings of one category page. `today` anchors relative ages
/// such as "3d".
pub fn parse_listing_page(html: &str, today: NaiveDate) -> Vec<JobRecord> {
    let document = Html::parse_document(html);
    document
        .select(&SELECTORS.job)
        .filter_map(|element| parse_listing(&element, today))
        .collect()
}

fn parse_listing(element: &ElementRef<'_>, today: NaiveDate) -> Option<JobRecord> {
    let s = &*SELECTORS;

    let title = first_text(element, &s.title)?;
    let href = element
        .select(&s.link)
        .next()
        .and_then(|el| el.value().attr("href"))?;
    let job_url = if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{BASE_URL}{href}")
    };

    let mut job = JobRecord::new(Site::WeWorkRemotely, title, job_url);
    job.company = first_text(element, &s.company);
    job.location = Some(first_text(element, &s.region).unwrap_or_else(|| "Remote".to_string()));
    job.is_remote = Some(true);

    let categories: Vec<String> = element
        .select(&s.category)
        .map(|el| clean_text(&el.text().collect::<String>()))
        .collect();
    job.job_type = categories
        .iter()
        .filter_map(|label| JobType::from_label(label))
        .collect();

    if let Some(salary) = categories.iter().find_map(|label| extract_salary_range(label)) {
        job.min_amount = Some(salary.min);
        job.max_amount = Some(salary.max);
        job.interval = salary.interval;
        job.currency = salary.currency;
        job.salary_source = Some(SalarySource::DirectData);
    }

    job.date_posted = element
        .select(&s.time)
        .next()
        .and_then(|t| t.value().attr("datetime"))
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.date_naive())
        .or_else(|| first_text(element, &s.age).and_then(|age| date_from_age(&age, today)));

    let full_text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
    job.description = Some(full_text);
    Some(job)
}

// "3d" -> three days before today; "New" and "Today" -> today.
fn date_from_age(age: &str, today: NaiveDate) -> Option<NaiveDate> {
    let age = age.trim().to_lowercase();
    if age == "new" || age == "today" {
        return Some(today);
    }
    let days: i64 = age.strip_suffix('d')?.trim().parse().ok()?;
    today.checked_sub_signed(ChronoDuration::days(days))
}

fn matches_search(job: &JobRecord, search_term: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        job.title,
        job.company.as_deref().unwrap_or_default(),
        job.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    search_term
        .split_whitespace()
        .all(|word| haystack.contains(&word.to_lowercase()))
}

// Listings without a date are kept.
fn is_recent(date_posted: Option<NaiveDate>, today: NaiveDate, hours_old: u32) -> bool {
    match date_posted {
        Some(date) if hours_old > 0 => {
            let max_days = i64::from(hours_old.div_ceil(24));
            (today - date).num_days() <= max_days
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::CompensationInterval;

    const PAGE: &str = r#"
<html><body><section class="jobs"><ul>
  <li class="new-listing-container feature">
    <a class="listing-link--unlocked" href="/remote-jobs/acme-senior-rust-engineer">
      <div class="new-listing">
        <div class="new-listing__header">
          <h4 class="new-listing__header__title">Senior Rust Engineer</h4>
          <p class="new-listing__header__icons__date">3d</p>
        </div>
        <p class="new-listing__company-name">Acme Corp</p>
        <p class="new-listing__company-headquarters">Anywhere in the World</p>
        <div class="new-listing__categories">
          <p class="new-listing__categories__category">Full-Time</p>
          <p class="new-listing__categories__category">$100,000 or more USD</p>
        </div>
      </div>
    </a>
  </li>
  <li class="new-listing-container">
    <a class="listing-link--unlocked" href="https://weworkremotely.com/remote-jobs/globex-frontend-dev">
      <h4 class="new-listing__header__title">Frontend Developer</h4>
      <time datetime="2024-05-01T10:00:00Z"></time>
      <p class="new-listing__company-name">Globex</p>
      <p class="new-listing__categories__category">Contract</p>
    </a>
  </li>
  <li class="view-all"><a href="/categories/all">View all</a></li>
</ul></section></body></html>
"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_parse_listing_page() {
        let jobs = parse_listing_page(PAGE, today());
        assert_eq!(jobs.len(), 2);

        let rust = &jobs[0];
        assert_eq!(rust.title, "Senior Rust Engineer");
        assert_eq!(
            rust.job_url,
            "https://weworkremotely.com/remote-jobs/acme-senior-rust-engineer"
        );
        assert_eq!(rust.company.as_deref(), Some("Acme Corp"));
        assert_eq!(rust.location.as_deref(), Some("Anywhere in the World"));
        assert_eq!(rust.job_type, vec![JobType::FullTime]);
        assert_eq!(rust.min_amount, Some(100000.0));
        assert_eq!(rust.currency.as_deref(), Some("USD"));
        assert_eq!(rust.interval, Some(CompensationInterval::Yearly));
        assert_eq!(rust.date_posted, NaiveDate::from_ymd_opt(2024, 5, 14));
        assert_eq!(rust.is_remote, Some(true));

        let frontend = &jobs[1];
        assert_eq!(frontend.location.as_deref(), Some("Remote"));
        assert_eq!(frontend.job_type, vec![JobType::Contract]);
        assert_eq!(frontend.min_amount, None);
        assert_eq!(frontend.date_posted, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_matches_search_needs_every_word() {
        let jobs = parse_listing_page(PAGE, today());
        assert!(matches_search(&jobs[0], "rust engineer"));
        assert!(matches_search(&jobs[0], "ACME"));
        assert!(!matches_search(&jobs[0], "rust frontend"));
    }

    #[test]
    fn test_is_recent() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14);
        assert!(is_recent(date, today(), 72));
        assert!(!is_recent(date, today(), 48));
        assert!(is_recent(None, today(), 24));
        assert!(is_recent(date, today(), 0));
    }

    #[test]
    fn test_date_from_age() {
        assert_eq!(date_from_age("New", today()), Some(today()));
        assert_eq!(date_from_age("10d", today()), NaiveDate::from_ymd_opt(2024, 5, 7));
        assert_eq!(date_from_age("featured", today()), None);
    }
}
