//! Shared job-search types.
//!
//! Holds the raw [`JobRecord`] produced by the scraping collaborator, the
//! display projection built from it, and the interface the web front end
//! uses to call into a scraper.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod export;
pub mod shape;
pub mod source;

pub use export::{ExportError, to_csv};
pub use shape::{NOT_SPECIFIED, ShapedJob, ShapedJobs, format_salary, process_jobs_data};
pub use source::{DEFAULT_COUNTRY, DEFAULT_HOURS_OLD, DEFAULT_RESULTS_WANTED, DEFAULT_SITES};
pub use source::{JobSource, ScrapeError, ScrapeRequest};

/// One posting as returned by a job board, before any display shaping.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JobRecord {
    pub id: Option<String>,
    pub site: Site,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<NaiveDate>,
    #[serde(default)]
    pub job_type: Vec<JobType>,
    pub salary_source: Option<SalarySource>,
    pub interval: Option<CompensationInterval>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub currency: Option<String>,
    pub is_remote: Option<bool>,
    pub job_url: String,
    pub description: Option<String>,
}

impl JobRecord {
    /// A record with only the mandatory columns filled in.
    pub fn new(site: Site, title: impl Into<String>, job_url: impl Into<String>) -> Self {
        Self {
            id: None,
            site,
            title: title.into(),
            company: None,
            location: None,
            date_posted: None,
            job_type: Vec::new(),
            salary_source: None,
            interval: None,
            min_amount: None,
            max_amount: None,
            currency: None,
            is_remote: None,
            job_url: job_url.into(),
            description: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid site name: {0}")]
pub struct InvalidSite(pub String);

/// Job boards a search can be sent to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Indeed,
    LinkedIn,
    Glassdoor,
    WeWorkRemotely,
}

impl Site {
    pub const ALL: [Site; 4] = [
        Site::Indeed,
        Site::LinkedIn,
        Site::Glassdoor,
        Site::WeWorkRemotely,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Indeed => "indeed",
            Site::LinkedIn => "linkedin",
            Site::Glassdoor => "glassdoor",
            Site::WeWorkRemotely => "weworkremotely",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = InvalidSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Site::ALL
            .into_iter()
            .find(|site| site.as_str() == normalized)
            .ok_or_else(|| InvalidSite(s.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "fulltime",
            JobType::PartTime => "parttime",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Temporary => "temporary",
        }
    }

    /// Maps the labels job boards print ("Full-time", "Contractor", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match key.as_str() {
            "fulltime" | "permanent" => Some(JobType::FullTime),
            "parttime" => Some(JobType::PartTime),
            "contract" | "contractor" | "freelance" => Some(JobType::Contract),
            "internship" | "intern" => Some(JobType::Internship),
            "temporary" | "temp" => Some(JobType::Temporary),
            _ => None,
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompensationInterval {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

impl CompensationInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationInterval::Yearly => "yearly",
            CompensationInterval::Monthly => "monthly",
            CompensationInterval::Weekly => "weekly",
            CompensationInterval::Daily => "daily",
            CompensationInterval::Hourly => "hourly",
        }
    }

    /// Accepts "yearly", "a year", "per hour", "/hr", "annually" and similar.
    pub fn from_label(label: &str) -> Option<Self> {
        let lowered = label.trim().to_ascii_lowercase();
        let key = lowered
            .trim_start_matches('/')
            .trim_start_matches("per ")
            .trim_start_matches("an ")
            .trim_start_matches("a ")
            .trim();
        match key {
            "year" | "yearly" | "yr" | "annual" | "annually" => Some(CompensationInterval::Yearly),
            "month" | "monthly" | "mo" => Some(CompensationInterval::Monthly),
            "week" | "weekly" | "wk" => Some(CompensationInterval::Weekly),
            "day" | "daily" => Some(CompensationInterval::Daily),
            "hour" | "hourly" | "hr" => Some(CompensationInterval::Hourly),
            _ => None,
        }
    }
}

impl fmt::Display for CompensationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the salary figures of a record came from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SalarySource {
    DirectData,
    Description,
}
