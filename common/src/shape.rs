//! Display projection of scraped job records.
//!
//! Reduces a [`JobRecord`] to the eight columns shown on the results page and
//! written to the CSV download. The salary columns are folded into a single
//! display string, so the projection cannot be reversed.

use crate::JobRecord;
use serde::Serialize;

/// Salary text used when either bound is missing.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One display row. Field order is the column order of the CSV export.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ShapedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date: String,
    pub job_type: String,
    pub remote: String,
    pub job_url: String,
    pub salary: String,
}

impl ShapedJob {
    fn from_record(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone().unwrap_or_default(),
            location: job.location.clone().unwrap_or_default(),
            date: job
                .date_posted
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            job_type: job
                .job_type
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            remote: remote_label(job.is_remote).to_string(),
            job_url: job.job_url.clone(),
            salary: format_salary(job),
        }
    }
}

/// Non-empty, ordered set of display rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedJobs(Vec<ShapedJob>);

impl ShapedJobs {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty projection is reported as `None` instead.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> &[ShapedJob] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShapedJob> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ShapedJobs {
    type Item = &'a ShapedJob;
    type IntoIter = std::slice::Iter<'a, ShapedJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Projects scraped records onto the display schema.
///
/// Returns `None` when there is nothing to show, so callers can tell
/// "no data" apart from a valid table. Row order and count are preserved.
pub fn process_jobs_data(jobs: &[JobRecord]) -> Option<ShapedJobs> {
    if jobs.is_empty() {
        return None;
    }
    Some(ShapedJobs(jobs.iter().map(ShapedJob::from_record).collect()))
}

/// `"{currency} {min} - {max} per {interval}"`, or [`NOT_SPECIFIED`] unless
/// both bounds are present.
///
/// Whole amounts print without a fractional part. A missing currency or
/// interval leaves its slot out.
pub fn format_salary(job: &JobRecord) -> String {
    let (min, max) = match (job.min_amount, job.max_amount) {
        (Some(min), Some(max)) if min.is_finite() && max.is_finite() => (min, max),
        _ => return NOT_SPECIFIED.to_string(),
    };

    let mut salary = String::new();
    if let Some(currency) = job.currency.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        salary.push_str(currency);
        salary.push(' ');
    }
    salary.push_str(&format!("{min} - {max}"));
    if let Some(interval) = job.interval {
        salary.push_str(&format!(" per {interval}"));
    }
    salary
}

// Missing flags count as not remote.
fn remote_label(is_remote: Option<bool>) -> &'static str {
    match is_remote {
        Some(true) => "Yes",
        Some(false) | None => "No",
    }
}
