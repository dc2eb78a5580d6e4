//! Command-line job search.
//!
//! Runs one search and writes the shaped results as CSV to a file or stdout.

use anyhow::{Context, Result};
use clap::Parser;
use common::{process_jobs_data, to_csv, JobSource, ScrapeRequest, Site};
use job_scraper::{JobSpy, ScraperConfig};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "job-scrape", about = "Search job boards and export the results as CSV", version)]
struct Cli {
    /// Job title or keywords.
    #[arg(long)]
    search_term: String,

    #[arg(long)]
    location: String,

    /// Board to search; repeat for several. Defaults to indeed, linkedin, glassdoor.
    #[arg(long = "site")]
    sites: Vec<Site>,

    /// Rows wanted from each board.
    #[arg(long, default_value_t = common::DEFAULT_RESULTS_WANTED)]
    results_wanted: usize,

    #[arg(long, default_value_t = common::DEFAULT_HOURS_OLD)]
    hours_old: u32,

    #[arg(long, default_value = common::DEFAULT_COUNTRY)]
    country_indeed: String,

    /// Write the CSV here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Timeout for each HTTP request, in seconds.
    #[arg(long, env = "JOBBOARD_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut request = ScrapeRequest::new(cli.search_term, cli.location);
    if !cli.sites.is_empty() {
        request.site_names = cli.sites;
    }
    request.results_wanted = cli.results_wanted;
    request.hours_old = cli.hours_old;
    request.country_indeed = cli.country_indeed;

    let spy = JobSpy::new(ScraperConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..ScraperConfig::default()
    })
    .context("Failed to create HTTP client")?;

    let jobs = spy.scrape_jobs(&request).await?;
    info!("Total jobs found: {}", jobs.len());

    let Some(shaped) = process_jobs_data(&jobs) else {
        warn!("No jobs found, nothing to write");
        return Ok(());
    };
    let csv = to_csv(&shaped)?;

    match cli.output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
            fs::write(&path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Saved {} jobs to {}", shaped.len(), path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}
