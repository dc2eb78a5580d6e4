//! Job Search Web Server
//!
//! Serves the search form and forwards submissions to the job board
//! scrapers.

use anyhow::{Context, Result};
use clap::Parser;
use job_board::{AppState, Config, app};
use job_scraper::JobSpy;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting job search server");

    let spy = JobSpy::new(config.scraper_config()).context("Failed to create HTTP client")?;
    let state = AppState::new(Arc::new(spy), config.country.clone());
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    info!("Server running at http://{}", config.addr);
    info!("Default Indeed country: {}", config.country);

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
