use common::{ExportError, InvalidSite, ScrapeError};
use std::error::Error as _;
use thiserror::Error;

/// Everything that can go wrong while answering a search. Every variant
/// ends up as the same error banner on the page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid form submission: {0}")]
    Form(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    InvalidSite(#[from] InvalidSite),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("No jobs found or invalid response from scraper")]
    NoResults,

    #[error("No jobs found after processing")]
    NoDataAfterProcessing,

    #[error("Failed to build CSV export: {0}")]
    Export(#[from] ExportError),
}

impl AppError {
    /// The message followed by each underlying cause, outermost first.
    pub fn chain(&self) -> String {
        let mut chain = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !chain.ends_with(&cause_text) {
                chain.push_str(": ");
                chain.push_str(&cause_text);
            }
            source = cause.source();
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Site;

    #[derive(Debug, Error)]
    #[error("connection reset by peer")]
    struct Reset;

    #[test]
    fn test_chain_lists_causes() {
        let err = AppError::from(ScrapeError::Http {
            site: Site::Indeed,
            source: Box::new(Reset),
        });
        assert_eq!(
            err.chain(),
            "request to indeed failed: connection reset by peer"
        );
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            AppError::NoResults.to_string(),
            "No jobs found or invalid response from scraper"
        );
        assert_eq!(
            AppError::NoDataAfterProcessing.to_string(),
            "No jobs found after processing"
        );
    }
}
