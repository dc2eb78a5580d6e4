//! Request handlers for the search page.

use crate::error::AppError;
use crate::form::SearchForm;
use crate::page::{Outcome, render_index};
use crate::AppState;
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use common::{ShapedJobs, process_jobs_data, to_csv};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

struct SearchResults {
    jobs: ShapedJobs,
    csv: String,
}

/// Handler for GET / (empty form)
pub async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(
        &SearchForm::default(),
        &state.default_country,
        &Outcome::Blank,
    ))
}

/// Handler for POST / (run a search)
pub async fn search(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(pairs)) => SearchForm::from_pairs(pairs),
        Err(rejection) => {
            let err = AppError::Form(rejection.body_text());
            return error_page(&state, &SearchForm::default(), &err);
        }
    };

    match run_search(&state, &form).await {
        Ok(results) => {
            info!(count = results.jobs.len(), "search answered");
            Html(render_index(
                &form,
                &state.default_country,
                &Outcome::Results {
                    jobs: &results.jobs,
                    csv: &results.csv,
                },
            ))
        }
        Err(err) => error_page(&state, &form, &err),
    }
}

/// Handler for GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn run_search(state: &AppState, form: &SearchForm) -> Result<SearchResults, AppError> {
    let request = form.to_request(&state.default_country)?;
    info!(
        search_term = %request.search_term,
        location = %request.location,
        sites = ?request.site_names,
        results_wanted = request.results_wanted,
        hours_old = request.hours_old,
        country = %request.country_indeed,
        "search requested"
    );

    let jobs = state.source.scrape_jobs(&request).await?;
    if jobs.is_empty() {
        return Err(AppError::NoResults);
    }

    let jobs = process_jobs_data(&jobs).ok_or(AppError::NoDataAfterProcessing)?;
    let csv = to_csv(&jobs)?;
    Ok(SearchResults { jobs, csv })
}

fn error_page(state: &AppState, form: &SearchForm, err: &AppError) -> Html<String> {
    error!(error = %err, chain = %err.chain(), details = ?err, "search failed");
    let message = err.to_string();
    Html(render_index(
        form,
        &state.default_country,
        &Outcome::Error(&message),
    ))
}
