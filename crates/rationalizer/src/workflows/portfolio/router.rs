use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{PortfolioRepository, RepositoryError};
use super::service::{PortfolioService, PortfolioServiceError};
use crate::workflows::assessment::{
    record_from_submission, ApplicationId, ApplicationSubmission, MigrationStrategy, ReviewError,
};

/// Body for `PUT .../assessment/strategy`.
#[derive(Debug, Deserialize)]
pub struct StrategyOverride {
    pub strategy: MigrationStrategy,
}

/// Body for `PUT .../assessment/wave`.
#[derive(Debug, Deserialize)]
pub struct WaveOverride {
    pub wave: u8,
}

/// Query string for `GET /api/v1/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Router builder exposing the catalogue, assessment, and review endpoints.
pub fn portfolio_router<R>(service: Arc<PortfolioService<R>>) -> Router
where
    R: PortfolioRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments/analyze", post(analyze_payload_handler::<R>))
        .route(
            "/api/v1/applications",
            get(list_handler::<R>).post(register_handler::<R>),
        )
        .route("/api/v1/applications/:application_id", get(detail_handler::<R>))
        .route(
            "/api/v1/applications/:application_id/assessment",
            post(assess_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/assessment/strategy",
            put(strategy_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/assessment/wave",
            put(wave_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/assessment/approve",
            post(approve_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/lock",
            post(lock_handler::<R>),
        )
        .route("/api/v1/search", get(search_handler::<R>))
        .route("/api/v1/waves/groups", get(wave_groups_handler::<R>))
        .with_state(service)
}

/// Assess an ad-hoc payload without cataloguing it.
pub(crate) async fn analyze_payload_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    match record_from_submission(submission) {
        Ok(record) => {
            let assessment = service.engine().analyze(&record);
            (StatusCode::OK, Json(assessment)).into_response()
        }
        Err(error) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<PortfolioService<R>>>) -> Response
where
    R: PortfolioRepository + 'static,
{
    summaries(service.list())
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    summaries(service.search(&params.q))
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    match service.register(submission) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    respond(service.get(&ApplicationId(application_id)))
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    respond(service.analyze(&ApplicationId(application_id)))
}

pub(crate) async fn strategy_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Path(application_id): Path<String>,
    Json(body): Json<StrategyOverride>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    respond(service.override_strategy(&ApplicationId(application_id), body.strategy))
}

pub(crate) async fn wave_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Path(application_id): Path<String>,
    Json(body): Json<WaveOverride>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    respond(service.override_wave(&ApplicationId(application_id), body.wave))
}

pub(crate) async fn approve_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    respond(service.approve(&ApplicationId(application_id)))
}

pub(crate) async fn lock_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    respond(service.lock(&ApplicationId(application_id)))
}

pub(crate) async fn wave_groups_handler<R>(
    State(service): State<Arc<PortfolioService<R>>>,
) -> Response
where
    R: PortfolioRepository + 'static,
{
    match service.wave_groups() {
        Ok(groups) => (StatusCode::OK, Json(groups)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn summaries(
    result: Result<Vec<super::repository::PortfolioEntry>, PortfolioServiceError>,
) -> Response {
    match result {
        Ok(entries) => {
            let views: Vec<_> = entries.iter().map(|entry| entry.summary_view()).collect();
            let payload = json!({
                "total": views.len(),
                "applications": views,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn respond(
    result: Result<super::repository::PortfolioEntry, PortfolioServiceError>,
) -> Response {
    match result {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: PortfolioServiceError) -> Response {
    let status = match &error {
        PortfolioServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PortfolioServiceError::Review(ReviewError::InvalidWave(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PortfolioServiceError::Review(_) | PortfolioServiceError::AssessmentInFlight(_) => {
            StatusCode::CONFLICT
        }
        PortfolioServiceError::Repository(RepositoryError::Conflict) => {
            return error_response(StatusCode::CONFLICT, "application already exists".to_string());
        }
        PortfolioServiceError::Repository(RepositoryError::NotFound) => {
            return error_response(StatusCode::NOT_FOUND, "application not found".to_string());
        }
        PortfolioServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    let payload = json!({
        "error": message,
    });
    (status, Json(payload)).into_response()
}
