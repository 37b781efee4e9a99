use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::IdentityId;
use crate::marketplace::profiles::ProfileStore;
use crate::marketplace::StoreError;

use super::domain::{JobDraft, JobId};
use super::repository::JobStore;
use super::service::{JobService, JobServiceError};

/// Router builder exposing the job board and posting endpoints.
pub fn job_router<S, P>(service: Arc<JobService<S, P>>) -> Router
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(board_handler::<S, P>).post(post_handler::<S, P>),
        )
        .route("/api/v1/jobs/:job_id", get(fetch_handler::<S, P>))
        .route("/api/v1/jobs/:job_id/close", post(close_handler::<S, P>))
        .route(
            "/api/v1/employers/:employer_id/jobs",
            get(listings_handler::<S, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostJobRequest {
    pub(crate) employer_id: String,
    #[serde(flatten)]
    pub(crate) draft: JobDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloseJobRequest {
    pub(crate) employer_id: String,
}

pub(crate) async fn board_handler<S, P>(State(service): State<Arc<JobService<S, P>>>) -> Response
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service.board().await {
        Ok(jobs) => (StatusCode::OK, axum::Json(jobs)).into_response(),
        Err(error) => job_error_response(error),
    }
}

pub(crate) async fn fetch_handler<S, P>(
    State(service): State<Arc<JobService<S, P>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service.fetch(&JobId(job_id)).await {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => job_error_response(error),
    }
}

pub(crate) async fn post_handler<S, P>(
    State(service): State<Arc<JobService<S, P>>>,
    axum::Json(request): axum::Json<PostJobRequest>,
) -> Response
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service
        .post(&IdentityId(request.employer_id), request.draft)
        .await
    {
        Ok(job) => (StatusCode::CREATED, axum::Json(job)).into_response(),
        Err(error) => job_error_response(error),
    }
}

pub(crate) async fn listings_handler<S, P>(
    State(service): State<Arc<JobService<S, P>>>,
    Path(employer_id): Path<String>,
) -> Response
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service.listings(&IdentityId(employer_id)).await {
        Ok(jobs) => (StatusCode::OK, axum::Json(jobs)).into_response(),
        Err(error) => job_error_response(error),
    }
}

pub(crate) async fn close_handler<S, P>(
    State(service): State<Arc<JobService<S, P>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<CloseJobRequest>,
) -> Response
where
    S: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service
        .close(&JobId(job_id), &IdentityId(request.employer_id))
        .await
    {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => job_error_response(error),
    }
}

fn job_error_response(error: JobServiceError) -> Response {
    let status = match &error {
        JobServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        JobServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        JobServiceError::Store(StoreError::PermissionDenied) => StatusCode::FORBIDDEN,
        JobServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        JobServiceError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
