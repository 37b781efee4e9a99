use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::IdentityId;
use crate::marketplace::jobs::{JobId, JobStore};
use crate::marketplace::profiles::ProfileStore;
use crate::marketplace::StoreError;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationViolation};
use super::repository::ApplicationStore;
use super::service::{ApplicationService, ApplicationServiceError};

/// Router builder exposing intake, the two inboxes, withdrawal, and the
/// employer decision endpoint.
pub fn application_router<A, J, P>(service: Arc<ApplicationService<A, J, P>>) -> Router
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(submit_handler::<A, J, P>).get(applicants_handler::<A, J, P>),
        )
        .route(
            "/api/v1/students/:student_id/applications",
            get(submissions_handler::<A, J, P>),
        )
        .route(
            "/api/v1/applications/:application_id/decision",
            post(decision_handler::<A, J, P>),
        )
        .route(
            "/api/v1/applications/:application_id",
            delete(withdraw_handler::<A, J, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    pub(crate) student_id: String,
    pub(crate) cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicantsQuery {
    pub(crate) employer_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) employer_id: String,
    pub(crate) status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WithdrawQuery {
    pub(crate) student_id: String,
}

pub(crate) async fn submit_handler<A, J, P>(
    State(service): State<Arc<ApplicationService<A, J, P>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service
        .apply(
            &IdentityId(request.student_id),
            &JobId(job_id),
            &request.cover_letter,
        )
        .await
    {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn submissions_handler<A, J, P>(
    State(service): State<Arc<ApplicationService<A, J, P>>>,
    Path(student_id): Path<String>,
) -> Response
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service.submissions(&IdentityId(student_id)).await {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn applicants_handler<A, J, P>(
    State(service): State<Arc<ApplicationService<A, J, P>>>,
    Path(job_id): Path<String>,
    Query(query): Query<ApplicantsQuery>,
) -> Response
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service
        .applicants(&JobId(job_id), &IdentityId(query.employer_id))
        .await
    {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn decision_handler<A, J, P>(
    State(service): State<Arc<ApplicationService<A, J, P>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service
        .decide(
            &ApplicationId(application_id),
            &IdentityId(request.employer_id),
            request.status,
        )
        .await
    {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn withdraw_handler<A, J, P>(
    State(service): State<Arc<ApplicationService<A, J, P>>>,
    Path(application_id): Path<String>,
    Query(query): Query<WithdrawQuery>,
) -> Response
where
    A: ApplicationStore + 'static,
    J: JobStore + 'static,
    P: ProfileStore + 'static,
{
    match service
        .withdraw(
            &ApplicationId(application_id),
            &IdentityId(query.student_id),
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => application_error_response(error),
    }
}

fn application_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::Validation(ApplicationViolation::AlreadyApplied) => {
            StatusCode::CONFLICT
        }
        ApplicationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Store(StoreError::PermissionDenied) => StatusCode::FORBIDDEN,
        ApplicationServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Store(StoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
