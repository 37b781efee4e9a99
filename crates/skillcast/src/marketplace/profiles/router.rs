use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde_json::json;

use crate::auth::IdentityId;
use crate::marketplace::StoreError;

use super::domain::{EmployerProfileForm, StudentProfileForm};
use super::repository::ProfileStore;
use super::service::{ProfileService, ProfileServiceError};

/// Router builder exposing the profile read and completion endpoints.
pub fn profile_router<S>(service: Arc<ProfileService<S>>) -> Router
where
    S: ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/users/:user_id", get(fetch_handler::<S>))
        .route(
            "/api/v1/users/:user_id/student-profile",
            put(complete_student_handler::<S>),
        )
        .route(
            "/api/v1/users/:user_id/employer-profile",
            put(complete_employer_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn fetch_handler<S>(
    State(service): State<Arc<ProfileService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: ProfileStore + 'static,
{
    match service.fetch(&IdentityId(user_id)).await {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => profile_error_response(error),
    }
}

pub(crate) async fn complete_student_handler<S>(
    State(service): State<Arc<ProfileService<S>>>,
    Path(user_id): Path<String>,
    axum::Json(form): axum::Json<StudentProfileForm>,
) -> Response
where
    S: ProfileStore + 'static,
{
    match service
        .complete_student_profile(&IdentityId(user_id), form)
        .await
    {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => profile_error_response(error),
    }
}

pub(crate) async fn complete_employer_handler<S>(
    State(service): State<Arc<ProfileService<S>>>,
    Path(user_id): Path<String>,
    axum::Json(form): axum::Json<EmployerProfileForm>,
) -> Response
where
    S: ProfileStore + 'static,
{
    match service
        .complete_employer_profile(&IdentityId(user_id), form)
        .await
    {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => profile_error_response(error),
    }
}

fn profile_error_response(error: ProfileServiceError) -> Response {
    let status = match &error {
        ProfileServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ProfileServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ProfileServiceError::Store(StoreError::PermissionDenied) => StatusCode::FORBIDDEN,
        ProfileServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
