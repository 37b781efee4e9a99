use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::AuthError;
use crate::marketplace::profiles::Role;

use super::flow::Flow;
use super::holder::{Session, SessionError};
use super::snapshot::SessionSnapshot;

/// Router builder exposing the device session: registration, the
/// verification-gated login, and the current flow decision.
pub fn session_router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/api/v1/session", get(snapshot_handler))
        .route("/api/v1/session/signup", post(signup_handler))
        .route("/api/v1/session/login", post(login_handler))
        .route("/api/v1/session/logout", post(logout_handler))
        .route(
            "/api/v1/session/password-reset",
            post(password_reset_handler),
        )
        .with_state(session)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupRequest {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: Role,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordResetRequest {
    pub(crate) email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionView {
    pub(crate) flow: Flow,
    #[serde(flatten)]
    pub(crate) snapshot: SessionSnapshot,
}

pub(crate) async fn snapshot_handler(State(session): State<Arc<Session>>) -> Response {
    let snapshot = session.snapshot();
    let view = SessionView {
        flow: Flow::for_snapshot(&snapshot),
        snapshot,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn signup_handler(
    State(session): State<Arc<Session>>,
    axum::Json(request): axum::Json<SignupRequest>,
) -> Response {
    match session
        .sign_up(&request.email, &request.password, request.role)
        .await
    {
        Ok(()) => {
            let payload = json!({
                "status": "verification_email_sent",
                "email": request.email,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => session_error_response(error),
    }
}

pub(crate) async fn login_handler(
    State(session): State<Arc<Session>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response {
    match session.log_in(&request.email, &request.password).await {
        Ok(identity) => (StatusCode::OK, axum::Json(identity)).into_response(),
        Err(error) => session_error_response(error),
    }
}

pub(crate) async fn logout_handler(State(session): State<Arc<Session>>) -> Response {
    match session.log_out().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => session_error_response(error),
    }
}

pub(crate) async fn password_reset_handler(
    State(session): State<Arc<Session>>,
    axum::Json(request): axum::Json<PasswordResetRequest>,
) -> Response {
    match session.request_password_reset(&request.email).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            axum::Json(json!({ "status": "reset_email_sent" })),
        )
            .into_response(),
        Err(error) => session_error_response(error),
    }
}

fn session_error_response(error: SessionError) -> Response {
    let status = match &error {
        SessionError::UnverifiedEmail => StatusCode::FORBIDDEN,
        SessionError::Policy(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Auth(AuthError::InvalidCredential) => StatusCode::UNAUTHORIZED,
        SessionError::Auth(AuthError::EmailAlreadyInUse) => StatusCode::CONFLICT,
        SessionError::Auth(AuthError::InvalidEmail) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Auth(AuthError::TooManyRequests) => StatusCode::TOO_MANY_REQUESTS,
        SessionError::Auth(AuthError::Unavailable(_)) | SessionError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
