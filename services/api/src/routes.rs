use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use skillcast::marketplace::applications::application_router;
use skillcast::marketplace::jobs::job_router;
use skillcast::marketplace::profiles::profile_router;
use skillcast::memory::MemoryAuthProvider;
use skillcast::session::session_router;

use crate::infra::{AppState, Backend};

/// The full HTTP surface: one router per workflow, merged with the service
/// endpoints.
pub(crate) fn app_router(backend: &Backend) -> axum::Router {
    let dev = axum::Router::new()
        .route("/api/v1/dev/verify-email", post(verify_email_endpoint))
        .with_state(backend.provider.clone());

    session_router(backend.session.clone())
        .merge(profile_router(backend.profiles.clone()))
        .merge(job_router(backend.jobs.clone()))
        .merge(application_router(backend.applications.clone()))
        .merge(dev)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyEmailRequest {
    pub(crate) email: String,
}

/// Stands in for the account owner clicking the provider's verification
/// link. Only the in-memory provider backs this; a hosted deployment would
/// not expose it.
pub(crate) async fn verify_email_endpoint(
    State(provider): State<Arc<MemoryAuthProvider>>,
    Json(request): Json<VerifyEmailRequest>,
) -> impl IntoResponse {
    match provider.verify_email(&request.email) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "verified" }))),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no account with that address" })),
        ),
    }
}
