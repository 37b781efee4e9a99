use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::marketplace::profiles::Role;
use crate::session::router::session_router;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn signup_route_registers_and_reports_the_verification_email() {
    let fixture = fixture();
    let router = session_router(fixture.session.clone());

    let payload = json!({
        "email": "agnesa@umib.net",
        "password": "Abc123",
        "role": "student",
    });
    let response = router
        .oneshot(post_json("/api/v1/session/signup", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body.get("status"), Some(&json!("verification_email_sent")));
    assert_eq!(fixture.provider.sent_verifications().len(), 1);
}

#[tokio::test]
async fn signup_route_maps_policy_violations_to_unprocessable() {
    let fixture = fixture();
    let router = session_router(fixture.session.clone());

    let payload = json!({
        "email": "student@gmail.com",
        "password": "Abc123",
        "role": "student",
    });
    let response = router
        .oneshot(post_json("/api/v1/session/signup", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(fixture.provider.account_count(), 0);
}

#[tokio::test]
async fn login_route_enforces_the_verification_gate() {
    let fixture = fixture();
    fixture
        .session
        .sign_up("agnesa@umib.net", "Abc123", Role::Student)
        .await
        .expect("signup succeeds");
    let router = session_router(fixture.session.clone());

    let payload = json!({ "email": "agnesa@umib.net", "password": "Abc123" });
    let response = router
        .oneshot(post_json("/api/v1/session/login", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json_body(response).await;
    assert_eq!(
        body.get("error"),
        Some(&json!("please verify your email before signing in")),
    );
}

#[tokio::test]
async fn login_route_maps_bad_credentials_to_unauthorized() {
    let fixture = fixture();
    let router = session_router(fixture.session.clone());

    let payload = json!({ "email": "nobody@umib.net", "password": "Abc123" });
    let response = router
        .oneshot(post_json("/api/v1/session/login", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_route_reports_the_current_flow() {
    let fixture = fixture();
    let router = session_router(fixture.session.clone());

    // Settle out of the initial splash before reading the decision.
    fixture.session.log_out().await.expect("logout succeeds");
    let mut receiver = fixture.session.subscribe();
    wait_until(&mut receiver, |s| !s.loading).await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("flow"), Some(&json!("login")));
    assert_eq!(body.get("identity"), Some(&Value::Null));
}

#[tokio::test]
async fn logout_route_returns_no_content() {
    let fixture = fixture();
    let router = session_router(fixture.session.clone());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/session/logout")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
