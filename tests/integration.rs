//! Integration tests: health, register/login, protected dashboard access.
//!
//! Everything is in-process and in-memory; no external services are needed.
//! Run with `cargo test`.

use authd::auth::TokenService;
use authd::store::CredentialStore;
use authd::{create_app, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

fn test_state() -> AppState {
    AppState {
        store: CredentialStore::new(),
        tokens: TokenService::new("test-jwt-secret-min-32-chars!!".to_string()),
        token_ttl: chrono::Duration::hours(1),
    }
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = create_app(test_state());
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn register_login_and_access_dashboard() {
    let app = create_app(test_state());

    // Register.
    let req = json_post(
        "/register",
        serde_json::json!({ "email": "alice@example.com", "password": "pw123" }),
    );
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "register should succeed");
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("User registered successfully")
    );

    // Duplicate register.
    let req = json_post(
        "/register",
        serde_json::json!({ "email": "alice@example.com", "password": "pw123" }),
    );
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("User already exists")
    );

    // Wrong password.
    let req = json_post(
        "/login",
        serde_json::json!({ "email": "alice@example.com", "password": "wrongpw" }),
    );
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("Invalid credentials")
    );

    // Correct login.
    let req = json_post(
        "/login",
        serde_json::json!({ "email": "alice@example.com", "password": "pw123" }),
    );
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login should succeed");
    let json = body_json(res).await;
    let token = json
        .get("token")
        .and_then(|v| v.as_str())
        .expect("response should contain token")
        .to_string();

    // Protected route with the issued token.
    let req = Request::builder()
        .uri("/dashboard")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(
        json.pointer("/user/email").and_then(|v| v.as_str()),
        Some("alice@example.com")
    );

    // No authorization header.
    let req = Request::builder()
        .uri("/dashboard")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("Token missing")
    );

    // Tampered token.
    let tampered = format!("{}x", token);
    let req = Request::builder()
        .uri("/dashboard")
        .header("authorization", format!("Bearer {}", tampered))
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("Invalid token")
    );
}

#[tokio::test]
async fn login_unknown_email_matches_wrong_password_error() {
    let app = create_app(test_state());
    let req = json_post(
        "/login",
        serde_json::json!({ "email": "nobody@example.com", "password": "whatever" }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("Invalid credentials")
    );
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = create_app(test_state());
    let req = json_post(
        "/register",
        serde_json::json!({ "email": "not-an-email", "password": "pw123" }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expired_token_is_rejected_as_invalid() {
    let state = test_state();
    let expired = state
        .tokens
        .issue("alice@example.com", chrono::Duration::seconds(-60))
        .unwrap();
    let app = create_app(state);
    let req = Request::builder()
        .uri("/dashboard")
        .header("authorization", format!("Bearer {}", expired))
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(
        json.get("message").and_then(|v| v.as_str()),
        Some("Invalid token")
    );
}

#[tokio::test]
async fn concurrent_registration_yields_one_account() {
    let state = test_state();
    let app = create_app(state.clone());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let req = json_post(
                "/register",
                serde_json::json!({ "email": "race@example.com", "password": "pw123" }),
            );
            app.oneshot(req).await.unwrap().status()
        }));
    }

    let mut ok = 0;
    let mut dup = 0;
    for h in handles {
        match h.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::BAD_REQUEST => dup += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(ok, 1, "exactly one registration should win");
    assert_eq!(dup, 3);
    assert!(state.store.exists("race@example.com"));
}
