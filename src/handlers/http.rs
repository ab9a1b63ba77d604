//! HTTP handlers: protected dashboard and health.

use axum::{http::StatusCode, Json};
use chrono::Duration;
use serde::Serialize;
use serde_json::json;

use crate::auth::{Claims, TokenService};
use crate::middleware::AuthClaims;
use crate::store::CredentialStore;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: CredentialStore,
    pub tokens: TokenService,
    /// Lifetime of issued tokens (1 hour by default, see config).
    pub token_ttl: Duration,
}

impl AppState {
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub user: Claims,
}

/// GET /dashboard — protected; the extractor has already verified the token.
pub async fn dashboard(AuthClaims(claims): AuthClaims) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: "Welcome to protected dashboard".to_string(),
        user: claims,
    })
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "authd" })),
    )
}
