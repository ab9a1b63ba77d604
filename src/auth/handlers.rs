//! Auth HTTP handlers: register, login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// POST /register
///
/// The existence pre-check skips the expensive hash for the common duplicate
/// case; the insert itself is the atomic uniqueness check, so a concurrent
/// registration that loses the race surfaces as the same duplicate error.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state.store().exists(&body.email) {
        return Err(AppError::DuplicateAccount);
    }

    let secret_hash = hash_blocking(body.password).await?;
    state.store().insert(body.email, secret_hash)?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// POST /login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let identity = state.store().lookup(&body.email).ok_or_else(|| {
        debug!("login rejected: unknown account");
        AppError::InvalidCredentials
    })?;

    if !verify_blocking(body.password, identity.secret_hash).await? {
        debug!("login rejected: secret mismatch");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens().issue(&identity.email, state.token_ttl)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// Argon2 is CPU-heavy by design; run it on the blocking pool so it holds no
/// lock and does not stall the async workers.
async fn hash_blocking(plaintext: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))?
}

async fn verify_blocking(plaintext: String, digest: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || password::verify(&plaintext, &digest))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))
}
