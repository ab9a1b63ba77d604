//! Application error types for robust error handling.
//!
//! The four caller-facing kinds deliberately hide their internal cause:
//! `InvalidCredentials` covers both unknown email and wrong password, and
//! `InvalidToken` covers malformed, bad-signature and expired tokens alike.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::TokenError;
use crate::store::AlreadyExists;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User already exists")]
    DuplicateAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token missing")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Every token-verification failure collapses into one caller-visible kind.
impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed | TokenError::BadSignature | TokenError::Expired => {
                AppError::InvalidToken
            }
        }
    }
}

impl From<AlreadyExists> for AppError {
    fn from(_: AlreadyExists) -> Self {
        AppError::DuplicateAccount
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DuplicateAccount => {
                (StatusCode::BAD_REQUEST, "User already exists".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "Token missing".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", e),
            ),
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
