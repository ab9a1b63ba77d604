//! Access gate: Bearer-token extractor for protected handlers.

use axum::http::header::AUTHORIZATION;
use tracing::debug;

use crate::auth::Claims;
use crate::error::AppError;
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extractor: verified claims from the `Authorization: Bearer <token>` header.
///
/// A missing header is `MissingToken`; anything else that fails (no Bearer
/// prefix, bad signature, expired, unparseable) is `InvalidToken`.
#[derive(Clone, Debug)]
pub struct AuthClaims(pub Claims);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::MissingToken)?;
        let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
            debug!("rejected request: authorization header is not a bearer token");
            AppError::InvalidToken
        })?;
        let claims = state.tokens().verify(token).map_err(|e| {
            debug!(cause = %e, "rejected request: token verification failed");
            AppError::from(e)
        })?;
        Ok(AuthClaims(claims))
    }
}
