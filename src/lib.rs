//! Minimal credential-issuance and session-verification service.
//!
//! Registers account identities, authenticates them against argon2-hashed
//! secrets, and issues time-bounded JWT bearer tokens that gate access to
//! protected routes. Sessions are stateless: validity is signature + expiry,
//! nothing is tracked server-side.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use store::CredentialStore;

use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/dashboard", get(handlers::http::dashboard))
        .route("/health", get(handlers::http::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
