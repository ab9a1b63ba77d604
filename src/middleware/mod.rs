//! Request middleware: the bearer-token gate for protected routes.

pub mod auth;

pub use auth::AuthClaims;
