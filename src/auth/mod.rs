//! Authentication: password hashing, token service, register/login handlers.

mod handlers;
pub mod password;
mod token;

pub use handlers::{login, register};
pub use token::{Claims, TokenError, TokenService};
