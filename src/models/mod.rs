//! Domain records.

mod identity;

pub use identity::Identity;
