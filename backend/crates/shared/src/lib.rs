//! Shared kernel
//!
//! Vocabulary both the account and the listing crates speak:
//! the error type handlers answer with, and typed identifiers.

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod problem;
}
pub mod id;
