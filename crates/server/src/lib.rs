//! HTTP node for powchain.
//!
//! Wraps one shared ledger in an axum router. The binary in `main.rs` adds
//! configuration, logging and the listener.

pub mod api;
pub mod config;
pub mod error;

pub use api::{router, AppState};
pub use config::Config;
pub use error::ApiError;
