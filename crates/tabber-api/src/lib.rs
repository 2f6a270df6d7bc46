//! # tabber-api
//!
//! HTTP API layer for Tabber built on Axum.
//!
//! A thin shim over `tabber-service`: it parses paths and bodies, checks
//! Basic credentials through the account gate, calls one service operation
//! per route and maps error kinds to status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
