//! # tabber-core
//!
//! Core crate for Tabber. Contains configuration schemas, typed
//! identifiers, the slash-delimited path grammar, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Tabber crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
