//! The account gate: registration and credential checks.

pub mod service;

pub use service::AccountService;
