//! # tabber-auth
//!
//! The credential collaborator behind account registration and login.
//!
//! ## Modules
//!
//! - `password` - Argon2id hashing, verification and password policy

pub mod password;

pub use password::{CredentialHasher, PasswordHasher, PasswordValidator};
