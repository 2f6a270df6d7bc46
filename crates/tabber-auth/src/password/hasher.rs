//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use tabber_core::config::AuthConfig;
use tabber_core::error::AppError;

/// Turns passwords into opaque stored credentials and checks them.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Check a plaintext password against a stored credential.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;

    /// Do the work of one verification against a credential nobody owns.
    ///
    /// Called when the account does not exist so the unknown-email path
    /// costs the same as a wrong password.
    fn verify_absent(&self, password: &str);
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with the cost parameters from configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash("tabber-absent-account")?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    ///
    /// Verification uses the parameters embedded in the stored hash, so
    /// credentials survive a change of configured cost.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    fn verify_absent(&self, password: &str) {
        if let Err(e) = self.verify(password, &self.dummy_hash) {
            tracing::warn!(error = %e, "Dummy credential check failed");
        }
    }
}
