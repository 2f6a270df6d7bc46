//! Account registration and authentication.

use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidateEmail;

use tabber_auth::{CredentialHasher, PasswordValidator};
use tabber_core::error::AppError;
use tabber_core::result::AppResult;
use tabber_core::types::UserId;
use tabber_database::TreeStore;
use tabber_entity::{CreateUser, User};

/// The account gate: maps verified credentials to a user and root folder.
#[derive(Clone)]
pub struct AccountService {
    /// Store handle.
    store: Arc<dyn TreeStore>,
    /// Credential hasher.
    hasher: Arc<dyn CredentialHasher>,
    /// Password policy.
    validator: PasswordValidator,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Arc<dyn TreeStore>,
        hasher: Arc<dyn CredentialHasher>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
        }
    }

    /// Registers a new account together with its root folder.
    ///
    /// Emails compare case-insensitively; a second registration of the same
    /// address fails with `EmailTaken`.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let email = CreateUser::normalize_email(email);
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }
        self.validator.validate(password)?;

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .store
            .insert_user(&CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(
            user_id = %user.id,
            root_folder_id = %user.root_folder_id,
            "Account registered"
        );
        Ok(user)
    }

    /// Checks credentials and returns the account they belong to.
    ///
    /// Unknown email and wrong password both fail with the same
    /// `InvalidCredentials` error, and both pay for one hash verification.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let email = CreateUser::normalize_email(email);

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            self.hasher.verify_absent(password);
            return Err(AppError::invalid_credentials());
        };

        match self.hasher.verify(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(AppError::invalid_credentials()),
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Stored credential is unreadable");
                Err(AppError::invalid_credentials())
            }
        }
    }

    /// Looks up an account by id.
    pub async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
