//! User Controller
//!
//! Shape checks and error translation in front of [`UserRepository`].

use std::sync::Arc;

use kernel::validate::{required, required_text};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// Email + password pair as submitted by a client
///
/// Both fields are optional here so that absence is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Check that both fields are present
    pub(crate) fn into_parts(self) -> AuthResult<(String, String)> {
        let email = required_text("email", self.email)?;
        let password = required("password", self.password)?;
        Ok((email, password))
    }
}

pub struct UserController<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UserController<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Load a user that must exist
    pub async fn get_user_by_email(&self, email: &Email) -> AuthResult<User> {
        self.find_user(email).await?.ok_or(AuthError::UserNotFound)
    }

    pub async fn find_user(&self, email: &Email) -> AuthResult<Option<User>> {
        self.repo.find_user_by_email(email).await
    }

    /// Validate, hash and persist a new user
    pub async fn create_user(&self, credentials: Credentials) -> AuthResult<User> {
        let (email, password) = credentials.into_parts()?;
        let email = Email::new(email)?;
        let raw = RawPassword::new(password)?;
        let password = UserPassword::from_raw(&raw, self.config.pepper())?;

        let user = User::new(email, password);

        match self.repo.create_user(&user).await {
            Ok(()) => Ok(user),
            Err(AuthError::Duplicate) => Err(AuthError::EmailTaken),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_user(&self, user: &User) -> AuthResult<()> {
        if !self.repo.delete_user(&user.email).await? {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    pub fn verify_password(&self, user: &User, raw: &RawPassword) -> bool {
        user.password.verify(raw, self.config.pepper())
    }
}
