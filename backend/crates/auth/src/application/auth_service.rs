//! Authentication Service
//!
//! Verifies credentials and establishes, resumes and ends sessions.
//! Built once at startup and shared through the router state.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::application::user_controller::{Credentials, UserController};
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct AuthService<R>
where
    R: UserRepository + SessionRepository,
{
    repo: Arc<R>,
    users: UserController<R>,
    config: Arc<AuthConfig>,
}

impl<R> AuthService<R>
where
    R: UserRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            users: UserController::new(repo.clone(), config.clone()),
            repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn users(&self) -> &UserController<R> {
        &self.users
    }

    /// Create an account. A taken email fails with Conflict.
    pub async fn register_user(&self, credentials: Credentials) -> AuthResult<User> {
        let user = self.users.create_user(credentials).await?;
        tracing::info!(email = %user.email, "User registered");
        Ok(user)
    }

    /// Check credentials against the stored user
    pub async fn authenticate(&self, credentials: Credentials) -> AuthResult<User> {
        let (email, password) = credentials.into_parts()?;

        // An email that cannot be registered cannot be on file either
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;
        let user = self.users.get_user_by_email(&email).await?;

        let raw = RawPassword::new(password).map_err(|_| AuthError::IncorrectPassword)?;
        if !self.users.verify_password(&user, &raw) {
            return Err(AuthError::IncorrectPassword);
        }

        Ok(user)
    }

    /// Session key for a user
    pub fn serialize(&self, user: &User) -> Email {
        user.email.clone()
    }

    /// Reconstitute the user behind a session key. A deleted user is `None`.
    pub async fn deserialize(&self, email: &Email) -> AuthResult<Option<User>> {
        self.users.find_user(email).await
    }

    /// Start a session and return the signed cookie token
    pub async fn login(&self, user: &User) -> AuthResult<String> {
        let session = Session::new(self.serialize(user), self.config.session_ttl_chrono());
        self.repo.create_session(&session).await?;

        tracing::info!(
            email = %user.email,
            session_id = %session.session_id,
            "User logged in"
        );

        session_token::sign(&self.config.session_secret, session.session_id)
    }

    /// End the session behind a token. Badly signed tokens are ignored.
    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        if let Some(session_id) = session_token::verify(&self.config.session_secret, token) {
            self.repo.delete_session(session_id).await?;
            tracing::info!(session_id = %session_id, "User logged out");
        }
        Ok(())
    }

    /// Resolve a cookie token to its user
    ///
    /// Missing, expired or forged sessions are `None`; store failures are
    /// returned as errors.
    pub async fn resume(&self, token: &str) -> AuthResult<Option<User>> {
        let Some(session_id) = session_token::verify(&self.config.session_secret, token) else {
            return Ok(None);
        };

        let Some(session) = self.repo.find_session(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.repo.delete_session(session_id).await?;
            return Ok(None);
        }

        self.deserialize(&session.email).await
    }

    /// Remove the account together with everything it owns
    pub async fn delete_account(&self, user: &User) -> AuthResult<()> {
        let sessions = self.repo.delete_sessions_for_user(&user.email).await?;
        self.users.delete_user(user).await?;
        tracing::info!(email = %user.email, sessions, "Account deleted");
        Ok(())
    }

    pub async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        self.repo.cleanup_expired_sessions().await
    }
}
