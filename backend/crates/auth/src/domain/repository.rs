//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user. A taken email fails with `AuthError::Duplicate`.
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    /// Find user by email
    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Delete a user; owned sessions, lists and todos go with it.
    /// Returns whether a user was removed.
    async fn delete_user(&self, email: &Email) -> AuthResult<bool>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &Session) -> AuthResult<()>;

    /// Find session by ID
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Delete a session
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete all sessions for a user
    async fn delete_sessions_for_user(&self, email: &Email) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}
