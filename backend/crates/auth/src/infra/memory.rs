//! In-Memory Repository Implementations
//!
//! Process-local store used by tests and when no database is configured.
//! Enforces the same uniqueness and cascade rules as the schema.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<Email, User>,
    sessions: HashMap<Uuid, Session>,
}

/// In-memory auth repository; clones share the same tables
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.email) {
            return Err(AuthError::Duplicate);
        }
        tables.users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.tables.read().await.users.get(email).cloned())
    }

    async fn delete_user(&self, email: &Email) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.users.remove(email).is_some();
        tables.sessions.retain(|_, s| &s.email != email);
        Ok(removed)
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key on sessions.email
        if !tables.users.contains_key(&session.email) {
            return Err(AuthError::Internal(format!(
                "Session references unknown user {}",
                session.email
            )));
        }
        tables.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        Ok(self.tables.read().await.sessions.get(&session_id).cloned())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.tables.write().await.sessions.remove(&session_id);
        Ok(())
    }

    async fn delete_sessions_for_user(&self, email: &Email) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| &s.email != email);
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - tables.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    fn user(email: &str) -> User {
        let raw = RawPassword::new("p".to_string()).unwrap();
        User::new(
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = InMemoryAuthRepository::new();
        repo.create_user(&user("a@x.com")).await.unwrap();

        let err = repo.create_user(&user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Duplicate));
    }

    #[tokio::test]
    async fn test_find_returns_equal_user() {
        let repo = InMemoryAuthRepository::new();
        let u = user("a@x.com");
        repo.create_user(&u).await.unwrap();

        let found = repo.find_user_by_email(&u.email).await.unwrap();
        assert_eq!(found, Some(u));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_sessions() {
        let repo = InMemoryAuthRepository::new();
        let u = user("a@x.com");
        repo.create_user(&u).await.unwrap();

        let session = Session::new(u.email.clone(), chrono::Duration::hours(1));
        repo.create_session(&session).await.unwrap();

        assert!(repo.delete_user(&u.email).await.unwrap());
        assert!(repo.find_session(session.session_id).await.unwrap().is_none());
        assert!(!repo.delete_user(&u.email).await.unwrap());
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let repo = InMemoryAuthRepository::new();
        let u = user("a@x.com");
        repo.create_user(&u).await.unwrap();

        let live = Session::new(u.email.clone(), chrono::Duration::hours(1));
        let stale = Session::new(u.email.clone(), chrono::Duration::seconds(-5));
        repo.create_session(&live).await.unwrap();
        repo.create_session(&stale).await.unwrap();

        assert_eq!(repo.cleanup_expired_sessions().await.unwrap(), 1);
        assert!(repo.find_session(live.session_id).await.unwrap().is_some());
        assert!(repo.find_session(stale.session_id).await.unwrap().is_none());
    }
}
