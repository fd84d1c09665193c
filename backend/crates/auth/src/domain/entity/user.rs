//! User Entity
//!
//! A registered account. The email is the identity key; users are created
//! by registration and deleted explicitly, never otherwise mutated.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Identity key (unique, lower case)
    pub email: Email,
    /// Argon2id credential
    pub password: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password: UserPassword) -> Self {
        // Postgres keeps microseconds; truncate so a stored user equals its loaded copy
        let now = DateTime::from_timestamp_micros(Utc::now().timestamp_micros())
            .unwrap_or_else(Utc::now);

        Self {
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }
}
