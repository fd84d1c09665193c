//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - `AuthService`, `UserController`, config
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session gate
//!
//! ## Features
//! - Registration and login with email + password
//! - Server-side sessions referenced by an HMAC-signed, HTTP-only cookie
//! - A route layer that redirects anonymous requests to `/login`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Sessions expire after a fixed TTL and are purged at startup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::{AuthConfig, AuthService, Credentials, UserController};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::{session::Session, user::User};
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
