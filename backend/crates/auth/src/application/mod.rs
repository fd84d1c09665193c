//! Application Layer
//!
//! Use cases and application services.

pub mod auth_service;
pub mod config;
pub mod session_token;
pub mod user_controller;

// Re-exports
pub use auth_service::AuthService;
pub use config::AuthConfig;
pub use user_controller::{Credentials, UserController};
