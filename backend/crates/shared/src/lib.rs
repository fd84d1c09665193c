//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The error taxonomy (`ErrorKind`, `AppError`) and the HTTP boundary handler
//! - Typed ID wrappers for lists and todos
//! - Cross-cutting validation rules for request payloads
//! - Request extractors that normalize rejections into the taxonomy
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    #[cfg(feature = "axum")]
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod validate;
