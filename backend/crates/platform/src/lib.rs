//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Session cookie building and parsing
//! - Secret generation and decoding

pub mod cookie;
pub mod crypto;
pub mod password;
