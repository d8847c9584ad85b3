//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Secure random tokens and constant-time comparison
//! - Password hashing (Argon2id, NIST SP 800-63B compliant policy)
//! - Cookie header building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
