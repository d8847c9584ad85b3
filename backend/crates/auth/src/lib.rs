//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and provider traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and OAuth HTTP implementations
//! - `presentation/` - HTTP handlers, DTOs, router, identity middleware
//!
//! ## Features
//! - Local registration and email + password login
//! - Google and GitHub OAuth login with account linking by email
//! - One cookie-backed session per user, absolute one-hour lifetime
//! - Roles `user`, `admin`, `ban` and the authorization predicates built on them
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Session tokens are 256-bit random values compared in constant time
//! - Banned accounts cannot start a session and lose every permission
//! - An email belongs to exactly one provider

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, OAuthClientConfig};
pub use domain::identity::RequestIdentity;
pub use error::{AuthError, AuthResult};
pub use infra::{oauth::HttpOAuthClient, postgres::PgUserRepository};
pub use presentation::{handlers::AuthAppState, router::auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
