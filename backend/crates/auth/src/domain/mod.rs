//! Domain Layer
//!
//! Contains entities, value objects, repository traits, the request
//! identity used by authorization checks, and the OAuth provider seam.

pub mod entity;
pub mod identity;
pub mod oauth;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session::Session, user::User};
pub use identity::RequestIdentity;
pub use oauth::{OAuthProfile, OAuthProvider};
pub use repository::UserRepository;
