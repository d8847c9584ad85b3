//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::AuthResult;

/// User (credential store) repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a duplicate email fails with `EmailTaken`
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// All users, oldest first
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find the user currently holding this session token
    ///
    /// Expiry is not checked here.
    async fn find_by_session_token(&self, token: &str) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Overwrite the session columns only; `None` clears them
    async fn update_session(&self, user_id: &UserId, session: Option<&Session>) -> AuthResult<()>;

    /// Overwrite the role column only
    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<()>;

    /// Delete user; returns whether a row was removed
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
