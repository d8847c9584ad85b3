//! User Entity
//!
//! Forum account: identity, credentials, role, and the embedded session.

use chrono::{DateTime, Utc};

use crate::domain::entity::session::Session;
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique, lowercased
    pub email: Email,
    pub user_name: UserName,
    /// Argon2id PHC string; random and unknown for federated accounts
    pub password_hash: UserPassword,
    pub user_role: UserRole,
    /// Which flow created the account
    pub provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    /// At most one active session per user
    pub session: Option<Session>,
}

impl User {
    /// Create a new account with role `user` and no session
    pub fn new(
        email: Email,
        user_name: UserName,
        password_hash: UserPassword,
        provider: AuthProvider,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            user_name,
            password_hash,
            user_role: UserRole::default(),
            provider,
            created_at: Utc::now(),
            session: None,
        }
    }

    pub fn is_banned(&self) -> bool {
        self.user_role.is_banned()
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    /// Replace any previous session
    pub fn start_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Whether `presented` resolves to this user's live session
    pub fn has_session(&self, presented: &str, now: DateTime<Utc>) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.accepts(presented, now))
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
    }
}
