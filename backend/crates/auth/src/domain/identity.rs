//! Request Identity
//!
//! Resolved once per request by the identity middleware and read by every
//! handler through the [`RequestIdentity`] extractor. All authorization
//! predicates live here.
//!
//! A banned account may still hold a live session. It stays logged in, but
//! every other predicate denies it.

use crate::domain::entity::user::User;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub enum RequestIdentity {
    #[default]
    Anonymous,
    Authenticated(Box<User>),
}

impl RequestIdentity {
    pub fn authenticated(user: User) -> Self {
        Self::Authenticated(Box::new(user))
    }

    /// The resolved user, if any
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Resolved user that has not been banned
    fn active_user(&self) -> Option<&User> {
        self.user().filter(|user| !user.is_banned())
    }

    pub fn is_logged_in(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.active_user().is_some_and(User::is_admin)
    }

    pub fn is_owner(&self, owner_id: &UserId) -> bool {
        self.active_user()
            .is_some_and(|user| &user.user_id == owner_id)
    }

    /// Edit/delete policy for owned content
    pub fn can_modify(&self, owner_id: &UserId) -> bool {
        self.is_owner(owner_id) || self.is_admin()
    }

    pub fn require_login(&self) -> AuthResult<&User> {
        self.user().ok_or(AuthError::LoginRequired)
    }

    /// Admin-only screens: `isLoggedIn AND isAdmin`
    pub fn require_admin(&self) -> AuthResult<&User> {
        let user = self.require_login()?;
        if self.is_admin() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden)
        }
    }

    pub fn require_modify(&self, owner_id: &UserId) -> AuthResult<&User> {
        let user = self.require_login()?;
        if self.can_modify(owner_id) {
            Ok(user)
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
