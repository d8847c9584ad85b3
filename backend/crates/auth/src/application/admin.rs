//! Admin Use Case
//!
//! User management for admins. Every operation re-checks the caller's
//! identity and reads the store directly.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::identity::RequestIdentity;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct AdminUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> AdminUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All users (admin panel, reports)
    pub async fn list_users(&self, identity: &RequestIdentity) -> AuthResult<Vec<User>> {
        identity.require_admin()?;
        self.repo.list().await
    }

    /// Change a user's role; banning keeps any live session (see identity)
    pub async fn set_role(
        &self,
        identity: &RequestIdentity,
        user_id: &UserId,
        role: UserRole,
    ) -> AuthResult<User> {
        let admin = identity.require_admin()?;

        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let previous = user.user_role;
        self.repo.update_role(&user.user_id, role).await?;
        user.set_role(role);

        tracing::info!(
            admin_id = %admin.user_id,
            user_id = %user.user_id,
            from = %previous,
            to = %role,
            "User role changed"
        );

        Ok(user)
    }

    pub async fn delete_user(&self, identity: &RequestIdentity, user_id: &UserId) -> AuthResult<()> {
        let admin = identity.require_admin()?;

        if !self.repo.delete(user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(admin_id = %admin.user_id, user_id = %user_id, "User deleted");
        Ok(())
    }
}
