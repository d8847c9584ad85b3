//! Sign Out Use Case
//!
//! Clears the session a cookie token refers to.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionIssuer;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Revoke the session holding `token`; returns whether one was cleared
    pub async fn execute(&self, token: &str) -> AuthResult<bool> {
        let Some(mut user) = self.repo.find_by_session_token(token).await? else {
            return Ok(false);
        };

        let holds_token = user
            .session
            .as_ref()
            .is_some_and(|session| session.token.matches(token));
        if !holds_token {
            return Ok(false);
        }

        SessionIssuer::new(self.repo.clone(), self.config.clone())
            .revoke(&mut user)
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed out");
        Ok(true)
    }

    /// `Set-Cookie` value expiring the session cookie
    pub fn clear_cookie(&self) -> String {
        SessionIssuer::new(self.repo.clone(), self.config.clone()).clear_cookie()
    }
}
