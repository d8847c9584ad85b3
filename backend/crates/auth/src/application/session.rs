//! Session Issuer
//!
//! Mints and revokes the single session embedded in a user record, and
//! builds the matching cookie headers.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// A freshly issued session and its cookie
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
    /// `Set-Cookie` value carrying the token
    pub set_cookie: String,
}

pub struct SessionIssuer<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SessionIssuer<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Start a new session, overwriting any previous one
    pub async fn issue(&self, user: &mut User) -> AuthResult<IssuedSession> {
        self.issue_at(user, Utc::now()).await
    }

    pub async fn issue_at(&self, user: &mut User, now: DateTime<Utc>) -> AuthResult<IssuedSession> {
        let issued = self.start_at(user, now)?;
        self.repo
            .update_session(&user.user_id, user.session.as_ref())
            .await?;

        tracing::debug!(
            user_id = %user.user_id,
            expires_at = %issued.expires_at,
            "Session issued"
        );

        Ok(issued)
    }

    /// Attach a new session to `user` without writing it
    ///
    /// For accounts that are about to be inserted with the session already set.
    pub fn start_at(&self, user: &mut User, now: DateTime<Utc>) -> AuthResult<IssuedSession> {
        let session = Session::issue(now, self.config.session_ttl()?);
        user.start_session(session.clone());

        let set_cookie = self
            .config
            .cookie()
            .build_set_cookie(session.token.as_str(), session.expires_at);

        Ok(IssuedSession {
            token: session.token,
            expires_at: session.expires_at,
            set_cookie,
        })
    }

    /// Clear the stored session
    pub async fn revoke(&self, user: &mut User) -> AuthResult<()> {
        user.clear_session();
        self.repo.update_session(&user.user_id, None).await?;

        tracing::debug!(user_id = %user.user_id, "Session revoked");
        Ok(())
    }

    /// `Set-Cookie` value that expires the session cookie immediately
    pub fn clear_cookie(&self) -> String {
        self.config.cookie().build_delete_cookie()
    }
}
