//! Check Session Use Case
//!
//! Resolves a cookie token into a request identity. Never fails the request
//! for a missing, unknown, or expired token; those resolve to anonymous.
//! Expired sessions are left in place until the next login or logout.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::identity::RequestIdentity;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn resolve(&self, token: Option<&str>) -> AuthResult<RequestIdentity> {
        self.resolve_at(token, Utc::now()).await
    }

    pub async fn resolve_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<RequestIdentity> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(RequestIdentity::Anonymous);
        };

        let Some(user) = self.repo.find_by_session_token(token).await? else {
            tracing::debug!("Session token not found");
            return Ok(RequestIdentity::Anonymous);
        };

        if !user.has_session(token, now) {
            tracing::debug!(user_id = %user.user_id, "Session expired");
            return Ok(RequestIdentity::Anonymous);
        }

        Ok(RequestIdentity::authenticated(user))
    }
}
