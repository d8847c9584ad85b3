//! OAuth Callback Use Case
//!
//! Drives one authorization-code callback to a terminal state:
//!
//! - `AwaitingCode -> TokenExchanged`: trade the code for an access token.
//! - `TokenExchanged -> ProfileFetched`: fetch the remote profile.
//! - `ProfileFetched ->` link, create, or reject against the credential store.
//!
//! Every rejection is an `Err`; no user is created and no session field is
//! touched on any rejected path.

use chrono::Utc;
use std::fmt;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{IssuedSession, SessionIssuer};
use crate::domain::entity::user::User;
use crate::domain::oauth::{OAuthProfile, OAuthProvider, OAuthStage, ProviderError};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Successful terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthOutcome {
    LinkedExisting,
    CreatedNew,
}

impl fmt::Display for OAuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OAuthOutcome::LinkedExisting => "linked_existing",
            OAuthOutcome::CreatedNew => "created_new",
        })
    }
}

pub struct OAuthCallbackOutput {
    pub outcome: OAuthOutcome,
    pub user: User,
    pub session: IssuedSession,
}

pub struct OAuthCallbackUseCase<R, P>
where
    R: UserRepository,
    P: OAuthProvider,
{
    repo: Arc<R>,
    provider: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<R, P> OAuthCallbackUseCase<R, P>
where
    R: UserRepository,
    P: OAuthProvider + Sync,
{
    pub fn new(repo: Arc<R>, provider: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            provider,
            config,
        }
    }

    pub async fn execute(&self, code: Option<&str>) -> AuthResult<OAuthCallbackOutput> {
        let provider = self.provider.provider();

        // AwaitingCode: nothing is sent upstream without a code
        let code = code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or(AuthError::MissingCode)?;

        let access_token = self
            .provider
            .exchange_code(code)
            .await
            .map_err(|source| AuthError::UpstreamProvider { provider, source })?;
        tracing::debug!(provider = %provider, stage = %OAuthStage::TokenExchanged, "OAuth");

        let profile = self
            .provider
            .fetch_profile(&access_token)
            .await
            .map_err(|source| AuthError::UpstreamProvider { provider, source })?;
        tracing::debug!(provider = %provider, stage = %OAuthStage::ProfileFetched, "OAuth");

        let output = self.reconcile(profile).await?;

        tracing::info!(
            provider = %provider,
            user_id = %output.user.user_id,
            outcome = %output.outcome,
            "OAuth login succeeded"
        );

        Ok(output)
    }

    /// ProfileFetched: decide against the credential store
    async fn reconcile(&self, profile: OAuthProfile) -> AuthResult<OAuthCallbackOutput> {
        let provider = self.provider.provider();

        let email = Email::new(&profile.email).map_err(|_| AuthError::UpstreamProvider {
            provider,
            source: ProviderError::ProfileFetch("profile email is not valid".to_string()),
        })?;

        let issuer = SessionIssuer::new(self.repo.clone(), self.config.clone());

        match self.repo.find_by_email(&email).await? {
            None => {
                let user_name = UserName::from_profile(&profile.display_name, email.local_part());
                let password_hash =
                    UserPassword::from_raw(&RawPassword::unusable(), self.config.pepper())?;
                let mut user = User::new(email, user_name, password_hash, provider);

                let session = issuer.start_at(&mut user, Utc::now())?;
                self.repo.create(&user).await?;

                Ok(OAuthCallbackOutput {
                    outcome: OAuthOutcome::CreatedNew,
                    user,
                    session,
                })
            }
            Some(user) if user.is_banned() => Err(AuthError::AccountBanned),
            Some(user) if user.provider != provider => Err(AuthError::ProviderConflict {
                existing: user.provider,
                attempted: provider,
            }),
            Some(mut user) => {
                let session = issuer.issue(&mut user).await?;

                Ok(OAuthCallbackOutput {
                    outcome: OAuthOutcome::LinkedExisting,
                    user,
                    session,
                })
            }
        }
    }
}
