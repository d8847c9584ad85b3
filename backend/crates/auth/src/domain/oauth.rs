//! OAuth Provider Seam
//!
//! The callback flow moves through
//! `AwaitingCode -> TokenExchanged -> ProfileFetched` and ends in
//! `LinkedExisting`, `CreatedNew`, or `Rejected`. Network calls are behind
//! [`OAuthProvider`] so the flow can run against scripted providers.

use std::fmt;
use thiserror::Error;

use crate::domain::value_object::auth_provider::AuthProvider;

/// Non-terminal stages of a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthStage {
    AwaitingCode,
    TokenExchanged,
    ProfileFetched,
}

impl fmt::Display for OAuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OAuthStage::AwaitingCode => "awaiting_code",
            OAuthStage::TokenExchanged => "token_exchanged",
            OAuthStage::ProfileFetched => "profile_fetched",
        })
    }
}

/// Access token returned by the provider's token endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Remote profile used to reconcile against the credential store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    /// Primary email; the federation join key
    pub email: String,
    /// Display name (Google) or login (GitHub)
    pub display_name: String,
}

/// Failure talking to a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("token response carried no access token")]
    MissingAccessToken,

    #[error("profile fetch failed: {0}")]
    ProfileFetch(String),

    #[error("no primary email on the account")]
    NoPrimaryEmail,
}

impl ProviderError {
    /// Stage the flow had reached when this failure occurred
    pub fn stage(&self) -> OAuthStage {
        match self {
            ProviderError::TokenExchange(_) | ProviderError::MissingAccessToken => {
                OAuthStage::AwaitingCode
            }
            ProviderError::ProfileFetch(_) | ProviderError::NoPrimaryEmail => {
                OAuthStage::TokenExchanged
            }
        }
    }
}

/// Outbound calls for one OAuth provider
#[trait_variant::make(OAuthProvider: Send)]
pub trait LocalOAuthProvider {
    /// Which provider this client talks to
    fn provider(&self) -> AuthProvider;

    /// Authorization URL the browser is redirected to
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ProviderError>;

    /// Fetch the remote profile with an access token
    async fn fetch_profile(&self, token: &AccessToken) -> Result<OAuthProfile, ProviderError>;
}
