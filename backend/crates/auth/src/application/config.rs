//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;

use crate::domain::value_object::auth_provider::AuthProvider;
use crate::error::{AuthError, AuthResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Default session cookie name
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "sRpyIJS9Zmerlpcpqhc1B0xxG7w6Gk1b";

/// Default absolute session lifetime (1 hour)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// OAuth client credentials for one provider
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

impl OAuthClientConfig {
    /// Build from three optional values; all must be present and non-empty
    pub fn from_parts(
        client_id: Option<String>,
        client_secret: Option<String>,
        redirect_url: Option<String>,
    ) -> Option<Self> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(Self {
            client_id: non_empty(client_id)?,
            client_secret: non_empty(client_secret)?,
            redirect_url: non_empty(redirect_url)?,
        })
    }
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Absolute session lifetime, no sliding renewal
    pub session_ttl: Duration,
    /// Add `Secure` to the session cookie
    pub cookie_secure: bool,
    /// Add `HttpOnly` to the session cookie
    pub cookie_http_only: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Redirect target after a successful OAuth login
    pub landing_path: String,
    /// `state` sent to OAuth providers
    pub oauth_state: String,
    pub google: Option<OAuthClientConfig>,
    pub github: Option<OAuthClientConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: false,
            cookie_http_only: false,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            landing_path: "/".to_string(),
            oauth_state: "state".to_string(),
            google: None,
            github: None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_http_only", &self.cookie_http_only)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("landing_path", &self.landing_path)
            .field("oauth_state", &self.oauth_state)
            .field("google", &self.google)
            .field("github", &self.github)
            .finish()
    }
}

impl AuthConfig {
    /// Create config for development (no OAuth providers, insecure cookie)
    pub fn development() -> Self {
        Self::default()
    }

    /// Load from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str| {
            lookup(key)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
        };

        let session_ttl = match lookup("SESSION_TTL_SECS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => {
                let ttl = Duration::from_secs(secs);
                if ttl != DEFAULT_SESSION_TTL {
                    tracing::warn!(secs, "Session lifetime overridden, default is one hour");
                }
                ttl
            }
            Some(_) => {
                tracing::warn!("SESSION_TTL_SECS is not a positive integer, using default");
                defaults.session_ttl
            }
            None => defaults.session_ttl,
        };

        Self {
            session_cookie_name: lookup("SESSION_COOKIE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.session_cookie_name),
            session_ttl,
            cookie_secure: flag("COOKIE_SECURE"),
            cookie_http_only: flag("COOKIE_HTTP_ONLY"),
            cookie_same_site: defaults.cookie_same_site,
            password_pepper: lookup("PASSWORD_PEPPER")
                .filter(|v| !v.is_empty())
                .map(String::into_bytes),
            landing_path: lookup("LANDING_PATH")
                .filter(|v| v.starts_with('/'))
                .unwrap_or(defaults.landing_path),
            oauth_state: lookup("OAUTH_STATE")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.oauth_state),
            google: OAuthClientConfig::from_parts(
                lookup("GOOGLE_CLIENT_ID"),
                lookup("GOOGLE_CLIENT_SECRET"),
                lookup("GOOGLE_REDIRECT_URL"),
            ),
            github: OAuthClientConfig::from_parts(
                lookup("GITHUB_CLIENT_ID"),
                lookup("GITHUB_CLIENT_SECRET"),
                lookup("GITHUB_REDIRECT_URL"),
            ),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session lifetime as a chrono duration
    pub fn session_ttl(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))
    }

    /// Cookie attributes for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: self.cookie_http_only,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }

    /// Client credentials for an OAuth provider, if configured
    pub fn oauth_client(&self, provider: AuthProvider) -> Option<&OAuthClientConfig> {
        match provider {
            AuthProvider::Google => self.google.as_ref(),
            AuthProvider::Github => self.github.as_ref(),
            AuthProvider::Local => None,
        }
    }
}
