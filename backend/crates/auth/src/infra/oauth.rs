//! OAuth Provider Clients
//!
//! `reqwest` implementations of [`OAuthProvider`] for Google and GitHub.
//! Each call is made once with a timeout; failures are not retried.

use reqwest::{StatusCode, Url, header};
use serde::Deserialize;
use std::time::Duration;

use crate::application::config::OAuthClientConfig;
use crate::domain::oauth::{AccessToken, OAuthProfile, OAuthProvider, ProviderError};
use crate::domain::value_object::auth_provider::AuthProvider;
use crate::error::{AuthError, AuthResult};

/// Per-request timeout for provider calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("forum-auth/", env!("CARGO_PKG_VERSION"));

struct Endpoints {
    authorize: &'static str,
    token: &'static str,
    profile: &'static str,
    /// GitHub only: list of addresses with a primary flag
    emails: Option<&'static str>,
    scope: &'static str,
}

static GOOGLE: Endpoints = Endpoints {
    authorize: "https://accounts.google.com/o/oauth2/auth",
    token: "https://oauth2.googleapis.com/token",
    profile: "https://www.googleapis.com/oauth2/v2/userinfo",
    emails: None,
    scope: "email profile",
};

static GITHUB: Endpoints = Endpoints {
    authorize: "https://github.com/login/oauth/authorize",
    token: "https://github.com/login/oauth/access_token",
    profile: "https://api.github.com/user",
    emails: Some("https://api.github.com/user/emails"),
    scope: "user:email",
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    #[serde(default)]
    primary: bool,
}

/// Pick the address the provider flags as primary
fn select_primary_email(emails: &[GithubEmail]) -> Option<&str> {
    emails
        .iter()
        .find(|entry| entry.primary)
        .map(|entry| entry.email.as_str())
}

/// Primary entry of the email list if there is one, else the profile's own
/// address; empty strings count as missing
fn choose_email(
    listed: Option<&[GithubEmail]>,
    profile_email: Option<String>,
) -> Result<String, ProviderError> {
    listed
        .and_then(select_primary_email)
        .map(str::to_string)
        .or(profile_email)
        .filter(|email| !email.is_empty())
        .ok_or(ProviderError::NoPrimaryEmail)
}

/// HTTP client for one OAuth provider
#[derive(Clone)]
pub struct HttpOAuthClient {
    provider: AuthProvider,
    endpoints: &'static Endpoints,
    credentials: OAuthClientConfig,
    http: reqwest::Client,
}

impl HttpOAuthClient {
    pub fn new(provider: AuthProvider, credentials: OAuthClientConfig) -> AuthResult<Self> {
        let endpoints = match provider {
            AuthProvider::Google => &GOOGLE,
            AuthProvider::Github => &GITHUB,
            AuthProvider::Local => return Err(AuthError::ProviderNotConfigured(provider)),
        };

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AuthError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            provider,
            endpoints,
            credentials,
            http,
        })
    }

    async fn get_json<T>(&self, url: &str, token: &AccessToken) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::ProfileFetch(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::ProfileFetch(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::ProfileFetch(e.to_string()))
    }

    async fn fetch_google_profile(&self, token: &AccessToken) -> Result<OAuthProfile, ProviderError> {
        let info: GoogleUserInfo = self.get_json(self.endpoints.profile, token).await?;
        let email = choose_email(None, info.email)?;

        Ok(OAuthProfile {
            email,
            display_name: info.name,
        })
    }

    async fn fetch_github_profile(&self, token: &AccessToken) -> Result<OAuthProfile, ProviderError> {
        let user: GithubUser = self.get_json(self.endpoints.profile, token).await?;

        let listed = match self.endpoints.emails {
            Some(url) => match self.get_json::<Vec<GithubEmail>>(url, token).await {
                Ok(emails) => Some(emails),
                Err(e) => {
                    tracing::warn!(error = %e, "GitHub email list unavailable, using profile email");
                    None
                }
            },
            None => None,
        };

        let email = choose_email(listed.as_deref(), user.email)?;

        Ok(OAuthProfile {
            email,
            display_name: user.login,
        })
    }
}

impl OAuthProvider for HttpOAuthClient {
    fn provider(&self) -> AuthProvider {
        self.provider
    }

    fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("redirect_uri", self.credentials.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", self.endpoints.scope),
            ("state", state),
        ];
        match Url::parse_with_params(self.endpoints.authorize, &params) {
            Ok(url) => url.to_string(),
            Err(_) => self.endpoints.authorize.to_string(),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ProviderError> {
        let form = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.credentials.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(self.endpoints.token)
            .header(header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::TokenExchange(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::TokenExchange(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::TokenExchange(e.to_string()))?;

        token_from_response(body)
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<OAuthProfile, ProviderError> {
        match self.provider {
            AuthProvider::Github => self.fetch_github_profile(token).await,
            _ => self.fetch_google_profile(token).await,
        }
    }
}

/// GitHub answers a bad code with 200 and an `error` field
fn token_from_response(body: TokenResponse) -> Result<AccessToken, ProviderError> {
    if let Some(error) = body.error {
        let detail = body.error_description.unwrap_or_default();
        return Err(ProviderError::TokenExchange(
            format!("{error} {detail}").trim().to_string(),
        ));
    }

    body.access_token
        .filter(|token| !token.is_empty())
        .map(AccessToken::new)
        .ok_or(ProviderError::MissingAccessToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn credentials() -> OAuthClientConfig {
        OAuthClientConfig {
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_url: "http://localhost:8080/oauth/github/callback".to_string(),
        }
    }

    fn query(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_github_authorize_url() {
        let client = HttpOAuthClient::new(AuthProvider::Github, credentials()).unwrap();
        let url = client.authorize_url("state");

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        let params = query(&url);
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(
            params["redirect_uri"],
            "http://localhost:8080/oauth/github/callback"
        );
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["scope"], "user:email");
        assert_eq!(params["state"], "state");
        assert!(!params.contains_key("client_secret"));
    }

    #[test]
    fn test_google_authorize_url() {
        let client = HttpOAuthClient::new(AuthProvider::Google, credentials()).unwrap();
        let url = client.authorize_url("xyz");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        let params = query(&url);
        assert_eq!(params["scope"], "email profile");
        assert_eq!(params["state"], "xyz");
    }

    #[test]
    fn test_local_is_not_an_oauth_provider() {
        assert!(matches!(
            HttpOAuthClient::new(AuthProvider::Local, credentials()),
            Err(AuthError::ProviderNotConfigured(AuthProvider::Local))
        ));
    }

    #[test]
    fn test_select_primary_email() {
        let emails: Vec<GithubEmail> = serde_json::from_str(
            r#"[
                {"email": "old@example.com", "primary": false, "verified": true},
                {"email": "alice@example.com", "primary": true, "verified": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(select_primary_email(&emails), Some("alice@example.com"));

        let none: Vec<GithubEmail> =
            serde_json::from_str(r#"[{"email": "x@example.com", "primary": false}]"#).unwrap();
        assert_eq!(select_primary_email(&none), None);
        assert_eq!(select_primary_email(&[]), None);
    }

    #[test]
    fn test_choose_email() {
        let emails: Vec<GithubEmail> = serde_json::from_str(
            r#"[
                {"email": "work@example.com", "primary": false},
                {"email": "alice@example.com", "primary": true}
            ]"#,
        )
        .unwrap();
        let no_primary: Vec<GithubEmail> =
            serde_json::from_str(r#"[{"email": "work@example.com", "primary": false}]"#).unwrap();
        let public = || Some("public@example.com".to_string());

        // Primary entry wins over the profile address
        assert_eq!(
            choose_email(Some(emails.as_slice()), public()).unwrap(),
            "alice@example.com"
        );

        // List failed or had no primary: profile address
        assert_eq!(choose_email(None, public()).unwrap(), "public@example.com");
        assert_eq!(
            choose_email(Some(no_primary.as_slice()), public()).unwrap(),
            "public@example.com"
        );

        // Nothing usable
        assert!(matches!(
            choose_email(Some(no_primary.as_slice()), None),
            Err(ProviderError::NoPrimaryEmail)
        ));
        assert!(matches!(
            choose_email(None, Some(String::new())),
            Err(ProviderError::NoPrimaryEmail)
        ));
    }

    #[test]
    fn test_google_profile_without_email_is_rejected() {
        let info: GoogleUserInfo = serde_json::from_str(r#"{"name": "Carol"}"#).unwrap();
        assert!(matches!(
            choose_email(None, info.email),
            Err(ProviderError::NoPrimaryEmail)
        ));

        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"email": "carol@example.com", "name": "Carol"}"#).unwrap();
        assert_eq!(choose_email(None, info.email).unwrap(), "carol@example.com");
    }

    #[test]
    fn test_token_from_response() {
        let ok: TokenResponse =
            serde_json::from_str(r#"{"access_token": "gho_abc", "token_type": "bearer"}"#).unwrap();
        assert_eq!(token_from_response(ok).unwrap().as_str(), "gho_abc");

        let missing: TokenResponse = serde_json::from_str(r#"{"token_type": "bearer"}"#).unwrap();
        assert!(matches!(
            token_from_response(missing),
            Err(ProviderError::MissingAccessToken)
        ));

        let error: TokenResponse = serde_json::from_str(
            r#"{"error": "bad_verification_code", "error_description": "The code is incorrect"}"#,
        )
        .unwrap();
        assert!(matches!(
            token_from_response(error),
            Err(ProviderError::TokenExchange(msg)) if msg.starts_with("bad_verification_code")
        ));
    }
}
