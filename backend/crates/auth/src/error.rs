//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::oauth::ProviderError;
use crate::domain::value_object::auth_provider::AuthProvider;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed form or query input
    #[error("{0}")]
    Validation(String),

    /// Password policy violation
    #[error("{0}")]
    PasswordValidation(String),

    /// OAuth callback without an authorization code
    #[error("Code not found")]
    MissingCode,

    /// Wrong password or unknown email (indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Operation needs a resolved identity
    #[error("Login required")]
    LoginRequired,

    /// Authenticated but not allowed
    #[error("Forbidden")]
    Forbidden,

    /// Banned accounts cannot start a session
    #[error("You are banned")]
    AccountBanned,

    /// Email already registered
    #[error("Email already exists")]
    EmailTaken,

    /// Email belongs to an account created through another provider
    #[error("Email already used by another provider")]
    ProviderConflict {
        existing: AuthProvider,
        attempted: AuthProvider,
    },

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Token exchange or profile fetch failed
    #[error("Failed to sign in with {provider}")]
    UpstreamProvider {
        provider: AuthProvider,
        #[source]
        source: ProviderError,
    },

    /// OAuth provider has no client credentials configured
    #[error("Sign in with {0} is not available")]
    ProviderNotConfigured(AuthProvider),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::PasswordValidation(_) | AuthError::MissingCode => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials | AuthError::LoginRequired => ErrorKind::Unauthorized,
            AuthError::Forbidden | AuthError::AccountBanned => ErrorKind::Forbidden,
            AuthError::EmailTaken | AuthError::ProviderConflict { .. } => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UpstreamProvider { .. } => ErrorKind::BadGateway,
            AuthError::ProviderNotConfigured(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(e) => ErrorKind::from(e),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the log; the client sees a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                AppError::new(self.kind(), "Service temporarily unavailable")
                    .with_action("Please try again later")
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            AuthError::LoginRequired => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in")
            }
            AuthError::ProviderConflict { existing, .. } => AppError::new(
                self.kind(),
                self.to_string(),
            )
            .with_action(format!("Please sign in with {existing}")),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountBanned => {
                tracing::warn!("Login attempt on banned account");
            }
            AuthError::ProviderConflict {
                existing,
                attempted,
            } => {
                tracing::warn!(
                    existing = %existing,
                    attempted = %attempted,
                    "OAuth login rejected: provider mismatch"
                );
            }
            AuthError::UpstreamProvider { provider, source } => {
                tracing::warn!(
                    provider = %provider,
                    stage = %source.stage(),
                    error = %source,
                    "OAuth provider request failed"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
