//! Application Error
//!
//! [`AppError`] is what a client gets to see: a kind, a message safe to
//! show, and optionally what to do next. Crate errors convert into it at
//! the HTTP boundary.

use std::borrow::Cow;
use std::fmt;

use super::kind::ErrorKind;
use super::problem::ProblemDetails;

/// Client-facing error
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::bad_request("Invalid email format")
///     .with_action("Please enter a valid email address");
/// assert_eq!(err.kind(), ErrorKind::BadRequest);
/// ```
#[derive(Debug, Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// Attach a hint telling the user what to do next
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// RFC 7807 body for this error
    pub fn problem(&self) -> ProblemDetails<'_> {
        ProblemDetails {
            type_uri: format!("https://httpstatuses.io/{}", self.status_code()),
            title: self.kind.title(),
            status: self.status_code(),
            detail: self.message(),
            action: self.action(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " ({action})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let err = AppError::bad_request("Email is required");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Email is required");
        assert!(err.action().is_none());

        assert_eq!(AppError::internal("boom").kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_display_includes_action() {
        let err = AppError::new(ErrorKind::Conflict, "Email already used by another provider")
            .with_action("Please sign in with google");
        assert_eq!(
            err.to_string(),
            "[Conflict] Email already used by another provider (Please sign in with google)"
        );
    }
}
