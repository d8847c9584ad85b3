//! User Name Value Object
//!
//! Display name shown next to posts and comments. Not unique and not used
//! for login; email is the account key.
//!
//! ## Rules
//! - NFKC normalized, then trimmed
//! - 1 to 64 characters
//! - No control characters

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = input.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("User name cannot be empty"));
        }

        if trimmed.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::bad_request("User name contains invalid characters"));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Best-effort name for a federated account
    ///
    /// Providers may return an empty or oversized display name; fall back to
    /// the email local part, truncated to the maximum length.
    pub fn from_profile(display_name: &str, fallback: &str) -> Self {
        if let Ok(name) = Self::new(display_name) {
            return name;
        }
        let cleaned: String = fallback
            .nfkc()
            .filter(|c| !c.is_control())
            .take(USER_NAME_MAX_LENGTH)
            .collect();
        match Self::new(&cleaned) {
            Ok(name) => name,
            Err(_) => Self("user".to_string()),
        }
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
