//! Email Value Object
//!
//! Represents a validated email address. Email is the account join key for
//! local and federated logins, so it is always stored trimmed and lowercased.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RFC 5321 limits
const EMAIL_MAX_LENGTH: usize = 254;
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Normalize and validate
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {EMAIL_MAX_LENGTH} characters"
            )));
        }

        Self::check_format(&email).map_err(|reason| {
            AppError::bad_request(format!("Invalid email format: {reason}"))
                .with_action("Please enter an address like name@example.com")
        })?;

        Ok(Self(email))
    }

    /// Structural check only; deliverability is never verified
    fn check_format(email: &str) -> Result<(), &'static str> {
        let (local, domain) = email.split_once('@').ok_or("missing @")?;

        if domain.contains('@') {
            return Err("more than one @");
        }
        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
            return Err("bad local part length");
        }
        if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err("whitespace in local part");
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return Err("domain needs a dot");
        }
        for label in labels {
            if label.is_empty() {
                return Err("empty domain label");
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err("domain label starts or ends with -");
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err("invalid domain character");
            }
        }

        Ok(())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the local part of the email
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
