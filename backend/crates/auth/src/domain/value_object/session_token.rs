//! Session Token Value Object
//!
//! Opaque random credential stored on the user record and in the cookie.

use platform::crypto::{constant_time_eq, random_token};
use std::fmt;

/// Entropy of a session token (256 bits, 43 URL-safe characters)
pub const SESSION_TOKEN_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh token from the OS random source
    pub fn generate() -> Self {
        Self(random_token(SESSION_TOKEN_BYTES))
    }

    /// Wrap a token read from a cookie or the database
    pub fn from_raw(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a presented token
    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), presented.as_bytes())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_url_safe_and_unique() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 43);
        assert!(
            a.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_matches() {
        let token = SessionToken::from_raw("abc");
        assert!(token.matches("abc"));
        assert!(!token.matches("abd"));
        assert!(!token.matches(""));
    }

    #[test]
    fn test_debug_redacted() {
        let token = SessionToken::from_raw("very-secret");
        assert!(!format!("{token:?}").contains("very-secret"));
    }
}
