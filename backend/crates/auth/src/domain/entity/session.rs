//! Session Entity
//!
//! A session is the (token, expiry) pair embedded in the user record.
//! Both halves are present or both absent.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::session_token::SessionToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Mint a session with an absolute timeout counted from `now`
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: SessionToken::generate(),
            expires_at: now + ttl,
        }
    }

    /// Valid strictly before the expiry instant
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Whether `presented` is this session's token and it is still valid
    pub fn accepts(&self, presented: &str, now: DateTime<Utc>) -> bool {
        self.token.matches(presented) && self.is_valid_at(now)
    }

    /// Rebuild from the nullable column pair
    ///
    /// Returns `None` when both are absent, an error when only one is.
    pub fn from_parts(
        token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Self>, &'static str> {
        match (token, expires_at) {
            (Some(token), Some(expires_at)) => Ok(Some(Self {
                token: SessionToken::from_raw(token),
                expires_at,
            })),
            (None, None) => Ok(None),
            _ => Err("session token and expiry must be set together"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_until_expiry_instant() {
        let now = Utc::now();
        let session = Session::issue(now, Duration::hours(1));

        assert!(session.is_valid_at(now));
        assert!(session.is_valid_at(now + Duration::minutes(59)));
        assert!(!session.is_valid_at(now + Duration::hours(1)));
        assert!(!session.is_valid_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_validity_is_monotonic() {
        let now = Utc::now();
        let session = Session::issue(now, Duration::seconds(10));

        let mut seen_invalid = false;
        for offset in 0..30 {
            let valid = session.is_valid_at(now + Duration::seconds(offset));
            if seen_invalid {
                assert!(!valid, "became valid again at +{offset}s");
            }
            seen_invalid |= !valid;
        }
        assert!(seen_invalid);
    }

    #[test]
    fn test_accepts_requires_matching_token() {
        let now = Utc::now();
        let session = Session::issue(now, Duration::hours(1));
        let token = session.token.as_str().to_string();

        assert!(session.accepts(&token, now));
        assert!(!session.accepts("other", now));
        assert!(!session.accepts(&token, now + Duration::hours(1)));
    }

    #[test]
    fn test_from_parts_pairing() {
        let now = Utc::now();
        assert!(matches!(Session::from_parts(None, None), Ok(None)));
        assert!(matches!(
            Session::from_parts(Some("t".into()), Some(now)),
            Ok(Some(_))
        ));
        assert!(Session::from_parts(Some("t".into()), None).is_err());
        assert!(Session::from_parts(None, Some(now)).is_err());
    }
}
