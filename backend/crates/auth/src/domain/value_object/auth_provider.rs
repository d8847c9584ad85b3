use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication source of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum AuthProvider {
    #[default]
    Local = 0,
    Google = 1,
    Github = 2,
}

impl AuthProvider {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use AuthProvider::*;
        match self {
            Local => "local",
            Google => "google",
            Github => "github",
        }
    }

    /// Whether accounts of this provider sign in through OAuth
    #[inline]
    pub const fn is_federated(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use AuthProvider::*;
        match id {
            0 => Some(Local),
            1 => Some(Google),
            2 => Some(Github),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use AuthProvider::*;
        match code {
            "local" => Some(Local),
            "google" => Some(Google),
            "github" => Some(Github),
            _ => None,
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
