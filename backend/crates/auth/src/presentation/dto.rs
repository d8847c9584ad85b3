//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::identity::RequestIdentity;
use crate::domain::value_object::{auth_provider::AuthProvider, user_role::UserRole};

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// OAuth
// ============================================================================

/// Query string of an OAuth callback
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    /// Sent back by the provider; not validated
    pub state: Option<String>,
}

// ============================================================================
// Users
// ============================================================================

/// User without secrets
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub user_name: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            email: user.email.to_string(),
            user_name: user.user_name.to_string(),
            role: user.user_role,
            provider: user.provider,
            created_at: user.created_at,
        }
    }
}

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user: Option<UserResponse>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&RequestIdentity> for SessionStatusResponse {
    fn from(identity: &RequestIdentity) -> Self {
        match identity.user() {
            Some(user) => Self {
                authenticated: true,
                user: Some(UserResponse::from(user)),
                expires_at: user.session.as_ref().map(|session| session.expires_at),
            },
            None => Self {
                authenticated: false,
                user: None,
                expires_at: None,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    pub role: UserRole,
}
