//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.email`
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    user_name,
    password_hash,
    user_role,
    provider,
    created_at,
    session_token,
    session_expires_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a duplicate email insert to the domain error
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() && db.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
            return AuthError::EmailTaken;
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (session_token, session_expires_at) = session_parts(user.session.as_ref());

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                user_name,
                password_hash,
                user_role,
                provider,
                created_at,
                session_token,
                session_expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.user_role.id())
        .bind(user.provider.id())
        .bind(user.created_at)
        .bind(session_token)
        .bind(session_expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, user_id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_session_token(&self, token: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE session_token = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn update_session(&self, user_id: &UserId, session: Option<&Session>) -> AuthResult<()> {
        let (session_token, session_expires_at) = session_parts(session);

        let result = sqlx::query(
            r#"
            UPDATE users SET
                session_token = $2,
                session_expires_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(session_token)
        .bind(session_expires_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<()> {
        let result = sqlx::query("UPDATE users SET user_role = $2 WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(role.id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

fn session_parts(session: Option<&Session>) -> (Option<String>, Option<DateTime<Utc>>) {
    match session {
        Some(session) => (
            Some(session.token.as_str().to_string()),
            Some(session.expires_at),
        ),
        None => (None, None),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    user_name: String,
    password_hash: String,
    user_role: i16,
    provider: i16,
    created_at: DateTime<Utc>,
    session_token: Option<String>,
    session_expires_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;
        let provider = AuthProvider::from_id(self.provider)
            .ok_or_else(|| AuthError::Internal(format!("Invalid provider: {}", self.provider)))?;
        let session = Session::from_parts(self.session_token, self.session_expires_at)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name),
            password_hash: UserPassword::from_db(self.password_hash),
            user_role,
            provider,
            created_at: self.created_at,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row() -> UserRow {
        UserRow {
            user_id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            user_name: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            user_role: 1,
            provider: 2,
            created_at: Utc::now(),
            session_token: None,
            session_expires_at: None,
        }
    }

    #[test]
    fn test_row_maps_enums() {
        let user = row().into_user().unwrap();
        assert_eq!(user.user_role, UserRole::Admin);
        assert_eq!(user.provider, AuthProvider::Github);
        assert!(user.session.is_none());
    }

    #[test]
    fn test_row_with_session() {
        let expires = Utc::now() + Duration::hours(1);
        let user = UserRow {
            session_token: Some("tok".to_string()),
            session_expires_at: Some(expires),
            ..row()
        }
        .into_user()
        .unwrap();
        let session = user.session.unwrap();
        assert_eq!(session.token.as_str(), "tok");
        assert_eq!(session.expires_at, expires);
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        assert!(matches!(
            UserRow { user_role: 7, ..row() }.into_user(),
            Err(AuthError::Internal(_))
        ));
        assert!(matches!(
            UserRow { provider: 7, ..row() }.into_user(),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_half_session_is_an_error() {
        assert!(
            UserRow {
                session_token: Some("tok".to_string()),
                ..row()
            }
            .into_user()
            .is_err()
        );
    }

    #[test]
    fn test_session_parts_pairing() {
        assert_eq!(session_parts(None), (None, None));

        let session = Session::issue(Utc::now(), Duration::hours(1));
        let (token, at) = session_parts(Some(&session));
        assert_eq!(token.as_deref(), Some(session.token.as_str()));
        assert_eq!(at, Some(session.expires_at));
    }
}
