//! Sign In Use Case
//!
//! Authenticates a local account by email and password and issues a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{IssuedSession, SessionIssuer};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub session: IssuedSession,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let mut user = self.find_by_credentials(input).await?;

        if user.is_banned() {
            return Err(AuthError::AccountBanned);
        }

        let session = SessionIssuer::new(self.repo.clone(), self.config.clone())
            .issue(&mut user)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            provider = %user.provider,
            "User signed in"
        );

        Ok(SignInOutput { user, session })
    }

    /// Look up by email, then verify the password
    ///
    /// An unknown email still pays for one hash verification, and both
    /// failures surface as the same error.
    async fn find_by_credentials(&self, input: SignInInput) -> AuthResult<User> {
        let candidate = RawPassword::candidate(input.password);
        let pepper = self.config.pepper();

        let user = match Email::new(input.email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        match user {
            Some(user) if user.password_hash.verify(&candidate, pepper) => Ok(user),
            Some(_) => Err(AuthError::InvalidCredentials),
            None => {
                UserPassword::verify_dummy(&candidate, pepper);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
