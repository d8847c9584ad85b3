//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AdminUseCase, OAuthCallbackUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::identity::RequestIdentity;
use crate::domain::oauth::OAuthProvider;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{auth_provider::AuthProvider, user_id::UserId};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, OAuthCallbackQuery, RegisterRequest, RegisterResponse, SessionStatusResponse,
    SetRoleRequest, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    /// `None` when the provider has no client credentials
    pub google: Option<Arc<P>>,
    pub github: Option<Arc<P>>,
}

// Manual impl: derive would require `R: Clone` and `P: Clone`.
impl<R, P> Clone for AuthAppState<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            google: self.google.clone(),
            github: self.github.clone(),
        }
    }
}

/// Result of resolving the `{provider}` path segment
enum ProviderLookup<P> {
    Ready(Arc<P>),
    NotConfigured(AuthProvider),
    NotFound,
}

impl<R, P> AuthAppState<R, P>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    fn oauth_provider(&self, segment: &str) -> ProviderLookup<P> {
        let (provider, client) = match AuthProvider::from_code(segment) {
            Some(provider @ AuthProvider::Google) => (provider, &self.google),
            Some(provider @ AuthProvider::Github) => (provider, &self.github),
            Some(AuthProvider::Local) | None => return ProviderLookup::NotFound,
        };
        match client {
            Some(client) => ProviderLookup::Ready(client.clone()),
            None => ProviderLookup::NotConfigured(provider),
        }
    }
}

// ============================================================================
// Register / Login / Logout / Status
// ============================================================================

/// POST /register
pub async fn register<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id.to_string(),
        }),
    ))
}

/// POST /login
pub async fn login<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let identity = RequestIdentity::authenticated(output.user);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, output.session.set_cookie)],
        Json(SessionStatusResponse::from(&identity)),
    ))
}

/// POST /logout
pub async fn logout<R, P>(
    State(state): State<AuthAppState<R, P>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());

    if let Some(token) = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
    {
        use_case.execute(&token).await?;
    }

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, use_case.clear_cookie())],
    ))
}

/// GET /status
pub async fn session_status(identity: RequestIdentity) -> Json<SessionStatusResponse> {
    Json(SessionStatusResponse::from(&identity))
}

// ============================================================================
// OAuth
// ============================================================================

/// GET /oauth/{provider}/login
pub async fn oauth_login<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Path(provider): Path<String>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let client = match state.oauth_provider(&provider) {
        ProviderLookup::Ready(client) => client,
        ProviderLookup::NotConfigured(provider) => {
            return Err(AuthError::ProviderNotConfigured(provider));
        }
        ProviderLookup::NotFound => return Ok(StatusCode::NOT_FOUND.into_response()),
    };

    let url = client.authorize_url(&state.config.oauth_state);
    Ok(Redirect::temporary(&url).into_response())
}

/// GET /oauth/{provider}/callback
pub async fn oauth_callback<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Path(provider): Path<String>,
    Query(query): Query<OAuthCallbackQuery>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let client = match state.oauth_provider(&provider) {
        ProviderLookup::Ready(client) => client,
        ProviderLookup::NotConfigured(provider) => {
            return Err(AuthError::ProviderNotConfigured(provider));
        }
        ProviderLookup::NotFound => return Ok(StatusCode::NOT_FOUND.into_response()),
    };

    let use_case = OAuthCallbackUseCase::new(state.repo.clone(), client, state.config.clone());
    let output = use_case.execute(query.code.as_deref()).await?;

    Ok((
        [(header::SET_COOKIE, output.session.set_cookie)],
        Redirect::to(&state.config.landing_path),
    )
        .into_response())
}

// ============================================================================
// Admin
// ============================================================================

fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse()
        .map_err(|_| AuthError::Validation("Invalid user id".to_string()))
}

/// GET /admin/users
pub async fn list_users<R, P>(
    State(state): State<AuthAppState<R, P>>,
    identity: RequestIdentity,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let users = AdminUseCase::new(state.repo.clone())
        .list_users(&identity)
        .await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// PUT /admin/users/{user_id}/role
pub async fn set_user_role<R, P>(
    State(state): State<AuthAppState<R, P>>,
    identity: RequestIdentity,
    Path(user_id): Path<String>,
    Json(req): Json<SetRoleRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;
    let user = AdminUseCase::new(state.repo.clone())
        .set_role(&identity, &user_id, req.role)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /admin/users/{user_id}
pub async fn delete_user<R, P>(
    State(state): State<AuthAppState<R, P>>,
    identity: RequestIdentity,
    Path(user_id): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;
    AdminUseCase::new(state.repo.clone())
        .delete_user(&identity, &user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
