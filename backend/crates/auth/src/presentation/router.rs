//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::domain::oauth::OAuthProvider;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::resolve_identity;

/// Create the Auth router for any repository and OAuth client implementation
///
/// Every route runs behind the identity middleware.
pub fn auth_router<R, P>(state: AuthAppState<R, P>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R, P>))
        .route("/login", post(handlers::login::<R, P>))
        .route("/logout", post(handlers::logout::<R, P>))
        .route("/status", get(handlers::session_status))
        .route("/oauth/{provider}/login", get(handlers::oauth_login::<R, P>))
        .route(
            "/oauth/{provider}/callback",
            get(handlers::oauth_callback::<R, P>),
        )
        .route("/admin/users", get(handlers::list_users::<R, P>))
        .route(
            "/admin/users/{user_id}/role",
            put(handlers::set_user_role::<R, P>),
        )
        .route("/admin/users/{user_id}", delete(handlers::delete_user::<R, P>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity::<R, P>,
        ))
        .with_state(state)
}
