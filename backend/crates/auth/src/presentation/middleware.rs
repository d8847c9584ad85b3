//! Identity Middleware
//!
//! Resolves the session cookie once per request and stores the resulting
//! [`RequestIdentity`] in request extensions. Missing, unknown, and expired
//! sessions all resolve to anonymous; the request is never blocked for them.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;

use crate::application::CheckSessionUseCase;
use crate::domain::identity::RequestIdentity;
use crate::domain::oauth::OAuthProvider;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::AuthAppState;

/// Middleware that attaches a [`RequestIdentity`] to every request
pub async fn resolve_identity<R, P>(
    State(state): State<AuthAppState<R, P>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    P: OAuthProvider + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone());
    let identity = match use_case.resolve(token.as_deref()).await {
        Ok(identity) => identity,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Handlers take the identity as an extractor; without the middleware the
/// request is anonymous.
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}
