//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod check_session;
pub mod config;
pub mod oauth_callback;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use admin::AdminUseCase;
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, OAuthClientConfig};
pub use oauth_callback::{OAuthCallbackOutput, OAuthCallbackUseCase, OAuthOutcome};
pub use session::{IssuedSession, SessionIssuer};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
