//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Account routes, meant to be nested under `/api`.
///
/// `/user/profile` and `/auth/change-password` require a session token.
pub fn auth_router<R, M>(
    repo: R,
    mailer: M,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
) -> Router
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens: tokens.clone(),
        config,
    };

    let protected = Router::new()
        .route("/user/profile", get(handlers::profile::<R, M>))
        .route("/auth/change-password", post(handlers::change_password::<R, M>))
        .route_layer(from_fn_with_state(tokens, require_bearer));

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/users/check-username", post(handlers::check_user_name::<R, M>))
        .route("/auth/forgot-password", post(handlers::forgot_password::<R, M>))
        .route("/auth/reset-password", post(handlers::reset_password::<R, M>))
        .merge(protected)
        .with_state(state)
}
