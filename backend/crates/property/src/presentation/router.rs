//! Property Router

use auth::{TokenService, require_bearer};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::PropertyConfig;
use crate::domain::repository::{ImageStore, PropertyRepository};
use crate::presentation::handlers::{self, PropertyAppState};

/// Listing routes, meant to be nested under `/api/properties`.
///
/// Reads are public; `POST /add` and `DELETE /{id}` require a session token.
pub fn property_router<R, S>(
    repo: R,
    images: S,
    tokens: Arc<TokenService>,
    config: Arc<PropertyConfig>,
) -> Router
where
    R: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let body_limit = config.request_body_limit();
    let state = PropertyAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        config,
    };

    let protected = Router::new()
        .route("/add", post(handlers::add_property::<R, S>))
        .route("/{id}", delete(handlers::delete_property::<R, S>))
        .route_layer(from_fn_with_state(tokens, require_bearer));

    Router::new()
        .route("/", get(handlers::list_properties::<R, S>))
        .route("/{id}", get(handlers::get_property::<R, S>))
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
