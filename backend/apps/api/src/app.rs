//! Router composition
//!
//! The one place where the account and listing surfaces, static image
//! serving and the cross-cutting layers are put together.

use auth::{AuthConfig, TokenService, auth_router};
use auth::domain::repository::{CredentialRepository, UserRepository};
use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, routing::get};
use kernel::error::app_error::AppError;
use platform::mail::Mailer;
use property::domain::repository::{ImageStore, PropertyRepository};
use property::{PropertyConfig, property_router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;

/// Everything the routers need, already constructed
pub struct Services<R, M, P, S> {
    pub auth_repo: R,
    pub mailer: M,
    pub property_repo: P,
    pub images: S,
    pub tokens: Arc<TokenService>,
    pub auth_config: Arc<AuthConfig>,
    pub property_config: Arc<PropertyConfig>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}

pub fn build_app<R, M, P, S>(services: Services<R, M, P, S>) -> Router
where
    R: UserRepository + CredentialRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
    P: PropertyRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let uploads = ServeDir::new(&services.property_config.upload_dir);
    let uploads_prefix = services.property_config.url_prefix.clone();

    Router::new()
        .route("/api/health", get(health))
        .nest(
            "/api",
            auth_router(
                services.auth_repo,
                services.mailer,
                services.tokens.clone(),
                services.auth_config,
            ),
        )
        .nest(
            "/api/properties",
            property_router(
                services.property_repo,
                services.images,
                services.tokens,
                services.property_config,
            ),
        )
        .nest_service(&uploads_prefix, uploads)
        .fallback(not_found)
}

/// CORS for the configured frontends; bearer tokens, so no cookies.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::InMemoryAuthRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use platform::mail::LogMailer;
    use property::{DiskImageStore, InMemoryPropertyRepository};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir) -> Router {
        let auth_config = Arc::new(AuthConfig::new("app-test-secret").unwrap());
        let property_config = Arc::new(PropertyConfig::new(dir.path()));
        build_app(Services {
            auth_repo: InMemoryAuthRepository::new(),
            mailer: LogMailer,
            property_repo: InMemoryPropertyRepository::new(),
            images: DiskImageStore::new(dir.path(), "/uploads"),
            tokens: Arc::new(TokenService::new(&auth_config)),
            auth_config,
            property_config,
        })
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let res = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec();
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get(&app(&dir), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_routes_are_mounted() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        assert_eq!(get(&app, "/api/properties").await.0, StatusCode::OK);
        assert_eq!(get(&app, "/api/user/profile").await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(get(&app, "/api/nowhere").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serves_stored_images() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("1-abc-front.jpg"), b"jpeg").unwrap();
        let app = app(&dir);

        let (status, body) = get(&app, "/uploads/1-abc-front.jpg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"jpeg");

        assert_eq!(get(&app, "/uploads/missing.jpg").await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_cors_skips_invalid_origins() {
        // Construction must not panic on garbage input.
        let _ = cors_layer(&["https://homes.example".into(), "bad\norigin".into()]);
    }
}
