//! Router Composition

use std::sync::Arc;

use auth::domain::repository::{SessionRepository, UserRepository};
use auth::presentation::AuthAppState;
use auth::{AuthConfig, AuthService, auth_router};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use todo::domain::repository::{ListRepository, TodoRepository};
use todo::{TodoAppState, todo_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the application router over the given stores
///
/// Expired sessions are purged first; a failed purge is logged and does
/// not prevent startup.
pub async fn build<R, T>(auth_repo: R, todo_repo: T, config: AuthConfig) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let auth = AuthService::new(Arc::new(auth_repo), Arc::new(config));

    match auth.cleanup_expired_sessions().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    let auth_state = AuthAppState::new(auth);

    Router::new()
        .merge(auth_router(auth_state.clone()))
        .merge(todo_router(TodoAppState::new(todo_repo), auth_state))
}

/// Wrap the router with request tracing and, when origins are configured, CORS
///
/// Every request and its response status are logged at `info`.
pub fn with_layers(app: Router, frontend_origins: Vec<HeaderValue>) -> Router {
    let app = if frontend_origins.is_empty() {
        app
    } else {
        let cors = CorsLayer::new()
            .allow_origin(frontend_origins)
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
            .allow_credentials(true);
        app.layer(cors)
    };

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use todo::InMemoryStore;
    use tower::ServiceExt;

    async fn app() -> Router {
        let store = InMemoryStore::new();
        with_layers(
            build(store.clone(), store, AuthConfig::development()).await,
            vec![HeaderValue::from_static("http://localhost:5173")],
        )
    }

    #[tokio::test]
    async fn test_root_reports_anonymous() {
        let response = app()
            .await
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["authenticated"], false);
    }

    #[tokio::test]
    async fn test_lists_are_gated() {
        let response = app()
            .await
            .oneshot(Request::get("/lists").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let response = app()
            .await
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }
}
