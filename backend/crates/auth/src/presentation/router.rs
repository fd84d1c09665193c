//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router for any repository implementation
///
/// Routes: `GET /`, `GET|POST /login`, `POST /register`, `GET /logout`,
/// and the gated `DELETE /account`.
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/account", delete(handlers::delete_account::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<R>,
        ))
        .route("/", get(handlers::session_status::<R>))
        .route(
            "/login",
            get(handlers::login_page::<R>).post(handlers::login::<R>),
        )
        .route("/register", post(handlers::register::<R>))
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}
