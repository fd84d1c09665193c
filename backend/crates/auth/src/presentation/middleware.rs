//! Auth Middleware
//!
//! Gate for owner-scoped routes and the extractor handlers use to receive
//! the signed-in user.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::AuthAppState;

/// Where unauthenticated requests are sent
pub const LOGIN_PATH: &str = "/login";

/// The authenticated user, placed in request extensions by [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Not signed in").with_action("Please log in"))
    }
}

/// Middleware that requires a valid session
///
/// Without one the request is redirected to [`LOGIN_PATH`] and no handler
/// runs. Store failures surface as server errors.
pub async fn require_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> AppResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let Some(user) = state.current_user(req.headers()).await? else {
        tracing::debug!(path = %req.uri().path(), "No session, redirecting to login");
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
