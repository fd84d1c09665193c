//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use kernel::error::app_error::{AppError, AppResult};
use kernel::extract::AppJson;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::auth_service::AuthService;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::dto::{CredentialsRequest, SessionStatusResponse, UserResponse};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub auth: Arc<AuthService<R>>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(auth: AuthService<R>) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }

    /// Resolve the request's session cookie to a user, if any
    pub async fn current_user(&self, headers: &HeaderMap) -> AppResult<Option<User>> {
        let Some(token) = extract_cookie(headers, &self.auth.config().session_cookie_name) else {
            return Ok(None);
        };
        Ok(self.auth.resume(&token).await?)
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AppResult<Json<SessionStatusResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state.current_user(&headers).await?;

    Ok(Json(SessionStatusResponse {
        authenticated: user.is_some(),
        email: user.map(|u| u.email.into_db()),
    }))
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_page<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AppResult<Json<Option<UserResponse>>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state.current_user(&headers).await?;
    Ok(Json(user.as_ref().map(UserResponse::from)))
}

/// POST /login
///
/// Rejected credentials send the client back to `/login` without a cookie.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> AppResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let user = match state.auth.authenticate(req.into()).await {
        Ok(user) => user,
        Err(e) => {
            let err = AppError::from(e);
            if err.is_server_error() {
                return Err(err);
            }
            tracing::warn!(reason = %err.message(), "Login rejected");
            return Ok(Redirect::to("/login").into_response());
        }
    };

    let token = state.auth.login(&user).await?;
    let cookie = set_cookie_header(&state.auth.config().session_cookie(), &token)
        .ok_or_else(|| AppError::internal("Session cookie is not a valid header value"))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state.auth.register_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AppResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let config = state.auth.config();

    if let Some(token) = extract_cookie(&headers, &config.session_cookie_name) {
        state.auth.logout(&token).await?;
    }

    Ok(clear_session_cookie(&state.auth, Redirect::to("/")))
}

// ============================================================================
// Account
// ============================================================================

/// DELETE /account
pub async fn delete_account<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    state.auth.delete_account(&user).await?;
    Ok(clear_session_cookie(&state.auth, StatusCode::NO_CONTENT))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn clear_session_cookie<R>(auth: &AuthService<R>, response: impl IntoResponse) -> Response
where
    R: UserRepository + SessionRepository,
{
    match delete_cookie_header(&auth.config().session_cookie()) {
        Some(cookie) => ([(header::SET_COOKIE, cookie)], response).into_response(),
        None => response.into_response(),
    }
}
