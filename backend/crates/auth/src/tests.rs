use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;

use crate::application::{AuthConfig, AuthService, Credentials};
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::infra::InMemoryAuthRepository;
use crate::presentation::{AuthAppState, auth_router, require_session};

fn service() -> (AuthService<InMemoryAuthRepository>, InMemoryAuthRepository) {
    let repo = InMemoryAuthRepository::new();
    let service = AuthService::new(Arc::new(repo.clone()), Arc::new(AuthConfig::development()));
    (service, repo)
}

// ============================================================================
// Service
// ============================================================================

#[tokio::test]
async fn register_twice_is_conflict() {
    let (auth, _) = service();

    let user = auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    assert_eq!(user.email.as_str(), "a@x.com");

    let err = auth
        .register_user(Credentials::new("A@X.com", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn register_requires_both_fields() {
    let (auth, _) = service();

    let err = auth
        .register_user(Credentials {
            email: Some("a@x.com".to_string()),
            password: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = auth
        .register_user(Credentials::new("not-an-email", "p"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidEmail(_)));
}

#[tokio::test]
async fn authenticate_checks_user_and_password() {
    let (auth, _) = service();
    auth.register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();

    let err = auth
        .authenticate(Credentials::new("b@x.com", "p"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
    assert_eq!(err.to_string(), "No such user");

    let err = auth
        .authenticate(Credentials::new("a@x.com", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::IncorrectPassword));

    let user = auth
        .authenticate(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    assert_eq!(user.email.as_str(), "a@x.com");
}

#[tokio::test]
async fn serialize_then_deserialize_returns_same_user() {
    let (auth, _) = service();
    let user = auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();

    let key = auth.serialize(&user);
    assert_eq!(auth.deserialize(&key).await.unwrap(), Some(user));
}

#[tokio::test]
async fn login_resume_logout() {
    let (auth, _) = service();
    let user = auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();

    let token = auth.login(&user).await.unwrap();
    assert_eq!(auth.resume(&token).await.unwrap(), Some(user));

    auth.logout(&token).await.unwrap();
    assert_eq!(auth.resume(&token).await.unwrap(), None);
}

#[tokio::test]
async fn forged_and_unknown_tokens_resume_to_none() {
    let (auth, _) = service();
    let user = auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    let token = auth.login(&user).await.unwrap();

    let forged = format!("{}x", token);
    assert_eq!(auth.resume(&forged).await.unwrap(), None);
    assert_eq!(auth.resume("garbage").await.unwrap(), None);

    // Signed by another service instance
    let (other, _) = service();
    assert_eq!(other.resume(&token).await.unwrap(), None);
}

#[tokio::test]
async fn expired_session_is_removed_on_resume() {
    let (auth, repo) = service();
    let user = auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();

    let session = Session::new(user.email.clone(), chrono::Duration::seconds(-1));
    repo.create_session(&session).await.unwrap();
    let token = crate::application::session_token::sign(
        &auth.config().session_secret,
        session.session_id,
    )
    .unwrap();

    assert_eq!(auth.resume(&token).await.unwrap(), None);
    assert!(repo.find_session(session.session_id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleted_account_ends_sessions() {
    let (auth, _) = service();
    let user = auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    let token = auth.login(&user).await.unwrap();

    auth.delete_account(&user).await.unwrap();

    assert_eq!(auth.resume(&token).await.unwrap(), None);
    assert!(auth.deserialize(&user.email).await.unwrap().is_none());
    assert!(matches!(
        auth.delete_account(&user).await.unwrap_err(),
        AuthError::UserNotFound
    ));
}

// ============================================================================
// HTTP
// ============================================================================

fn app() -> Router {
    let (auth, _) = service();
    auth_router(AuthAppState::new(auth))
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` pair from the Set-Cookie header
fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register_and_login(app: &Router) -> String {
    let credentials = r#"{"email":"a@x.com","password":"p"}"#;
    let response = app
        .clone()
        .oneshot(json_request("POST", "/register", credentials))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/login", credentials))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    session_cookie(&response)
}

#[tokio::test]
async fn http_register_returns_user_and_rejects_duplicates() {
    let app = app();
    let credentials = r#"{"email":"a@x.com","password":"p"}"#;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/register", credentials))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert!(body["createdAt"].is_string());
    assert!(body.get("password").is_none());

    let response = app
        .oneshot(json_request("POST", "/register", credentials))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn http_register_missing_field_is_bad_request() {
    let response = app()
        .oneshot(json_request("POST", "/register", r#"{"email":"a@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing field: password");
}

#[tokio::test]
async fn http_failed_login_redirects_without_cookie() {
    let app = app();
    register_and_login(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            r#"{"email":"a@x.com","password":"wrong"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn http_session_status_follows_cookie() {
    let app = app();

    let body = body_json(app.clone().oneshot(get("/", None)).await.unwrap()).await;
    assert_eq!(body["authenticated"], false);

    let cookie = register_and_login(&app).await;
    assert!(cookie.starts_with("todo_session="));

    let body = body_json(app.clone().oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["email"], "a@x.com");

    let body = body_json(app.oneshot(get("/login", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["email"], "a@x.com");
}

#[tokio::test]
async fn http_logout_ends_session() {
    let app = app();
    let cookie = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(get("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );

    let body = body_json(app.oneshot(get("/login", Some(&cookie))).await.unwrap()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn http_delete_account_is_gated() {
    let app = app();

    let anonymous = Request::delete("/account").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(anonymous).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookie = register_and_login(&app).await;
    let request = Request::delete("/account")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(app.oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["authenticated"], false);
}

// ============================================================================
// Store failures
// ============================================================================

/// In-memory store whose user lookups can be switched to fail
#[derive(Clone, Default)]
struct UnreliableUsers {
    inner: InMemoryAuthRepository,
    lookups_fail: Arc<AtomicBool>,
}

impl UnreliableUsers {
    fn break_lookups(&self) {
        self.lookups_fail.store(true, Ordering::SeqCst);
    }
}

impl UserRepository for UnreliableUsers {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        self.inner.create_user(user).await
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        if self.lookups_fail.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("user store unavailable".to_string()));
        }
        self.inner.find_user_by_email(email).await
    }

    async fn delete_user(&self, email: &Email) -> AuthResult<bool> {
        self.inner.delete_user(email).await
    }
}

impl SessionRepository for UnreliableUsers {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        self.inner.create_session(session).await
    }

    async fn find_session(&self, session_id: uuid::Uuid) -> AuthResult<Option<Session>> {
        self.inner.find_session(session_id).await
    }

    async fn delete_session(&self, session_id: uuid::Uuid) -> AuthResult<()> {
        self.inner.delete_session(session_id).await
    }

    async fn delete_sessions_for_user(&self, email: &Email) -> AuthResult<u64> {
        self.inner.delete_sessions_for_user(email).await
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        self.inner.cleanup_expired_sessions().await
    }
}

fn unreliable_state() -> (AuthAppState<UnreliableUsers>, UnreliableUsers) {
    let repo = UnreliableUsers::default();
    let auth = AuthService::new(Arc::new(repo.clone()), Arc::new(AuthConfig::development()));
    (AuthAppState::new(auth), repo)
}

#[tokio::test]
async fn resume_propagates_user_lookup_failure() {
    let (state, repo) = unreliable_state();
    let user = state
        .auth
        .register_user(Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    let token = state.auth.login(&user).await.unwrap();

    repo.break_lookups();

    let err = state.auth.resume(&token).await.unwrap_err();
    assert!(matches!(err, AuthError::Internal(_)));
}

#[tokio::test]
async fn http_gate_reports_store_failure_instead_of_redirecting() {
    let (state, repo) = unreliable_state();
    let app = Router::new()
        .route("/lists", axum::routing::get(|| async { StatusCode::OK }))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session::<UnreliableUsers>,
        ))
        .merge(auth_router(state));

    let cookie = register_and_login(&app).await;
    let response = app.clone().oneshot(get("/lists", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    repo.break_lookups();

    let response = app.clone().oneshot(get("/lists", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::LOCATION).is_none());
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 500);
    assert_eq!(body["error"], "Internal Server Error");

    let request = Request::delete("/account")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
