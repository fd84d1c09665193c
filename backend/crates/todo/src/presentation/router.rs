//! List/Todo Router

use axum::{Router, middleware, routing::get};

use auth::domain::repository::{SessionRepository, UserRepository};
use auth::middleware::require_session;
use auth::presentation::AuthAppState;

use crate::domain::repository::{ListRepository, TodoRepository};
use crate::presentation::handlers::{self, TodoAppState};

/// Create the list/todo router
///
/// Every route sits behind the session gate of `auth`.
pub fn todo_router<T, R>(state: TodoAppState<T>, auth: AuthAppState<R>) -> Router
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/lists",
            get(handlers::list_lists::<T>).post(handlers::create_list::<T>),
        )
        .route(
            "/lists/{list_id}",
            get(handlers::get_list::<T>)
                .put(handlers::update_list::<T>)
                .delete(handlers::delete_list::<T>),
        )
        .route(
            "/lists/{list_id}/todos",
            get(handlers::list_todos::<T>).post(handlers::create_todo::<T>),
        )
        .route(
            "/lists/{list_id}/todos/{todo_id}",
            get(handlers::get_todo::<T>)
                .put(handlers::update_todo::<T>)
                .delete(handlers::delete_todo::<T>),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_session::<R>))
        .with_state(state)
}
