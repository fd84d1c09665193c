//! HTTP Handlers
//!
//! Every handler runs behind the session gate and receives the user via
//! [`CurrentUser`]. Lists are resolved against that user before any todo
//! is touched.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use auth::middleware::CurrentUser;
use kernel::error::app_error::AppResult;
use kernel::extract::{AppJson, AppPath};
use kernel::id::{ListId, TodoId};

use crate::application::{ListController, TodoController};
use crate::domain::entity::list::List;
use crate::domain::repository::{ListRepository, TodoRepository};
use crate::presentation::dto::{ListRequest, ListResponse, TodoRequest, TodoResponse};

/// Shared state for list/todo handlers
#[derive(Clone)]
pub struct TodoAppState<T>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    pub lists: Arc<ListController<T>>,
    pub todos: Arc<TodoController<T>>,
}

impl<T> TodoAppState<T>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: T) -> Self {
        let repo = Arc::new(repo);
        Self {
            lists: Arc::new(ListController::new(repo.clone())),
            todos: Arc::new(TodoController::new(repo)),
        }
    }

    async fn owned_list(&self, user: &CurrentUser, list_id: Uuid) -> AppResult<List> {
        Ok(self
            .lists
            .get_owned_list(&user.0.email, ListId::from_uuid(list_id))
            .await?)
    }
}

// ============================================================================
// Lists
// ============================================================================

/// GET /lists
pub async fn list_lists<T>(
    State(state): State<TodoAppState<T>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<ListResponse>>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let lists = state.lists.lists_of(&user.email).await?;
    Ok(Json(lists.iter().map(ListResponse::from).collect()))
}

/// POST /lists
pub async fn create_list<T>(
    State(state): State<TodoAppState<T>>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<ListRequest>,
) -> AppResult<(StatusCode, Json<ListResponse>)>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.lists.create_list(&user.email, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::from(&list))))
}

/// GET /lists/{list_id}
pub async fn get_list<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath(list_id): AppPath<Uuid>,
) -> AppResult<Json<ListResponse>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    Ok(Json(ListResponse::from(&list)))
}

/// PUT /lists/{list_id}
pub async fn update_list<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath(list_id): AppPath<Uuid>,
    AppJson(req): AppJson<ListRequest>,
) -> AppResult<Json<ListResponse>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let list = state.lists.update_list(list, req.into()).await?;
    Ok(Json(ListResponse::from(&list)))
}

/// DELETE /lists/{list_id}
pub async fn delete_list<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath(list_id): AppPath<Uuid>,
) -> AppResult<Json<ListResponse>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let list = state.lists.delete_list(list).await?;
    Ok(Json(ListResponse::from(&list)))
}

// ============================================================================
// Todos
// ============================================================================

/// GET /lists/{list_id}/todos
pub async fn list_todos<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath(list_id): AppPath<Uuid>,
) -> AppResult<Json<Vec<TodoResponse>>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let todos = state.lists.get_lists_todos(&list).await?;
    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

/// POST /lists/{list_id}/todos
pub async fn create_todo<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath(list_id): AppPath<Uuid>,
    AppJson(req): AppJson<TodoRequest>,
) -> AppResult<(StatusCode, Json<TodoResponse>)>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let todo = state.todos.create_todo_in_list(&list, req.into()).await?;
    Ok((StatusCode::CREATED, Json(TodoResponse::from(&todo))))
}

/// GET /lists/{list_id}/todos/{todo_id}
pub async fn get_todo<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath((list_id, todo_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<TodoResponse>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let todo = state
        .todos
        .get_list_todo(&list, TodoId::from_uuid(todo_id))
        .await?;
    Ok(Json(TodoResponse::from(&todo)))
}

/// PUT /lists/{list_id}/todos/{todo_id}
pub async fn update_todo<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath((list_id, todo_id)): AppPath<(Uuid, Uuid)>,
    AppJson(req): AppJson<TodoRequest>,
) -> AppResult<Json<TodoResponse>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let todo = state
        .todos
        .get_list_todo(&list, TodoId::from_uuid(todo_id))
        .await?;
    let todo = state.todos.update_todo(todo, req.into()).await?;
    Ok(Json(TodoResponse::from(&todo)))
}

/// DELETE /lists/{list_id}/todos/{todo_id}
pub async fn delete_todo<T>(
    State(state): State<TodoAppState<T>>,
    user: CurrentUser,
    AppPath((list_id, todo_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<TodoResponse>>
where
    T: ListRepository + TodoRepository + Clone + Send + Sync + 'static,
{
    let list = state.owned_list(&user, list_id).await?;
    let todo = state
        .todos
        .get_list_todo(&list, TodoId::from_uuid(todo_id))
        .await?;
    let todo = state.todos.delete_todo(todo).await?;
    Ok(Json(TodoResponse::from(&todo)))
}
