//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ListInput, TodoInput};
use crate::domain::entity::{list::List, todo::Todo};

// ============================================================================
// Lists
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub title: Option<String>,
}

impl From<ListRequest> for ListInput {
    fn from(req: ListRequest) -> Self {
        ListInput { title: req.title }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub id: Uuid,
    pub title: String,
    /// Owner email
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&List> for ListResponse {
    fn from(list: &List) -> Self {
        Self {
            id: list.id.into_uuid(),
            title: list.title.to_string(),
            owner: list.owner.to_string(),
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

// ============================================================================
// Todos
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRequest {
    pub text: Option<String>,
    pub done: Option<bool>,
    pub removed: Option<bool>,
}

impl From<TodoRequest> for TodoInput {
    fn from(req: TodoRequest) -> Self {
        TodoInput {
            text: req.text,
            done: req.done,
            removed: req.removed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: Uuid,
    pub list_id: Uuid,
    pub text: String,
    pub done: bool,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.into_uuid(),
            list_id: todo.list_id.into_uuid(),
            text: todo.text.to_string(),
            done: todo.done,
            removed: todo.removed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
