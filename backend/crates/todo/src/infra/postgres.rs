//! PostgreSQL Repository Implementations

use auth::models::Email;
use chrono::{DateTime, Utc};
use kernel::id::{ListId, TodoId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{list::List, todo::Todo};
use crate::domain::repository::{ListRepository, TodoRepository};
use crate::domain::value_object::{list_title::ListTitle, todo_text::TodoText};
use crate::error::TodoResult;

/// PostgreSQL-backed list/todo repository
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// List Repository Implementation
// ============================================================================

impl ListRepository for PgTodoRepository {
    async fn create_list(&self, list: &List) -> TodoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lists (
                id,
                title,
                owner_email,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(list.id.as_uuid())
        .bind(list.title.as_str())
        .bind(list.owner.as_str())
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_list(&self, id: ListId) -> TodoResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, title, owner_email, created_at, updated_at
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ListRow::into_list))
    }

    async fn lists_by_owner(&self, owner: &Email) -> TodoResult<Vec<List>> {
        let rows = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, title, owner_email, created_at, updated_at
            FROM lists
            WHERE owner_email = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ListRow::into_list).collect())
    }

    async fn update_list(&self, list: &List) -> TodoResult<()> {
        sqlx::query("UPDATE lists SET title = $2, updated_at = $3 WHERE id = $1")
            .bind(list.id.as_uuid())
            .bind(list.title.as_str())
            .bind(list.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_list(&self, id: ListId) -> TodoResult<bool> {
        // todos go with it (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Todo Repository Implementation
// ============================================================================

impl TodoRepository for PgTodoRepository {
    async fn create_todo(&self, todo: &Todo) -> TodoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO todos (
                id,
                list_id,
                text,
                done,
                removed,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.list_id.as_uuid())
        .bind(todo.text.as_str())
        .bind(todo.done)
        .bind(todo.removed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_todo(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, list_id, text, done, removed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TodoRow::into_todo))
    }

    async fn todos_by_list(&self, list_id: ListId) -> TodoResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, list_id, text, done, removed, created_at, updated_at
            FROM todos
            WHERE list_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(list_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TodoRow::into_todo).collect())
    }

    async fn update_todo(&self, todo: &Todo) -> TodoResult<()> {
        sqlx::query(
            r#"
            UPDATE todos SET
                text = $2,
                done = $3,
                removed = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.text.as_str())
        .bind(todo.done)
        .bind(todo.removed)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> TodoResult<bool> {
        let deleted = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ListRow {
    id: Uuid,
    title: String,
    owner_email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ListRow {
    fn into_list(self) -> List {
        List {
            id: ListId::from_uuid(self.id),
            title: ListTitle::from_db(self.title),
            owner: Email::from_db(self.owner_email),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: Uuid,
    list_id: Uuid,
    text: String,
    done: bool,
    removed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TodoRow {
    fn into_todo(self) -> Todo {
        Todo {
            id: TodoId::from_uuid(self.id),
            list_id: ListId::from_uuid(self.list_id),
            text: TodoText::from_db(self.text),
            done: self.done,
            removed: self.removed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
