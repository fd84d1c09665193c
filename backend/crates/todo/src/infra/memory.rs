//! In-Memory Repository Implementations
//!
//! [`InMemoryTodoRepository`] holds lists and todos. [`InMemoryStore`]
//! combines it with the auth tables so that deleting a user also removes
//! what the user owns, as the schema's foreign keys do.

use std::collections::HashMap;
use std::sync::Arc;

use auth::domain::entity::{session::Session, user::User};
use auth::domain::repository::{SessionRepository, UserRepository};
use auth::models::Email;
use auth::{AuthResult, InMemoryAuthRepository};
use kernel::id::{ListId, TodoId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{list::List, todo::Todo};
use crate::domain::repository::{ListRepository, TodoRepository};
use crate::error::{TodoError, TodoResult};

#[derive(Default)]
struct Tables {
    lists: HashMap<ListId, List>,
    todos: HashMap<TodoId, Todo>,
}

impl Tables {
    fn insert_list(&mut self, list: &List) -> TodoResult<()> {
        if self.lists.contains_key(&list.id) {
            return Err(TodoError::Duplicate);
        }
        self.lists.insert(list.id, list.clone());
        Ok(())
    }

    fn remove_list(&mut self, id: ListId) -> bool {
        let removed = self.lists.remove(&id).is_some();
        self.todos.retain(|_, t| t.list_id != id);
        removed
    }

    fn remove_owner(&mut self, owner: &Email) -> u64 {
        let ids: Vec<ListId> = self
            .lists
            .values()
            .filter(|l| l.is_owned_by(owner))
            .map(|l| l.id)
            .collect();

        let mut removed = 0;
        for id in ids {
            if self.remove_list(id) {
                removed += 1;
            }
        }
        removed
    }
}

/// In-memory list/todo repository; clones share the same tables
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListRepository for InMemoryTodoRepository {
    async fn create_list(&self, list: &List) -> TodoResult<()> {
        self.tables.write().await.insert_list(list)
    }

    async fn find_list(&self, id: ListId) -> TodoResult<Option<List>> {
        Ok(self.tables.read().await.lists.get(&id).cloned())
    }

    async fn lists_by_owner(&self, owner: &Email) -> TodoResult<Vec<List>> {
        let mut lists: Vec<List> = self
            .tables
            .read()
            .await
            .lists
            .values()
            .filter(|l| l.is_owned_by(owner))
            .cloned()
            .collect();
        lists.sort_by_key(|l| (l.created_at, l.id.into_uuid()));
        Ok(lists)
    }

    async fn update_list(&self, list: &List) -> TodoResult<()> {
        if let Some(stored) = self.tables.write().await.lists.get_mut(&list.id) {
            *stored = list.clone();
        }
        Ok(())
    }

    async fn delete_list(&self, id: ListId) -> TodoResult<bool> {
        Ok(self.tables.write().await.remove_list(id))
    }
}

impl TodoRepository for InMemoryTodoRepository {
    async fn create_todo(&self, todo: &Todo) -> TodoResult<()> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key on todos.list_id
        if !tables.lists.contains_key(&todo.list_id) {
            return Err(TodoError::Internal(format!(
                "Todo references unknown list {}",
                todo.list_id
            )));
        }
        if tables.todos.contains_key(&todo.id) {
            return Err(TodoError::Duplicate);
        }
        tables.todos.insert(todo.id, todo.clone());
        Ok(())
    }

    async fn find_todo(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn todos_by_list(&self, list_id: ListId) -> TodoResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .tables
            .read()
            .await
            .todos
            .values()
            .filter(|t| t.list_id == list_id)
            .cloned()
            .collect();
        todos.sort_by_key(|t| (t.created_at, t.id.into_uuid()));
        Ok(todos)
    }

    async fn update_todo(&self, todo: &Todo) -> TodoResult<()> {
        if let Some(stored) = self.tables.write().await.todos.get_mut(&todo.id) {
            *stored = todo.clone();
        }
        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> TodoResult<bool> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }
}

// ============================================================================
// Combined store
// ============================================================================

/// Users, sessions, lists and todos in one process-local store
#[derive(Clone, Default)]
pub struct InMemoryStore {
    auth: InMemoryAuthRepository,
    todo: InMemoryTodoRepository,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        self.auth.create_user(user).await
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.auth.find_user_by_email(email).await
    }

    /// List tables are locked before user tables, here and in `create_list`
    async fn delete_user(&self, email: &Email) -> AuthResult<bool> {
        let mut tables = self.todo.tables.write().await;
        let removed = self.auth.delete_user(email).await?;
        if removed {
            let lists = tables.remove_owner(email);
            tracing::debug!(email = %email, lists, "Removed lists of deleted user");
        }
        Ok(removed)
    }
}

impl SessionRepository for InMemoryStore {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        self.auth.create_session(session).await
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        self.auth.find_session(session_id).await
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.auth.delete_session(session_id).await
    }

    async fn delete_sessions_for_user(&self, email: &Email) -> AuthResult<u64> {
        self.auth.delete_sessions_for_user(email).await
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        self.auth.cleanup_expired_sessions().await
    }
}

impl ListRepository for InMemoryStore {
    async fn create_list(&self, list: &List) -> TodoResult<()> {
        // Mirrors the foreign key on lists.owner_email. The owner check and
        // the insert happen under one lock so a user deletion cannot slip
        // between them.
        let mut tables = self.todo.tables.write().await;
        let owner_exists = self
            .auth
            .find_user_by_email(&list.owner)
            .await
            .map_err(|e| TodoError::Internal(e.to_string()))?
            .is_some();
        if !owner_exists {
            return Err(TodoError::Internal(format!(
                "List references unknown user {}",
                list.owner
            )));
        }
        tables.insert_list(list)
    }

    async fn find_list(&self, id: ListId) -> TodoResult<Option<List>> {
        self.todo.find_list(id).await
    }

    async fn lists_by_owner(&self, owner: &Email) -> TodoResult<Vec<List>> {
        self.todo.lists_by_owner(owner).await
    }

    async fn update_list(&self, list: &List) -> TodoResult<()> {
        self.todo.update_list(list).await
    }

    async fn delete_list(&self, id: ListId) -> TodoResult<bool> {
        self.todo.delete_list(id).await
    }
}

impl TodoRepository for InMemoryStore {
    async fn create_todo(&self, todo: &Todo) -> TodoResult<()> {
        self.todo.create_todo(todo).await
    }

    async fn find_todo(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        self.todo.find_todo(id).await
    }

    async fn todos_by_list(&self, list_id: ListId) -> TodoResult<Vec<Todo>> {
        self.todo.todos_by_list(list_id).await
    }

    async fn update_todo(&self, todo: &Todo) -> TodoResult<()> {
        self.todo.update_todo(todo).await
    }

    async fn delete_todo(&self, id: TodoId) -> TodoResult<bool> {
        self.todo.delete_todo(id).await
    }
}
