//! Todo Entity

use chrono::{DateTime, Utc};
use kernel::id::{ListId, TodoId};

use crate::domain::value_object::todo_text::TodoText;

/// A single item of a list
///
/// `removed` is a soft-delete flag set by the client; removed items are
/// still returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub list_id: ListId,
    pub text: TodoText,
    pub done: bool,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a todo; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    pub text: Option<TodoText>,
    pub done: Option<bool>,
    pub removed: Option<bool>,
}

impl Todo {
    pub fn new(list_id: ListId, text: TodoText) -> Self {
        let now = super::now();

        Self {
            id: TodoId::new(),
            list_id,
            text,
            done: false,
            removed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(text) = changes.text {
            self.text = text;
        }
        if let Some(done) = changes.done {
            self.done = done;
        }
        if let Some(removed) = changes.removed {
            self.removed = removed;
        }
        self.updated_at = super::now();
    }
}
