//! List Entity

use auth::models::Email;
use chrono::{DateTime, Utc};
use kernel::id::ListId;

use crate::domain::value_object::list_title::ListTitle;

/// A named collection of todos owned by exactly one user
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub id: ListId,
    pub title: ListTitle,
    /// Email of the owning user
    pub owner: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl List {
    pub fn new(owner: Email, title: ListTitle) -> Self {
        let now = super::now();

        Self {
            id: ListId::new(),
            title,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, email: &Email) -> bool {
        &self.owner == email
    }

    pub fn rename(&mut self, title: ListTitle) {
        self.title = title;
        self.updated_at = super::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list() {
        let owner = Email::new("a@x.com").unwrap();
        let list = List::new(owner.clone(), ListTitle::from_db("Groceries"));
        assert!(list.is_owned_by(&owner));
        assert!(!list.is_owned_by(&Email::new("b@x.com").unwrap()));
        assert_eq!(list.created_at, list.updated_at);
    }

    #[test]
    fn test_rename_touches_updated_at() {
        let mut list = List::new(
            Email::new("a@x.com").unwrap(),
            ListTitle::from_db("Groceries"),
        );
        list.rename(ListTitle::from_db("Errands"));
        assert_eq!(list.title.as_str(), "Errands");
        assert!(list.updated_at >= list.created_at);
    }
}
