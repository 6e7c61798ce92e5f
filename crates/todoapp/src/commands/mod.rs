//! # Command Layer
//!
//! One module per operation. Each `run` function takes the store (and the id
//! allocator where list ids change hands), performs a single load-mutate-save
//! cycle under the owner's lock, and returns the affected entity.
//!
//! Operations that change a list check that the acting user is one of its
//! authors before touching anything.

use crate::error::{Result, TodoError};
use crate::model::{ItemStatus, List, ListScope, UserId};

pub mod add;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod edit;
pub mod lists;
pub mod remove;
pub mod share;
pub mod status;
pub mod view;

/// Arguments for [`create::run`].
#[derive(Debug, Clone, Default)]
pub struct NewList {
    /// Defaults to `List <id>` when absent or blank.
    pub name: Option<String>,
    pub scope: ListScope,
    /// Defaults to the owner key.
    pub scope_id: Option<u64>,
}

impl NewList {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Arguments for [`add::run`].
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub content: String,
    /// `YYYY-MM-DD HH:MM`
    pub deadline: Option<String>,
    pub status: Option<ItemStatus>,
}

impl NewItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeadlineChange {
    #[default]
    Keep,
    Clear,
    Set(String),
}

/// Arguments for [`edit::run`]. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub content: Option<String>,
    pub deadline: DeadlineChange,
}

pub(crate) fn ensure_author(list: &List, user: UserId) -> Result<()> {
    if list.is_author(user) {
        Ok(())
    } else {
        Err(TodoError::NotAnAuthor {
            list_id: list.id,
            user,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ids::memory::MemIdRegistry;
    use crate::model::{OwnerKey, UserId};
    use crate::store::memory::InMemoryStore;

    pub const OWNER: OwnerKey = OwnerKey(42);
    pub const AUTHOR: UserId = 42;
    pub const STRANGER: UserId = 99;

    pub fn setup() -> (InMemoryStore, MemIdRegistry) {
        (InMemoryStore::new(), MemIdRegistry::new())
    }
}
