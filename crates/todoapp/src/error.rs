use crate::model::{ItemId, ListId, OwnerKey, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("List {list_id} not found for owner {owner}")]
    ListNotFound { owner: OwnerKey, list_id: ListId },

    #[error("Item {item_id} not found in list {list_id}")]
    ItemNotFound { list_id: ListId, item_id: ItemId },

    #[error("Invalid status {0}: status must take a value from 0-4 inclusive")]
    InvalidStatus(String),

    #[error("Invalid deadline {0:?}: expected YYYY-MM-DD HH:MM")]
    InvalidDeadlineFormat(String),

    #[error("List id {0} is not registered")]
    IdNotRegistered(ListId),

    #[error("List id {0} is already in use by another list")]
    DuplicateListId(ListId),

    #[error("Owner {0} has no lists")]
    NoListsForOwner(OwnerKey),

    #[error("User {user} is not an author of list {list_id}")]
    NotAnAuthor { list_id: ListId, user: UserId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
