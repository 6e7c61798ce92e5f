use crate::commands::{ensure_author, DeadlineChange, ItemEdit};
use crate::error::{Result, TodoError};
use crate::model::{Item, ItemId, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

/// Rewrites an item's content and/or deadline. A malformed deadline fails the
/// whole edit.
pub fn run<B: StorageBackend>(
    store: &ListStore<B>,
    owner: OwnerKey,
    actor: UserId,
    list_id: ListId,
    item_id: ItemId,
    edit: ItemEdit,
) -> Result<Item> {
    store.update_list(owner, list_id, |list| {
        ensure_author(list, actor)?;
        let item = list
            .get_item_mut(item_id)
            .ok_or(TodoError::ItemNotFound { list_id, item_id })?;

        match &edit.deadline {
            DeadlineChange::Keep => {}
            DeadlineChange::Clear => item.set_deadline(None)?,
            DeadlineChange::Set(text) => item.set_deadline(Some(text))?,
        }
        if let Some(content) = edit.content {
            item.set_content(content);
        }
        Ok(item.clone())
    })
}
