use crate::commands::ensure_author;
use crate::error::{Result, TodoError};
use crate::model::{Item, ItemId, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

/// Sets the item's status from its numeric code (0-4).
pub fn run<B: StorageBackend>(
    store: &ListStore<B>,
    owner: OwnerKey,
    actor: UserId,
    list_id: ListId,
    item_id: ItemId,
    code: i64,
) -> Result<Item> {
    store.update_list(owner, list_id, |list| {
        ensure_author(list, actor)?;
        let item = list
            .get_item_mut(item_id)
            .ok_or(TodoError::ItemNotFound { list_id, item_id })?;
        item.update_status(code)?;
        Ok(item.clone())
    })
}
