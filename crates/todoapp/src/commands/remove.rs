use crate::commands::ensure_author;
use crate::error::{Result, TodoError};
use crate::model::{Item, ItemId, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

pub fn run<B: StorageBackend>(
    store: &ListStore<B>,
    owner: OwnerKey,
    actor: UserId,
    list_id: ListId,
    item_id: ItemId,
) -> Result<Item> {
    store.update_list(owner, list_id, |list| {
        ensure_author(list, actor)?;
        list.remove_item(item_id)
            .ok_or(TodoError::ItemNotFound { list_id, item_id })
    })
}
