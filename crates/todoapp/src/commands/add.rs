use crate::commands::{ensure_author, NewItem};
use crate::error::Result;
use crate::model::{Item, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

/// Appends a new item, giving it the list's next free item id.
pub fn run<B: StorageBackend>(
    store: &ListStore<B>,
    owner: OwnerKey,
    actor: UserId,
    list_id: ListId,
    new_item: NewItem,
) -> Result<Item> {
    store.update_list(owner, list_id, |list| {
        ensure_author(list, actor)?;
        let item = Item::new(
            list.next_item_id(),
            new_item.content,
            new_item.deadline.as_deref(),
            new_item.status,
        )?;
        list.add_item(item.clone());
        Ok(item)
    })
}
