use crate::commands::ensure_author;
use crate::error::Result;
use crate::model::{List, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

/// Lets `user` edit the list. Sharing with an existing author is a no-op.
pub fn run<B: StorageBackend>(
    store: &ListStore<B>,
    owner: OwnerKey,
    actor: UserId,
    list_id: ListId,
    user: UserId,
) -> Result<List> {
    store.update_list(owner, list_id, |list| {
        ensure_author(list, actor)?;
        if list.add_author(user) {
            tracing::debug!(list_id, user, "added author");
        }
        Ok(list.clone())
    })
}
