use crate::commands::NewList;
use crate::error::{Result, TodoError};
use crate::ids::IdAllocator;
use crate::model::{List, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

pub fn run<B: StorageBackend, A: IdAllocator>(
    store: &ListStore<B>,
    ids: &A,
    owner: OwnerKey,
    actor: UserId,
    new_list: NewList,
) -> Result<List> {
    let id = ids.allocate()?;
    let name = new_list
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("List {}", id));
    let list = List::new(
        id,
        name,
        new_list.scope,
        new_list.scope_id.unwrap_or(owner.0),
        actor,
    );

    let saved = store.update_lists(owner, |lists| {
        if lists.iter().any(|l| l.id == id) {
            return Err(TodoError::DuplicateListId(id));
        }
        lists.push(list.clone());
        Ok(())
    });

    match saved {
        Ok(()) => {
            tracing::debug!(%owner, id, "created list");
            Ok(list)
        }
        // The id belongs to the list already on file, keep it registered.
        Err(err @ TodoError::DuplicateListId(_)) => Err(err),
        Err(err) => {
            if let Err(release_err) = ids.release(id) {
                tracing::warn!(id, error = %release_err, "could not release id of unsaved list");
            }
            Err(err)
        }
    }
}
