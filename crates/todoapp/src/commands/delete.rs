use crate::commands::ensure_author;
use crate::error::{Result, TodoError};
use crate::ids::IdAllocator;
use crate::model::{List, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

/// Removes the list from the owner's file, then frees its id.
///
/// Once the owner file is saved the delete has happened. A registry that can't
/// release the id only logs; `doctor` reclaims the id later.
pub fn run<B: StorageBackend, A: IdAllocator>(
    store: &ListStore<B>,
    ids: &A,
    owner: OwnerKey,
    actor: UserId,
    list_id: ListId,
) -> Result<List> {
    let removed = store.update_lists(owner, |lists| {
        let position = lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or(TodoError::ListNotFound { owner, list_id })?;
        ensure_author(&lists[position], actor)?;
        Ok(lists.remove(position))
    })?;

    if let Err(err) = ids.release(list_id) {
        tracing::warn!(id = list_id, error = %err, "could not release id of deleted list");
    }

    tracing::debug!(%owner, list_id, "deleted list");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{setup, AUTHOR, OWNER, STRANGER};
    use crate::commands::{create, NewList};
    use crate::ids::file::FileIdRegistry;
    use crate::ids::memory::MemIdRegistry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn removes_list_and_frees_id() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::named("a")).unwrap();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::named("b")).unwrap();

        let removed = run(&store, &ids, OWNER, AUTHOR, 0).unwrap();
        assert_eq!(removed.name, "a");

        let remaining = store.load_lists(OWNER).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "b");
        assert!(matches!(
            store.load_list_by_id(OWNER, 0),
            Err(TodoError::ListNotFound { list_id: 0, .. })
        ));

        // Freed id is handed out again.
        let again = create::run(&store, &ids, OWNER, AUTHOR, NewList::named("c")).unwrap();
        assert_eq!(again.id, 0);
    }

    #[test]
    fn unknown_list_is_not_found() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::default()).unwrap();

        let err = run(&store, &ids, OWNER, AUTHOR, 3).unwrap_err();
        assert!(matches!(err, TodoError::ListNotFound { list_id: 3, .. }));
        assert_eq!(ids.registered().unwrap().len(), 1);
    }

    #[test]
    fn other_owners_lists_are_out_of_reach() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::default()).unwrap();

        let err = run(&store, &ids, OwnerKey(7), AUTHOR, 0).unwrap_err();
        assert!(matches!(err, TodoError::ListNotFound { .. }));
    }

    #[test]
    fn only_authors_may_delete() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::default()).unwrap();

        let err = run(&store, &ids, OWNER, STRANGER, 0).unwrap_err();
        assert!(matches!(err, TodoError::NotAnAuthor { list_id: 0, user: 99 }));
        assert_eq!(store.load_lists(OWNER).unwrap().len(), 1);
    }

    #[test]
    fn missing_registry_entry_is_tolerated() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::default()).unwrap();

        let forgetful = MemIdRegistry::new();
        run(&store, &forgetful, OWNER, AUTHOR, 0).unwrap();
        assert!(store.load_lists(OWNER).unwrap().is_empty());
    }

    #[test]
    fn unreadable_registry_does_not_undo_the_delete() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::default()).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot_data.json");
        fs::write(&path, "garbage").unwrap();
        let broken = FileIdRegistry::new(path);

        let removed = run(&store, &broken, OWNER, AUTHOR, 0).unwrap();
        assert_eq!(removed.id, 0);
        assert!(store.load_lists(OWNER).unwrap().is_empty());
    }
}
