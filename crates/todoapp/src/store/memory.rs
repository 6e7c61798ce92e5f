use super::list_store::ListStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = ListStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        ListStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Item, ItemStatus, List, ListId, ListScope, OwnerKey};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds a list authored by the owner, with one not-started item per entry.
        pub fn with_list(self, owner: OwnerKey, id: ListId, name: &str, items: &[&str]) -> Self {
            let mut list = List::new(id, name, ListScope::User, owner.0, owner.0);
            for content in items {
                let item = Item::new(list.next_item_id(), *content, None, None).unwrap();
                list.add_item(item);
            }
            self.store.save_list(owner, &list).unwrap();
            self
        }

        pub fn with_item_status(
            self,
            owner: OwnerKey,
            list_id: ListId,
            item_id: u32,
            status: ItemStatus,
        ) -> Self {
            self.store
                .update_list(owner, list_id, |list| {
                    if let Some(item) = list.get_item_mut(item_id) {
                        item.status = status;
                    }
                    Ok(())
                })
                .unwrap();
            self
        }
    }
}
