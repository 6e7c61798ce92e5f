use super::{allocate_in, register_in, release_in, IdAllocator};
use crate::error::Result;
use crate::model::ListId;
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// In-memory registry for testing. Does NOT persist data.
#[derive(Debug, Default)]
pub struct MemIdRegistry {
    ids: Mutex<BTreeSet<ListId>>,
}

impl MemIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I: IntoIterator<Item = ListId>>(ids: I) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
        }
    }

    fn with_set<T>(&self, f: impl FnOnce(&mut BTreeSet<ListId>) -> Result<T>) -> Result<T> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ids)
    }
}

impl IdAllocator for MemIdRegistry {
    fn allocate(&self) -> Result<ListId> {
        self.with_set(|ids| Ok(allocate_in(ids)))
    }

    fn register(&self, id: ListId) -> Result<()> {
        self.with_set(|ids| register_in(ids, id))
    }

    fn release(&self, id: ListId) -> Result<()> {
        self.with_set(|ids| release_in(ids, id))
    }

    fn registered(&self) -> Result<BTreeSet<ListId>> {
        self.with_set(|ids| Ok(ids.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;

    #[test]
    fn allocates_around_registered_ids() {
        let registry = MemIdRegistry::with_ids([0, 1, 3]);
        assert_eq!(registry.allocate().unwrap(), 2);

        let registry = MemIdRegistry::with_ids([0, 1, 2]);
        assert_eq!(registry.allocate().unwrap(), 3);
    }

    #[test]
    fn released_ids_are_reused() {
        let registry = MemIdRegistry::new();
        for expected in 0..3 {
            assert_eq!(registry.allocate().unwrap(), expected);
        }
        registry.release(1).unwrap();
        assert_eq!(registry.allocate().unwrap(), 1);
    }

    #[test]
    fn release_of_unknown_id_fails() {
        let registry = MemIdRegistry::with_ids([0]);
        assert!(matches!(
            registry.release(4),
            Err(TodoError::IdNotRegistered(4))
        ));
        assert_eq!(registry.registered().unwrap(), BTreeSet::from([0]));
    }
}
