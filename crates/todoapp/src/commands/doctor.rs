//! Reconciles the id registry with the lists actually on file.
//!
//! Crashes between a registry update and an owner-file write can leave ids
//! registered with no list behind them, or lists whose id the registry forgot.
//! Run this while nothing else is writing.

use crate::error::Result;
use crate::ids::IdAllocator;
use crate::model::ListId;
use crate::store::backend::StorageBackend;
use crate::store::ListStore;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Registered ids no list was using; now free.
    pub released_ids: Vec<ListId>,
    /// Ids in use that were missing from the registry; now registered.
    pub registered_ids: Vec<ListId>,
    /// Ids carried by more than one list. Reported only.
    pub duplicate_ids: Vec<ListId>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.released_ids.is_empty()
            && self.registered_ids.is_empty()
            && self.duplicate_ids.is_empty()
    }
}

pub fn run<B: StorageBackend, A: IdAllocator>(
    store: &ListStore<B>,
    ids: &A,
) -> Result<DoctorReport> {
    let mut usage: BTreeMap<ListId, usize> = BTreeMap::new();
    for owner in store.owners()? {
        for list in store.load_lists(owner)? {
            *usage.entry(list.id).or_default() += 1;
        }
    }

    let registered = ids.registered()?;
    let in_use: BTreeSet<ListId> = usage.keys().copied().collect();
    let mut report = DoctorReport {
        duplicate_ids: usage
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| *id)
            .collect(),
        ..Default::default()
    };

    for id in registered.difference(&in_use) {
        ids.release(*id)?;
        report.released_ids.push(*id);
    }
    for id in in_use.difference(&registered) {
        ids.register(*id)?;
        report.registered_ids.push(*id);
    }

    if !report.duplicate_ids.is_empty() {
        tracing::warn!(ids = ?report.duplicate_ids, "list ids shared by several lists");
    }
    tracing::info!(
        released = report.released_ids.len(),
        registered = report.registered_ids.len(),
        "registry reconciled"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{setup, AUTHOR, OWNER};
    use crate::commands::{create, NewList};
    use crate::ids::memory::MemIdRegistry;
    use crate::model::OwnerKey;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn consistent_state_is_clean() {
        let (store, ids) = setup();
        create::run(&store, &ids, OWNER, AUTHOR, NewList::default()).unwrap();
        create::run(&store, &ids, OwnerKey(7), 7, NewList::default()).unwrap();

        let report = run(&store, &ids).unwrap();
        assert!(report.is_clean());
        assert_eq!(ids.registered().unwrap(), BTreeSet::from([0, 1]));
    }

    #[test]
    fn leaked_ids_are_released_and_missing_ones_registered() {
        let fixture = StoreFixture::new()
            .with_list(OWNER, 0, "A", &[])
            .with_list(OwnerKey(7), 2, "B", &[]);
        let ids = MemIdRegistry::with_ids([0, 1, 5]);

        let report = run(&fixture.store, &ids).unwrap();
        assert_eq!(report.released_ids, vec![1, 5]);
        assert_eq!(report.registered_ids, vec![2]);
        assert!(report.duplicate_ids.is_empty());
        assert_eq!(ids.registered().unwrap(), BTreeSet::from([0, 2]));
    }

    #[test]
    fn duplicates_are_reported() {
        let fixture = StoreFixture::new()
            .with_list(OWNER, 3, "A", &[])
            .with_list(OwnerKey(7), 3, "B", &[]);
        let ids = MemIdRegistry::with_ids([3]);

        let report = run(&fixture.store, &ids).unwrap();
        assert_eq!(report.duplicate_ids, vec![3]);
        assert!(report.released_ids.is_empty());
        assert!(report.registered_ids.is_empty());
    }
}
