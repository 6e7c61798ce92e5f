//! # List Id Registry
//!
//! List ids are unique across every owner, so they can't be derived from one
//! owner file the way item ids are. A separate registry holds the set of ids
//! currently in use:
//!
//! - [`IdAllocator::allocate`] picks the smallest non-negative id not in the set
//!   and records it in the same step.
//! - [`IdAllocator::release`] removes an id when its list is deleted.
//!
//! The registry is an injected dependency of the API rather than a file every
//! call site opens itself, so tests run against [`memory::MemIdRegistry`] and
//! production uses [`file::FileIdRegistry`].
//!
//! ## Leaks
//!
//! Allocation and the owner-file save are two separate writes. If the process
//! dies in between, the id stays registered without a list attached. That only
//! wastes the id; it can never hand the same id out twice. The `doctor`
//! command releases such ids.

use crate::error::{Result, TodoError};
use crate::model::{first_free_id, ListId};
use std::collections::BTreeSet;

pub mod file;
pub mod memory;

/// Allocation and bookkeeping of list ids.
pub trait IdAllocator {
    /// Reserve and return the smallest unused id.
    fn allocate(&self) -> Result<ListId>;

    /// Record `id` as used. Fails with `DuplicateListId` if it already is.
    fn register(&self, id: ListId) -> Result<()>;

    /// Forget `id`. Fails with `IdNotRegistered` if it isn't in use.
    fn release(&self, id: ListId) -> Result<()>;

    /// Snapshot of every id in use.
    fn registered(&self) -> Result<BTreeSet<ListId>>;
}

pub(crate) fn allocate_in(ids: &mut BTreeSet<ListId>) -> ListId {
    let id = first_free_id(ids.iter().copied());
    ids.insert(id);
    id
}

pub(crate) fn register_in(ids: &mut BTreeSet<ListId>, id: ListId) -> Result<()> {
    if !ids.insert(id) {
        return Err(TodoError::DuplicateListId(id));
    }
    Ok(())
}

pub(crate) fn release_in(ids: &mut BTreeSet<ListId>, id: ListId) -> Result<()> {
    if !ids.remove(&id) {
        return Err(TodoError::IdNotRegistered(id));
    }
    Ok(())
}
