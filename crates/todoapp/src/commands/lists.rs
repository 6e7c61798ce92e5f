use crate::error::Result;
use crate::model::{List, OwnerKey};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

/// Every list of `owner`. An owner who never created a list gets
/// `NoListsForOwner`; one whose lists were all deleted gets an empty vector.
pub fn run<B: StorageBackend>(store: &ListStore<B>, owner: OwnerKey) -> Result<Vec<List>> {
    store.owner_lists(owner)
}
