use crate::error::Result;
use crate::model::{List, ListId, OwnerKey};
use crate::store::backend::StorageBackend;
use crate::store::ListStore;

pub fn run<B: StorageBackend>(
    store: &ListStore<B>,
    owner: OwnerKey,
    list_id: ListId,
) -> Result<List> {
    store.load_list_by_id(owner, list_id)
}
