use super::backend::StorageBackend;
use super::locks;
use crate::codec::{decode_owner_file, encode_owner_file, OwnerRecords};
use crate::error::{Result, TodoError};
use crate::model::{List, ListId, OwnerKey};
use serde_json::Value;
use std::sync::PoisonError;

pub struct ListStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> ListStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs `f` while holding the owner's lock.
    fn locked<T>(&self, owner: OwnerKey, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock = locks::lock_for(&self.backend.owner_path(owner));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    fn read(&self, owner: OwnerKey) -> Result<Option<OwnerRecords>> {
        let records = self
            .backend
            .load_records(owner)?
            .map(decode_owner_file)
            .transpose()?;
        if let Some(records) = &records {
            tracing::debug!(%owner, lists = records.lists.len(), "loaded owner file");
        }
        Ok(records)
    }

    fn write(&self, owner: OwnerKey, lists: &[List], foreign: &[Value]) -> Result<()> {
        let records = encode_owner_file(lists, foreign)?;
        self.backend.save_records(owner, &records)?;
        tracing::debug!(%owner, lists = lists.len(), "saved owner file");
        Ok(())
    }

    /// All lists of `owner`, or an empty vector when the owner has no file.
    pub fn load_lists(&self, owner: OwnerKey) -> Result<Vec<List>> {
        self.locked(owner, || {
            Ok(self.read(owner)?.map(|r| r.lists).unwrap_or_default())
        })
    }

    /// Like [`load_lists`](Self::load_lists), but a missing owner file is
    /// reported as [`TodoError::NoListsForOwner`].
    pub fn owner_lists(&self, owner: OwnerKey) -> Result<Vec<List>> {
        self.locked(owner, || {
            self.read(owner)?
                .map(|r| r.lists)
                .ok_or(TodoError::NoListsForOwner(owner))
        })
    }

    /// Overwrites the owner's file with `lists`. Unrecognized records already in
    /// the file are kept, unless the file can't be decoded at all, in which
    /// case it is replaced outright.
    pub fn save_lists(&self, owner: OwnerKey, lists: &[List]) -> Result<()> {
        self.locked(owner, || {
            let foreign = match self.read(owner) {
                Ok(records) => records.map(|r| r.foreign).unwrap_or_default(),
                Err(err @ (TodoError::Serialization(_) | TodoError::Store(_))) => {
                    tracing::warn!(%owner, error = %err, "replacing undecodable owner file");
                    Vec::new()
                }
                Err(err) => return Err(err),
            };
            self.write(owner, lists, &foreign)
        })
    }

    /// Inserts `list`, replacing any list with the same id in place.
    pub fn save_list(&self, owner: OwnerKey, list: &List) -> Result<()> {
        self.update_lists(owner, |lists| {
            match lists.iter_mut().find(|l| l.id == list.id) {
                Some(existing) => *existing = list.clone(),
                None => lists.push(list.clone()),
            }
            Ok(())
        })
    }

    pub fn load_list_by_id(&self, owner: OwnerKey, list_id: ListId) -> Result<List> {
        self.load_lists(owner)?
            .into_iter()
            .find(|l| l.id == list_id)
            .ok_or(TodoError::ListNotFound { owner, list_id })
    }

    /// Load, apply `f`, save, all under the owner's lock.
    ///
    /// Nothing is written when `f` fails. A missing owner file starts out as an
    /// empty collection and is created by the save.
    pub fn update_lists<T>(
        &self,
        owner: OwnerKey,
        f: impl FnOnce(&mut Vec<List>) -> Result<T>,
    ) -> Result<T> {
        self.locked(owner, || {
            let mut records = self.read(owner)?.unwrap_or_default();
            let output = f(&mut records.lists)?;
            self.write(owner, &records.lists, &records.foreign)?;
            Ok(output)
        })
    }

    /// [`update_lists`](Self::update_lists) narrowed to one list.
    pub fn update_list<T>(
        &self,
        owner: OwnerKey,
        list_id: ListId,
        f: impl FnOnce(&mut List) -> Result<T>,
    ) -> Result<T> {
        self.update_lists(owner, |lists| {
            let list = lists
                .iter_mut()
                .find(|l| l.id == list_id)
                .ok_or(TodoError::ListNotFound { owner, list_id })?;
            f(list)
        })
    }

    /// Every owner key with a file.
    pub fn owners(&self) -> Result<Vec<OwnerKey>> {
        self.backend.list_owners()
    }
}
