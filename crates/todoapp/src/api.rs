//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every client (the CLI, a chat bot, tests).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the list store and the id allocator, so callers never wire them
//!   together themselves
//! - **Dispatches** each call to its `commands::*::run` function
//! - **Returns structured types**: lists, items and reports, never strings
//!
//! It does no I/O of its own beyond what the store and registry do, and holds
//! no business rules; those live in `commands/*.rs`.
//!
//! ## Identity
//!
//! Every operation takes the [`OwnerKey`] whose file holds the lists. Mutations
//! also take the acting [`UserId`], which must be an author of the list being
//! changed. Creating a list makes the actor its first author.
//!
//! ## Generic Over Storage
//!
//! `TodoApi<B, A>` is generic over the owner-file backend and the id allocator:
//! - Production: [`FileApi`] (`FsBackend` + `FileIdRegistry`)
//! - Testing: `TodoApi<MemBackend, MemIdRegistry>`

use crate::commands::{self, doctor::DoctorReport, ItemEdit, NewItem, NewList};
use crate::config::TodoConfig;
use crate::error::Result;
use crate::ids::file::FileIdRegistry;
use crate::ids::IdAllocator;
use crate::model::{Item, ItemId, List, ListId, OwnerKey, UserId};
use crate::store::backend::StorageBackend;
use crate::store::fs::FileStore;
use crate::store::fs_backend::FsBackend;
use crate::store::ListStore;

pub struct TodoApi<B: StorageBackend, A: IdAllocator> {
    store: ListStore<B>,
    ids: A,
}

/// The API over on-disk owner files and registry.
pub type FileApi = TodoApi<FsBackend, FileIdRegistry>;

impl FileApi {
    /// Opens the lists directory and registry file named by `config`.
    /// Neither has to exist yet.
    pub fn from_config(config: &TodoConfig) -> Result<Self> {
        let lists_dir = config.lists_path()?;
        let registry = config.registry_path()?;
        tracing::debug!(
            lists_dir = %lists_dir.display(),
            registry = %registry.display(),
            "opening file store"
        );
        Ok(Self::new(
            FileStore::new(lists_dir),
            FileIdRegistry::new(registry),
        ))
    }
}

impl<B: StorageBackend, A: IdAllocator> TodoApi<B, A> {
    pub fn new(store: ListStore<B>, ids: A) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &ListStore<B> {
        &self.store
    }

    pub fn ids(&self) -> &A {
        &self.ids
    }

    pub fn create_list(&self, owner: OwnerKey, actor: UserId, new_list: NewList) -> Result<List> {
        commands::create::run(&self.store, &self.ids, owner, actor, new_list)
    }

    pub fn delete_list(&self, owner: OwnerKey, actor: UserId, list_id: ListId) -> Result<List> {
        commands::delete::run(&self.store, &self.ids, owner, actor, list_id)
    }

    pub fn lists(&self, owner: OwnerKey) -> Result<Vec<List>> {
        commands::lists::run(&self.store, owner)
    }

    pub fn view_list(&self, owner: OwnerKey, list_id: ListId) -> Result<List> {
        commands::view::run(&self.store, owner, list_id)
    }

    pub fn add_item(
        &self,
        owner: OwnerKey,
        actor: UserId,
        list_id: ListId,
        new_item: NewItem,
    ) -> Result<Item> {
        commands::add::run(&self.store, owner, actor, list_id, new_item)
    }

    pub fn remove_item(
        &self,
        owner: OwnerKey,
        actor: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> Result<Item> {
        commands::remove::run(&self.store, owner, actor, list_id, item_id)
    }

    /// `code` is the numeric status, 0 (not started) through 4 (abandoned).
    pub fn set_item_status(
        &self,
        owner: OwnerKey,
        actor: UserId,
        list_id: ListId,
        item_id: ItemId,
        code: i64,
    ) -> Result<Item> {
        commands::status::run(&self.store, owner, actor, list_id, item_id, code)
    }

    pub fn edit_item(
        &self,
        owner: OwnerKey,
        actor: UserId,
        list_id: ListId,
        item_id: ItemId,
        edit: ItemEdit,
    ) -> Result<Item> {
        commands::edit::run(&self.store, owner, actor, list_id, item_id, edit)
    }

    pub fn add_author(
        &self,
        owner: OwnerKey,
        actor: UserId,
        list_id: ListId,
        user: UserId,
    ) -> Result<List> {
        commands::share::run(&self.store, owner, actor, list_id, user)
    }

    pub fn doctor(&self) -> Result<DoctorReport> {
        commands::doctor::run(&self.store, &self.ids)
    }
}
