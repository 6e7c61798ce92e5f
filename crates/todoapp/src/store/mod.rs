//! # Storage Layer
//!
//! Durable mapping from an [`OwnerKey`](crate::model::OwnerKey) to that owner's
//! ordered lists. Storage is split in two:
//!
//! 1. [`backend::StorageBackend`]: raw record I/O ("how"): read and replace the
//!    JSON records of one owner file.
//! 2. [`list_store::ListStore`]: the "what": decoding tagged records, lookups,
//!    and serializing read-modify-write cycles per owner.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store over [`fs_backend::FsBackend`].
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── bot_data.json       # List id registry (see crate::ids)
//! └── lists/
//!     ├── 42.json         # All lists filed under owner 42
//!     └── 1077.json
//! ```
//!
//! ## Writes
//!
//! Every save is a whole-file rewrite: the new content goes to a temp file in the
//! same directory which is then renamed over the old one, so an interrupted save
//! leaves either the old file or the new one. There is no partial update and no
//! transaction spanning several files.
//!
//! ## Concurrency
//!
//! [`ListStore::update_lists`](list_store::ListStore::update_lists) holds a
//! per-owner lock (see [`locks`]) from load to save, so two requests from the
//! same owner cannot lose each other's changes. Different owners touch
//! different files and never wait on each other. The locks live in this
//! process only; a second process writing the same directory still races.

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub(crate) mod locks;
pub mod list_store;
pub mod mem_backend;
pub mod memory;

pub use list_store::ListStore;
