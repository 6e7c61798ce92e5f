use super::fs_backend::FsBackend;
use super::list_store::ListStore;
use std::path::{Path, PathBuf};

pub type FileStore = ListStore<FsBackend>;

impl FileStore {
    /// Store whose owner files live directly under `lists_dir`.
    pub fn new(lists_dir: PathBuf) -> Self {
        ListStore::with_backend(FsBackend::new(lists_dir))
    }

    pub fn lists_dir(&self) -> &Path {
        self.backend.root()
    }
}
