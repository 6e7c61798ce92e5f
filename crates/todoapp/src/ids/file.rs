use super::{allocate_in, register_in, release_in, IdAllocator};
use crate::error::{Result, TodoError};
use crate::model::ListId;
use crate::store::fs_backend::write_atomic;
use crate::store::locks;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::PoisonError;

/// On-disk shape: `{ "all_list_ids": [0, 1, 3] }`. Other top-level keys are
/// carried through untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    all_list_ids: BTreeSet<ListId>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Registry persisted as a single JSON file shared by every owner.
///
/// Each operation reads the file, changes it and writes it back while holding
/// the process-wide lock for the file's path, so concurrent allocations in one
/// process never return the same id. A missing file is an empty registry.
pub struct FileIdRegistry {
    path: PathBuf,
}

impl FileIdRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<RegistryFile> {
        if !self.path.exists() {
            return Ok(RegistryFile::default());
        }
        let content = fs::read_to_string(&self.path).map_err(TodoError::Io)?;
        serde_json::from_str(&content).map_err(TodoError::Serialization)
    }

    fn save(&self, registry: &RegistryFile) -> Result<()> {
        let content = serde_json::to_string_pretty(registry).map_err(TodoError::Serialization)?;
        write_atomic(&self.path, &content)
    }

    /// Load, apply `f`, and save if `f` succeeded, under the registry lock.
    fn modify<T>(&self, f: impl FnOnce(&mut BTreeSet<ListId>) -> Result<T>) -> Result<T> {
        let lock = locks::lock_for(&self.path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut registry = self.load()?;
        let output = f(&mut registry.all_list_ids)?;
        self.save(&registry)?;
        Ok(output)
    }
}

impl IdAllocator for FileIdRegistry {
    fn allocate(&self) -> Result<ListId> {
        let id = self.modify(|ids| Ok(allocate_in(ids)))?;
        tracing::debug!(id, registry = %self.path.display(), "allocated list id");
        Ok(id)
    }

    fn register(&self, id: ListId) -> Result<()> {
        self.modify(|ids| register_in(ids, id))
    }

    fn release(&self, id: ListId) -> Result<()> {
        self.modify(|ids| release_in(ids, id))?;
        tracing::debug!(id, registry = %self.path.display(), "released list id");
        Ok(())
    }

    fn registered(&self) -> Result<BTreeSet<ListId>> {
        let lock = locks::lock_for(&self.path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.all_list_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    fn registry_in(dir: &TempDir) -> FileIdRegistry {
        FileIdRegistry::new(dir.path().join("bot_data.json"))
    }

    #[test]
    fn missing_file_is_an_empty_registry() {
        let dir = TempDir::new().unwrap();
        let registry = registry_in(&dir);
        assert!(registry.registered().unwrap().is_empty());
        assert_eq!(registry.allocate().unwrap(), 0);
        assert!(registry.path().exists());
    }

    #[test]
    fn allocation_skips_registered_ids() {
        let dir = TempDir::new().unwrap();
        let registry = registry_in(&dir);
        for id in [0, 1, 3] {
            registry.register(id).unwrap();
        }
        assert_eq!(registry.allocate().unwrap(), 2);
        assert_eq!(registry.allocate().unwrap(), 4);
    }

    #[test]
    fn reads_the_legacy_file_shape() {
        let dir = TempDir::new().unwrap();
        let registry = registry_in(&dir);
        fs::write(
            registry.path(),
            r#"{"all_list_ids": [2, 0, 1], "current_list_id": 3}"#,
        )
        .unwrap();

        assert_eq!(registry.allocate().unwrap(), 3);

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(registry.path()).unwrap()).unwrap();
        assert_eq!(raw["all_list_ids"], serde_json::json!([0, 1, 2, 3]));
        assert_eq!(raw["current_list_id"], 3);
    }

    #[test]
    fn state_survives_a_new_handle() {
        let dir = TempDir::new().unwrap();
        registry_in(&dir).allocate().unwrap();
        registry_in(&dir).allocate().unwrap();

        let reopened = registry_in(&dir);
        assert_eq!(reopened.registered().unwrap(), BTreeSet::from([0, 1]));
        reopened.release(0).unwrap();
        assert!(matches!(
            reopened.release(0),
            Err(TodoError::IdNotRegistered(0))
        ));
    }

    #[test]
    fn duplicate_register_fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let registry = registry_in(&dir);
        registry.register(7).unwrap();
        assert!(matches!(
            registry.register(7),
            Err(TodoError::DuplicateListId(7))
        ));
        assert_eq!(registry.registered().unwrap(), BTreeSet::from([7]));
    }

    #[test]
    fn concurrent_allocations_are_distinct() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot_data.json");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = FileIdRegistry::new(path.clone());
                thread::spawn(move || registry.allocate().unwrap())
            })
            .collect();
        let mut ids: Vec<ListId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();

        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }
}
