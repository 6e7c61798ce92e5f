use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use crate::model::OwnerKey;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(0);

/// In-memory storage backend for testing.
///
/// Records go through the same JSON shape as on disk, so codec behavior is
/// exercised without touching the filesystem. A `Mutex` rather than a
/// `RefCell` keeps the backend usable from several threads.
pub struct MemBackend {
    instance: usize,
    files: Mutex<HashMap<OwnerKey, Vec<Value>>>,
    simulate_write_error: AtomicBool,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            files: Mutex::new(HashMap::new()),
            simulate_write_error: AtomicBool::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Test helper to place raw records for an owner, bypassing the codec.
    pub fn put_raw(&self, owner: OwnerKey, records: Vec<Value>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(owner, records);
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self, owner: OwnerKey) -> Result<Option<Vec<Value>>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(files.get(&owner).cloned())
    }

    fn save_records(&self, owner: OwnerKey, records: &[Value]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(TodoError::Store("Simulated write error".to_string()));
        }
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.insert(owner, records.to_vec());
        Ok(())
    }

    fn list_owners(&self) -> Result<Vec<OwnerKey>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let mut owners: Vec<OwnerKey> = files.keys().copied().collect();
        owners.sort();
        Ok(owners)
    }

    fn owner_path(&self, owner: OwnerKey) -> PathBuf {
        PathBuf::from(format!("memory://{}/{}.json", self.instance, owner))
    }
}
