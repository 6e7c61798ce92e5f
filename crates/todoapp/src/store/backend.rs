use crate::error::Result;
use crate::model::OwnerKey;
use serde_json::Value;
use std::path::PathBuf;

/// Abstract interface for raw owner-file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while ListStore handles the "what" (decoding, locking, lookups).
pub trait StorageBackend {
    /// Load the raw records of an owner file.
    /// Returns Ok(None) if the owner has no file at all, which callers keep
    /// distinct from a file holding an empty array.
    fn load_records(&self, owner: OwnerKey) -> Result<Option<Vec<Value>>>;

    /// Replace the owner file with `records`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_records(&self, owner: OwnerKey, records: &[Value]) -> Result<()>;

    /// Every owner key that currently has a file.
    fn list_owners(&self) -> Result<Vec<OwnerKey>>;

    /// Location of the owner file. For MemBackend, a virtual path.
    /// Also used as the key of the owner's lock.
    fn owner_path(&self, owner: OwnerKey) -> PathBuf;
}
