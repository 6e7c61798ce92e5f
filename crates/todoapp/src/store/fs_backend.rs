use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use crate::model::OwnerKey;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const OWNER_FILE_EXT: &str = "json";

/// Stores each owner's lists as `<root>/<owner>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn owner_filename(owner: OwnerKey) -> String {
        format!("{}.{}", owner, OWNER_FILE_EXT)
    }
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(TodoError::Io)?;
    }
    Ok(())
}

/// Writes `content` next to `target` and renames it into place.
pub(crate) fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let dir = target
        .parent()
        .ok_or_else(|| TodoError::Store(format!("{} has no parent", target.display())))?;
    ensure_dir(dir)?;

    let stem = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    let tmp_path = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
    fs::write(&tmp_path, content).map_err(TodoError::Io)?;
    if let Err(err) = fs::rename(&tmp_path, target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(TodoError::Io(err));
    }
    Ok(())
}

impl StorageBackend for FsBackend {
    fn load_records(&self, owner: OwnerKey) -> Result<Option<Vec<Value>>> {
        let path = self.owner_path(owner);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(TodoError::Io)?;
        let records: Vec<Value> =
            serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(Some(records))
    }

    fn save_records(&self, owner: OwnerKey, records: &[Value]) -> Result<()> {
        let content = serde_json::to_string_pretty(records).map_err(TodoError::Serialization)?;
        write_atomic(&self.owner_path(owner), &content)
    }

    fn list_owners(&self) -> Result<Vec<OwnerKey>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut owners = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(TodoError::Io)? {
            let path = entry.map_err(TodoError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(OWNER_FILE_EXT)
            {
                continue;
            }
            if let Some(owner) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                owners.push(OwnerKey(owner));
            }
        }
        owners.sort();
        Ok(owners)
    }

    fn owner_path(&self, owner: OwnerKey) -> PathBuf {
        self.root.join(Self::owner_filename(owner))
    }
}
