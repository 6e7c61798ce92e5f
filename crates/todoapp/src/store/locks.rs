//! Process-wide locks keyed by file path.
//!
//! Every read-modify-write of an owner file, and every access to the id
//! registry, runs while holding the lock for that file's path. Paths are made
//! absolute and, once the directory exists, have symlinks and `..` resolved,
//! so two stores pointed at the same directory serialize against each other
//! inside one process. Nothing here protects against a second process.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{self, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

static PATH_LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn lock_key(path: &Path) -> PathBuf {
    let absolute = path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let canonical = match (absolute.parent(), absolute.file_name()) {
        (Some(dir), Some(name)) => fs::canonicalize(dir).ok().map(|dir| dir.join(name)),
        _ => None,
    };
    canonical.unwrap_or(absolute)
}

/// The lock guarding `path`, created on first use.
pub(crate) fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let mut table = PATH_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    table
        .entry(lock_key(path))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}
