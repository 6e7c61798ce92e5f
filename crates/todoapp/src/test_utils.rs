use crate::api::FileApi;
use crate::ids::file::FileIdRegistry;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A [`FileApi`] rooted in a fresh temporary directory.
pub struct TestEnv {
    // Keeps the directory alive for the lifetime of the env.
    pub _temp_dir: TempDir,
    pub api: FileApi,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let api = FileApi::new(
            FileStore::new(root.join("lists")),
            FileIdRegistry::new(root.join("bot_data.json")),
        );
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }

    /// Path of an owner's file.
    pub fn owner_file(&self, owner: u64) -> PathBuf {
        self.root.join("lists").join(format!("{}.json", owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::NewList;
    use crate::model::OwnerKey;

    #[test]
    fn env_writes_under_its_root() {
        let env = TestEnv::new();
        env.api
            .create_list(OwnerKey(5), 5, NewList::named("scratch"))
            .unwrap();
        assert!(env.owner_file(5).exists());
    }
}
