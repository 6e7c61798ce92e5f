//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading from
//! a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `TODO_DATA_DIR`, `TODO_LISTS_DIR`,
//!    `TODO_REGISTRY_FILE`, `TODO_USER_ID`.
//! 2. **Config file**: `todo.toml` in the OS config directory (via the
//!    `directories` crate), or an explicit path given by the client.
//! 3. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Root of all persisted state |
//! | `lists_dir` | `lists` | Subdirectory holding one `<owner>.json` per owner |
//! | `registry_file` | `bot_data.json` | List id registry, relative to `data_dir` |
//! | `user_id` | unset | Default owner and acting user for clients |

use crate::error::{Result, TodoError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "todo.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "todoapp", "todoapp")
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Root of all persisted state. Falls back to the OS data directory.
    #[config(env = "TODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for owner files, relative to `data_dir`.
    #[config(default = "lists", env = "TODO_LISTS_DIR")]
    pub lists_dir: String,

    /// Id registry file, relative to `data_dir`.
    #[config(default = "bot_data.json", env = "TODO_REGISTRY_FILE")]
    pub registry_file: String,

    /// Identity clients act as when none is given explicitly.
    #[config(env = "TODO_USER_ID")]
    pub user_id: Option<u64>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            lists_dir: "lists".to_string(),
            registry_file: "bot_data.json".to_string(),
            user_id: None,
        }
    }
}

impl TodoConfig {
    /// Path of the config file looked up when the client doesn't name one.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load from the environment layered over `file` (or [`default_file`](Self::default_file)).
    /// A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = TodoConfig::builder().env();
        if let Some(path) = file.map(Path::to_path_buf).or_else(Self::default_file) {
            tracing::debug!(path = %path.display(), "loading config");
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| TodoError::Store("Could not determine a data directory".into())),
        }
    }

    pub fn lists_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.lists_dir))
    }

    pub fn registry_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.registry_file))
    }
}
