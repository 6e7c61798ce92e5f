//! # Todoapp Architecture
//!
//! Todoapp is a **UI-agnostic to-do list library**. The chat front-end it was
//! written for (and the terminal client shipped in this workspace) are just
//! callers; everything here takes Rust values and returns Rust values.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (crates/todo, or any chat front-end)                │
//! │  - Parses arguments, renders output, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One method per operation, typed results                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Load, mutate, save under the owner's lock                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, ids/)                               │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! │  - IdAllocator trait: FileIdRegistry, MemIdRegistry         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ids
//!
//! Item ids are scoped to their list and list ids are global. Both follow the
//! same rule: the next id is the smallest non-negative integer not in use, so
//! ids freed by a delete are handed out again.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or formats messages for
//! users. Failures come back as [`error::TodoError`] and the client decides how
//! to phrase them. The [`render`] helpers produce plain summaries of entities for
//! clients that want them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Owner-file storage abstraction and implementations
//! - [`ids`]: List id registry
//! - [`model`]: Core data types (`List`, `Item`, `ItemStatus`, `ListScope`)
//! - [`codec`]: Tagged JSON records for lists and items
//! - [`render`]: Human-readable summaries
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod render;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
