//! # todo CLI
//!
//! A thin terminal client over the `todoapp` library. This file only invokes
//! `cli::run()` and turns errors into an exit code; everything else lives in
//! `src/cli/`.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/todo/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - Context wiring + dispatch (commands.rs)               │
//! │  - Terminal styling via `console` (render.rs)            │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  API Layer (crates/todoapp/src/api.rs)                   │
//! │  - Owns the list store and id registry                   │
//! │  - Dispatches to command modules                         │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/todoapp/src/commands/*)           │
//! │  - Business rules, one load-mutate-save per call         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The library never prints. All stdout/stderr output and process exits happen
//! here.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
