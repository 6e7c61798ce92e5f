//! # CLI Behavior
//!
//! One possible client of `todoapp`. It resolves who is acting, opens the
//! on-disk store and prints results.
//!
//! ## Identity
//!
//! - `--owner` picks whose file is read and written. It falls back to
//!   `user_id` from the config (`TODO_USER_ID`).
//! - `--user` is the acting user checked against a list's authors. It falls
//!   back to the owner.
//!
//! ## Naked Execution
//!
//! Running `todo` with no subcommand lists the owner's lists.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing-subscriber`. `RUST_LOG` wins when
//! set; otherwise the default is warnings only, or debug with `-v`.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context setup and per-command handlers
//! - `render`: styled terminal output

mod commands;
mod render;
pub mod setup;

pub use commands::run;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "todo=warn,todoapp=warn";
const VERBOSE_FILTER: &str = "todo=debug,todoapp=debug";

pub(crate) fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time(),
        )
        .try_init();
}
