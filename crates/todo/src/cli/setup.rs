use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todoapp::model::{ItemId, ListId, ListScope};

#[derive(Parser, Debug)]
#[command(
    name = "todo",
    bin_name = "todo",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Per-owner to-do lists stored as JSON files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Owner whose lists to use (defaults to the configured user id)
    #[arg(long, global = true, value_name = "ID", help_heading = "Options")]
    pub owner: Option<u64>,

    /// Acting user, checked against list authors (defaults to the owner)
    #[arg(long, global = true, value_name = "ID", help_heading = "Options")]
    pub user: Option<u64>,

    /// Root directory of the stored lists and id registry
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file to load instead of the default one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new list
    #[command(alias = "new", display_order = 1)]
    Create {
        /// Name of the list (defaults to "List <id>")
        #[arg(num_args = 0..)]
        name: Vec<String>,

        /// What the list belongs to: user, channel or server
        #[arg(long, default_value = "user")]
        scope: ListScope,

        /// Id of the scope target (defaults to the owner)
        #[arg(long, value_name = "ID")]
        scope_id: Option<u64>,
    },

    /// Show all lists of the owner
    #[command(aliases = ["show", "ls"], display_order = 2)]
    Lists,

    /// Show one list with its items
    #[command(alias = "v", display_order = 3)]
    View {
        list: ListId,
    },

    /// Delete a list and everything on it
    #[command(alias = "rm-list", display_order = 4)]
    Delete {
        list: ListId,
    },

    /// Add an item to a list
    #[command(alias = "a", display_order = 10)]
    Add {
        list: ListId,

        /// Item text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,

        /// Due date as "YYYY-MM-DD HH:MM"
        #[arg(long)]
        deadline: Option<String>,

        /// Initial status (0-4 or a name such as in-progress)
        #[arg(long)]
        status: Option<String>,
    },

    /// Remove an item from a list
    #[command(alias = "rm", display_order = 11)]
    Remove {
        list: ListId,
        item: ItemId,
    },

    /// Set an item's status (0-4 or a name such as done)
    #[command(alias = "s", display_order = 12)]
    Status {
        list: ListId,
        item: ItemId,
        status: String,
    },

    /// Change an item's text or deadline
    #[command(alias = "e", display_order = 13)]
    Edit {
        list: ListId,
        item: ItemId,

        /// New item text
        #[arg(long)]
        content: Option<String>,

        /// New due date as "YYYY-MM-DD HH:MM"
        #[arg(long, conflicts_with = "clear_deadline")]
        deadline: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_deadline: bool,
    },

    /// Let another user edit a list
    #[command(display_order = 20)]
    Share {
        list: ListId,
        user: u64,
    },

    /// Reconcile the id registry with the stored lists
    #[command(display_order = 30)]
    Doctor,
}
