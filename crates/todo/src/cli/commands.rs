//! # CLI Layer
//!
//! The only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Context Setup**: load [`TodoConfig`], apply flag overrides, open the API
//! 2. **Dispatch**: route each subcommand to one API call
//! 3. **Output Formatting**: hand the result to `render`

use super::render;
use super::setup::{Cli, Commands};
use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use todoapp::api::FileApi;
use todoapp::commands::{DeadlineChange, ItemEdit, NewItem, NewList};
use todoapp::config::TodoConfig;
use todoapp::error::TodoError;
use todoapp::model::{ItemStatus, OwnerKey, UserId};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    super::init_tracing(cli.verbose);

    let ctx = AppContext::from_cli(&cli)?;
    match cli.command {
        None => handle_lists(&ctx),
        Some(command) => dispatch(&ctx, command),
    }
}

struct AppContext {
    api: FileApi,
    owner: Option<OwnerKey>,
    user: Option<UserId>,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config =
            TodoConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
        if let Some(dir) = &cli.data_dir {
            config.data_dir = Some(dir.clone());
        }

        let owner = cli.owner.or(config.user_id).map(OwnerKey);
        let user = cli.user.or(owner.map(|o| o.0));
        tracing::debug!(?owner, ?user, "resolved identity");

        Ok(Self {
            api: FileApi::from_config(&config)?,
            owner,
            user,
        })
    }

    fn owner(&self) -> Result<OwnerKey> {
        self.owner
            .ok_or_else(|| anyhow!("no owner given; pass --owner or set TODO_USER_ID"))
    }

    fn user(&self) -> Result<UserId> {
        self.user
            .ok_or_else(|| anyhow!("no user given; pass --user or --owner"))
    }
}

fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Create {
            name,
            scope,
            scope_id,
        } => {
            let new_list = NewList {
                name: (!name.is_empty()).then(|| name.join(" ")),
                scope,
                scope_id,
            };
            let list = ctx.api.create_list(ctx.owner()?, ctx.user()?, new_list)?;
            print!("{}", render::created(&list));
        }
        Commands::Lists => handle_lists(ctx)?,
        Commands::View { list } => {
            let list = ctx.api.view_list(ctx.owner()?, list)?;
            print!("{}", render::list(&list));
        }
        Commands::Delete { list } => {
            let removed = ctx.api.delete_list(ctx.owner()?, ctx.user()?, list)?;
            print!("{}", render::deleted(&removed));
        }
        Commands::Add {
            list,
            content,
            deadline,
            status,
        } => {
            let new_item = NewItem {
                content: content.join(" "),
                deadline,
                status: status.as_deref().map(parse_status).transpose()?,
            };
            let item = ctx.api.add_item(ctx.owner()?, ctx.user()?, list, new_item)?;
            print!("{}", render::item_added(list, &item));
        }
        Commands::Remove { list, item } => {
            let removed = ctx.api.remove_item(ctx.owner()?, ctx.user()?, list, item)?;
            print!("{}", render::item_removed(list, &removed));
        }
        Commands::Status { list, item, status } => {
            let code = parse_status(&status)?.code();
            let item = ctx
                .api
                .set_item_status(ctx.owner()?, ctx.user()?, list, item, code)?;
            print!("{}", render::item_updated(&item));
        }
        Commands::Edit {
            list,
            item,
            content,
            deadline,
            clear_deadline,
        } => {
            let deadline = match (deadline, clear_deadline) {
                (Some(text), _) => DeadlineChange::Set(text),
                (None, true) => DeadlineChange::Clear,
                (None, false) => DeadlineChange::Keep,
            };
            if content.is_none() && deadline == DeadlineChange::Keep {
                return Err(anyhow!(
                    "nothing to change; pass --content, --deadline or --clear-deadline"
                ));
            }
            let edit = ItemEdit { content, deadline };
            let item = ctx
                .api
                .edit_item(ctx.owner()?, ctx.user()?, list, item, edit)?;
            print!("{}", render::item_updated(&item));
        }
        Commands::Share { list, user } => {
            let list = ctx.api.add_author(ctx.owner()?, ctx.user()?, list, user)?;
            print!("{}", render::shared(&list));
        }
        Commands::Doctor => {
            let report = ctx.api.doctor()?;
            print!("{}", render::doctor(&report));
        }
    }
    Ok(())
}

fn handle_lists(ctx: &AppContext) -> Result<()> {
    let owner = ctx.owner()?;
    let lists = match ctx.api.lists(owner) {
        Ok(lists) => lists,
        Err(TodoError::NoListsForOwner(_)) => Vec::new(),
        Err(err) => return Err(err.into()),
    };
    print!("{}", render::index(owner, &lists));
    Ok(())
}

/// Numeric code or status name.
fn parse_status(text: &str) -> Result<ItemStatus> {
    Ok(text.parse::<ItemStatus>()?)
}
