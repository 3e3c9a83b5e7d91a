//! Command-line interface for prio
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;

mod board;
mod task;
mod theme;

/// Resolve storage and configuration for a command.
///
/// Data directory precedence: CLI flag / `PRIO_DATA_DIR`, then `data_dir`
/// from config.toml at the default location, then the platform default.
fn open_storage(override_dir: Option<std::path::PathBuf>) -> Result<(Config, Storage)> {
    let explicit = override_dir.is_some();
    let storage = Storage::resolve(override_dir)?;
    let config = Config::load_or_default(&storage.config_file());
    if !explicit {
        if let Some(dir) = config.data_dir.clone() {
            return Ok((config, Storage::new(dir)));
        }
    }
    Ok((config, storage))
}

/// prio - priority-bucketed task list
///
/// Tasks live in a single local collection, grouped into low, medium,
/// and high priority buckets. `prio board` opens the interactive view.
#[derive(Parser, Debug)]
#[command(name = "prio")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding tasks and theme state
    #[arg(long, global = true, env = "PRIO_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Free-form tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Priority: low, medium, or high
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// List tasks grouped by priority bucket
    List {
        /// Only show one bucket: low, medium, or high
        #[arg(short, long)]
        priority: Option<String>,

        /// Only show completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only show pending tasks
        #[arg(long)]
        pending: bool,
    },

    /// Show a single task
    Show {
        /// Task id
        id: String,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// New tag
        #[arg(short, long)]
        tag: Option<String>,

        /// New priority: low, medium, or high
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Toggle a task between pending and completed
    #[command(visible_alias = "done")]
    Toggle {
        /// Task id
        id: String,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: String,

        /// Don't error if the task does not exist
        #[arg(long)]
        force: bool,
    },

    /// Theme preference for the board
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Open the interactive board
    Board,
}

/// Theme subcommands
#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Set the theme preference
    Set {
        /// Theme name: light or dark
        name: String,
    },

    /// Show the current theme preference
    Show,

    /// Clear the preference (back to the default palette)
    Unset,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add {
                title,
                description,
                due,
                tag,
                priority,
            } => task::run_add(task::AddOptions {
                title,
                description,
                due,
                tag,
                priority,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List {
                priority,
                completed,
                pending,
            } => task::run_list(task::ListOptions {
                priority,
                completed,
                pending,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Show { id } => task::run_show(task::ShowOptions {
                id,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                id,
                title,
                description,
                due,
                tag,
                priority,
            } => task::run_edit(task::EditOptions {
                id,
                title,
                description,
                due,
                tag,
                priority,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Toggle { id } => task::run_toggle(task::ToggleOptions {
                id,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id, force } => task::run_rm(task::RmOptions {
                id,
                force,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Theme(cmd) => match cmd {
                ThemeCommands::Set { name } => theme::run_set(theme::SetOptions {
                    name,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                ThemeCommands::Show => theme::run_show(theme::ShowOptions {
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                ThemeCommands::Unset => theme::run_unset(theme::UnsetOptions {
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Board => board::run(board::BoardOptions {
                data_dir: self.data_dir,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn done_is_an_alias_for_toggle() {
        let cli = Cli::try_parse_from(["prio", "done", "t1"]).unwrap();
        match cli.command {
            Commands::Toggle { id } => assert_eq!(id, "t1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn completed_and_pending_conflict() {
        let result = Cli::try_parse_from(["prio", "list", "--completed", "--pending"]);
        assert!(result.is_err());
    }
}
