//! Theme preference commands
//!
//! Implements `prio theme set`, `prio theme show`, and `prio theme unset`.
//! The preference is a separate storage slot from the task collection.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::theme::{self, Theme};

/// Output for theme commands
#[derive(Debug, Serialize)]
pub struct ThemeOutput {
    /// The persisted preference, if any
    pub preference: Option<Theme>,
    /// The palette the board will actually use
    pub effective: Theme,
}

impl ThemeOutput {
    fn from_preference(preference: Option<Theme>) -> Self {
        Self {
            preference,
            effective: theme::resolve(preference),
        }
    }
}

/// Options for `prio theme set`
pub struct SetOptions {
    pub name: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio theme set`
pub fn run_set(opts: SetOptions) -> Result<()> {
    let theme: Theme = opts.name.parse()?;
    let (_config, storage) = super::open_storage(opts.data_dir)?;
    storage.write_theme(theme)?;
    tracing::info!(theme = %theme, "theme preference set");

    let output = ThemeOutput::from_preference(Some(theme));
    let human = HumanOutput::new(format!("Theme set to {theme}"));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "theme set",
        &output,
        Some(&human),
    )
}

/// Options for `prio theme show`
pub struct ShowOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio theme show`
pub fn run_show(opts: ShowOptions) -> Result<()> {
    let (_config, storage) = super::open_storage(opts.data_dir)?;
    let output = ThemeOutput::from_preference(storage.read_theme());

    let header = match output.preference {
        Some(theme) => format!("Theme preference: {theme}"),
        None => format!("No theme preference (using {})", output.effective),
    };
    let human = HumanOutput::new(header);
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "theme show",
        &output,
        Some(&human),
    )
}

/// Options for `prio theme unset`
pub struct UnsetOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio theme unset`
pub fn run_unset(opts: UnsetOptions) -> Result<()> {
    let (_config, storage) = super::open_storage(opts.data_dir)?;
    storage.clear_theme()?;
    tracing::info!("theme preference cleared");

    let output = ThemeOutput::from_preference(None);
    let human = HumanOutput::new(format!(
        "Theme preference cleared (using {})",
        output.effective
    ));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "theme unset",
        &output,
        Some(&human),
    )
}
