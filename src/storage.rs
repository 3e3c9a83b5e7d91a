//! Storage layer for prio
//!
//! All persistent state lives under a single data directory:
//!
//! ```text
//! <data dir>/
//!   tasks.json     # JSON array of task records
//!   theme          # "light" or "dark"; absent = follow terminal default
//!   config.toml    # optional configuration (read by the config module)
//! ```
//!
//! The data directory defaults to the platform location from `directories`
//! (e.g. `~/.local/share/prio` on Linux) and can be overridden via the CLI,
//! the `PRIO_DATA_DIR` environment variable, or configuration.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::task::Task;
use crate::theme::Theme;

const TASKS_FILE: &str = "tasks.json";
const THEME_FILE: &str = "theme";
const CONFIG_FILE: &str = "config.toml";

/// Storage manager for prio state
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at an explicit directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the data directory: explicit override first, then the
    /// platform default.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }
        let dirs = ProjectDirs::from("", "", "prio").ok_or_else(|| {
            Error::NoDataDir("could not determine a home directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    pub fn theme_file(&self) -> PathBuf {
        self.data_dir.join(THEME_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Write JSON data atomically (write to temp, then rename)
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Read JSON data from a file
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Write data atomically using temp file + rename
    ///
    /// Ensures a reader never sees a partial write: the file is either fully
    /// written or untouched.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }

    // =========================================================================
    // Task collection slot
    // =========================================================================

    /// Load the persisted task collection.
    ///
    /// Fails closed: a missing file or a file that does not parse yields an
    /// empty collection rather than an error. Parse failures are logged.
    pub fn load_tasks(&self) -> Vec<Task> {
        let path = self.tasks_file();
        if !path.exists() {
            return Vec::new();
        }
        match self.read_json::<Vec<Task>>(&path) {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "discarding unreadable task data"
                );
                Vec::new()
            }
        }
    }

    /// Persist the full task collection (atomic).
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.ensure_dirs()?;
        self.write_json(&self.tasks_file(), &tasks)
    }

    // =========================================================================
    // Theme preference slot
    // =========================================================================

    /// Read the persisted theme preference. Absent or unreadable content
    /// reads as "no preference".
    pub fn read_theme(&self) -> Option<Theme> {
        let content = fs::read_to_string(self.theme_file()).ok()?;
        content.trim().parse().ok()
    }

    /// Persist the theme preference.
    pub fn write_theme(&self, theme: Theme) -> Result<()> {
        self.ensure_dirs()?;
        self.write_atomic(&self.theme_file(), theme.as_str().as_bytes())
    }

    /// Clear the theme preference (back to "follow terminal default").
    pub fn clear_theme(&self) -> Result<()> {
        let path = self.theme_file();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
