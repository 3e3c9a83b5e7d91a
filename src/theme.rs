//! Theme preference for the board UI.
//!
//! The preference lives in its own storage slot, independent of the task
//! collection. An absent slot means "follow the terminal default", which
//! resolves to the dark palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::InvalidArgument(format!(
                "unknown theme '{other}' (expected light or dark)"
            ))),
        }
    }
}

/// Resolve an optional stored preference to a concrete theme.
pub fn resolve(preference: Option<Theme>) -> Theme {
    preference.unwrap_or(Theme::Dark)
}

/// Cycle for the board's theme key: dark -> light -> unset -> dark.
pub fn cycle(preference: Option<Theme>) -> Option<Theme> {
    match preference {
        None => Some(Theme::Dark),
        Some(Theme::Dark) => Some(Theme::Light),
        Some(Theme::Light) => None,
    }
}
