//! Task records and the three-valued priority.
//!
//! A task is mutated by full-record replacement keyed on its `id`; the id is
//! assigned at creation and never changes afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::Error;

/// Task priority. Every task carries exactly one of these; the buckets on the
/// board correspond one-to-one to the variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities in bucket order (low first).
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Next priority in bucket order, wrapping around. Used by the board
    /// editor to cycle the priority field.
    pub fn next(&self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn prev(&self) -> Priority {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low, medium, or high)"
            ))),
        }
    }
}

/// A single task record. Dates serialize as ISO-8601 strings and parse back
/// into `DateTime<Utc>` on load, so a persistence round-trip preserves the
/// date as a date value rather than an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub tag: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a task with a fresh unique id, `completed = false`, and a due
    /// date defaulting to now.
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Ulid::new().to_string(),
            title: title.into(),
            description: String::new(),
            due_date: Utc::now(),
            tag: String::new(),
            priority,
            completed: false,
        }
    }
}

/// Partial field set for `TaskStore::edit_fields`. Absent fields keep their
/// current value; the id is never part of a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub tag: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.tag.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }

    /// Merge this patch over a task, leaving the id untouched.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(tag) = self.tag {
            task.tag = tag;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
