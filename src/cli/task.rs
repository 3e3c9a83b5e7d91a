//! Task commands
//!
//! Implements `prio add`, `prio list`, `prio show`, `prio edit`,
//! `prio toggle`, and `prio rm`.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::TaskStore;
use crate::task::{Priority, Task, TaskPatch};

/// Parse a `YYYY-MM-DD` argument into a UTC timestamp at midnight.
fn parse_due(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("invalid due date '{raw}' (expected YYYY-MM-DD)"))
    })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

fn validated_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument(
            "title must not be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

fn open_store(data_dir: Option<PathBuf>) -> Result<(crate::config::Config, TaskStore)> {
    let (config, storage) = super::open_storage(data_dir)?;
    Ok((config, TaskStore::open(storage)))
}

fn require_task<'a>(store: &'a TaskStore, id: &str) -> Result<&'a Task> {
    store
        .get(id)
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}

fn describe_task(human: &mut HumanOutput, task: &Task) {
    human.push_summary("ID", &task.id);
    human.push_summary("Title", &task.title);
    human.push_summary("Priority", task.priority.as_str());
    human.push_summary("Due", task.due_date.format("%Y-%m-%d").to_string());
    if !task.description.is_empty() {
        human.push_summary("Description", &task.description);
    }
    if !task.tag.is_empty() {
        human.push_summary("Tag", &task.tag);
    }
    human.push_summary(
        "Status",
        if task.completed { "completed" } else { "pending" },
    );
}

fn list_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{mark}] {} {} (due {})",
        task.id,
        task.title,
        task.due_date.format("%Y-%m-%d")
    );
    if !task.tag.is_empty() {
        line.push_str(&format!(" #{}", task.tag));
    }
    line
}

/// Options for `prio add`
pub struct AddOptions {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub tag: Option<String>,
    pub priority: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio add`
pub fn run_add(opts: AddOptions) -> Result<()> {
    let title = validated_title(&opts.title)?;
    let (config, mut store) = open_store(opts.data_dir)?;

    let priority = match opts.priority.as_deref() {
        Some(raw) => raw.parse()?,
        None => config.default_priority,
    };

    let mut task = Task::new(title, priority);
    if let Some(description) = opts.description {
        task.description = description;
    }
    if let Some(tag) = opts.tag {
        task.tag = tag;
    }
    if let Some(due) = opts.due.as_deref() {
        task.due_date = parse_due(due)?;
    }

    store.upsert(task.clone())?;
    tracing::info!(id = %task.id, priority = %task.priority, "task added");

    let mut human = HumanOutput::new(format!("Added task '{}'", task.title));
    describe_task(&mut human, &task);
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "add",
        &task,
        Some(&human),
    )
}

/// Options for `prio list`
pub struct ListOptions {
    pub priority: Option<String>,
    pub completed: bool,
    pub pending: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Output for `prio list`
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub low: Vec<Task>,
    pub medium: Vec<Task>,
    pub high: Vec<Task>,
    pub total: usize,
}

/// Run `prio list`
pub fn run_list(opts: ListOptions) -> Result<()> {
    let only_priority: Option<Priority> = match opts.priority.as_deref() {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };
    let (_config, store) = open_store(opts.data_dir)?;

    let keep = |task: &Task| {
        if opts.completed && !task.completed {
            return false;
        }
        if opts.pending && task.completed {
            return false;
        }
        match only_priority {
            Some(priority) => task.priority == priority,
            None => true,
        }
    };

    let buckets = store.partition_by_priority();
    let output = ListOutput {
        low: buckets.low.iter().filter(|&t| keep(t)).cloned().collect(),
        medium: buckets.medium.iter().filter(|&t| keep(t)).cloned().collect(),
        high: buckets.high.iter().filter(|&t| keep(t)).cloned().collect(),
        total: 0,
    };
    let total = output.low.len() + output.medium.len() + output.high.len();
    let output = ListOutput { total, ..output };

    let mut human = HumanOutput::new(format!("{total} task(s)"));
    for priority in Priority::ALL.iter().rev() {
        let bucket = match priority {
            Priority::Low => &output.low,
            Priority::Medium => &output.medium,
            Priority::High => &output.high,
        };
        if bucket.is_empty() {
            continue;
        }
        human.push_detail(format!("{}:", priority.as_str()));
        for task in bucket {
            human.push_detail(format!("  {}", list_line(task)));
        }
    }
    if total == 0 {
        human.push_next_step("prio add <title>");
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

/// Options for `prio show`
pub struct ShowOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio show`
pub fn run_show(opts: ShowOptions) -> Result<()> {
    let (_config, store) = open_store(opts.data_dir)?;
    let task = require_task(&store, &opts.id)?.clone();

    let mut human = HumanOutput::new(format!("Task {}", task.id));
    describe_task(&mut human, &task);
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "show",
        &task,
        Some(&human),
    )
}

/// Options for `prio edit`
pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub tag: Option<String>,
    pub priority: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio edit`
pub fn run_edit(opts: EditOptions) -> Result<()> {
    let patch = TaskPatch {
        title: opts.title.as_deref().map(validated_title).transpose()?,
        description: opts.description,
        due_date: opts.due.as_deref().map(parse_due).transpose()?,
        tag: opts.tag,
        priority: opts
            .priority
            .as_deref()
            .map(|raw| raw.parse())
            .transpose()?,
        completed: None,
    };
    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "no fields to edit (pass --title, --description, --due, --tag, or --priority)"
                .to_string(),
        ));
    }

    let (_config, mut store) = open_store(opts.data_dir)?;
    require_task(&store, &opts.id)?;
    store.edit_fields(&opts.id, patch)?;
    tracing::info!(id = %opts.id, "task edited");

    let task = require_task(&store, &opts.id)?.clone();
    let mut human = HumanOutput::new(format!("Updated task '{}'", task.title));
    describe_task(&mut human, &task);
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "edit",
        &task,
        Some(&human),
    )
}

/// Options for `prio toggle`
pub struct ToggleOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Run `prio toggle`
pub fn run_toggle(opts: ToggleOptions) -> Result<()> {
    let (_config, mut store) = open_store(opts.data_dir)?;
    require_task(&store, &opts.id)?;
    store.toggle_completed(&opts.id)?;

    let task = require_task(&store, &opts.id)?.clone();
    let status = if task.completed {
        "completed"
    } else {
        "pending"
    };
    tracing::info!(id = %task.id, status, "task toggled");

    let human = HumanOutput::new(format!("Task '{}' is now {status}", task.title));
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "toggle",
        &task,
        Some(&human),
    )
}

/// Options for `prio rm`
pub struct RmOptions {
    pub id: String,
    pub force: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Output for `prio rm`
#[derive(Debug, Serialize)]
pub struct RmOutput {
    pub id: String,
    pub removed: bool,
    pub remaining: usize,
}

/// Run `prio rm`
pub fn run_rm(opts: RmOptions) -> Result<()> {
    let (_config, mut store) = open_store(opts.data_dir)?;

    let existed = store.get(&opts.id).is_some();
    if !existed && !opts.force {
        return Err(Error::TaskNotFound(opts.id));
    }
    store.remove(&opts.id)?;
    tracing::info!(id = %opts.id, existed, "task removed");

    let output = RmOutput {
        id: opts.id,
        removed: existed,
        remaining: store.len(),
    };
    let header = if output.removed {
        format!("Removed task {}", output.id)
    } else {
        format!("Task {} was already gone", output.id)
    };
    let human = HumanOutput::new(header);
    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "rm",
        &output,
        Some(&human),
    )
}
