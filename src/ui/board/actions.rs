use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::{Task, TaskPatch};
use crate::theme::{self, Theme};

use super::editor::EditorSubmit;

#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub message: String,
    pub task_id: Option<String>,
}

/// Create a task from a submitted editor form.
pub fn create_task(store: &mut TaskStore, submit: EditorSubmit) -> Result<ActionOutcome> {
    let title = submit.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }

    let mut task = Task::new(title, submit.priority);
    task.description = submit.description;
    task.tag = submit.tag;
    if let Some(due) = submit.due_date {
        task.due_date = due;
    }

    let id = task.id.clone();
    let message = format!("added '{}'", task.title);
    store.upsert(task)?;
    Ok(ActionOutcome {
        message,
        task_id: Some(id),
    })
}

/// Apply a submitted editor form to an existing task.
pub fn update_task(store: &mut TaskStore, id: &str, submit: EditorSubmit) -> Result<ActionOutcome> {
    if store.get(id).is_none() {
        return Err(Error::TaskNotFound(id.to_string()));
    }

    let patch = TaskPatch {
        title: Some(submit.title),
        description: Some(submit.description),
        due_date: submit.due_date,
        tag: Some(submit.tag),
        priority: Some(submit.priority),
        completed: None,
    };
    store.edit_fields(id, patch)?;

    let title = store
        .get(id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    Ok(ActionOutcome {
        message: format!("updated '{title}'"),
        task_id: Some(id.to_string()),
    })
}

/// Toggle the selected task between pending and completed.
pub fn toggle_task(store: &mut TaskStore, id: &str) -> Result<ActionOutcome> {
    if store.get(id).is_none() {
        return Err(Error::TaskNotFound(id.to_string()));
    }
    store.toggle_completed(id)?;

    let message = match store.get(id) {
        Some(task) if task.completed => format!("completed '{}'", task.title),
        Some(task) => format!("reopened '{}'", task.title),
        None => "toggled".to_string(),
    };
    Ok(ActionOutcome {
        message,
        task_id: Some(id.to_string()),
    })
}

/// Delete the selected task after confirmation.
pub fn delete_task(store: &mut TaskStore, id: &str) -> Result<ActionOutcome> {
    let title = store
        .get(id)
        .map(|task| task.title.clone())
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
    store.remove(id)?;
    Ok(ActionOutcome {
        message: format!("deleted '{title}'"),
        task_id: None,
    })
}

/// Advance the persisted theme preference one step and return the new one.
pub fn cycle_theme(store: &TaskStore) -> Result<Option<Theme>> {
    let storage = store.storage();
    let next = theme::cycle(storage.read_theme());
    match next {
        Some(theme) => storage.write_theme(theme)?,
        None => storage.clear_theme()?,
    }
    Ok(next)
}
