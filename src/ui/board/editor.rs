use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Title,
    Description,
    Due,
    Tag,
    Priority,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct EditorSubmit {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tag: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

/// Modal form state for creating or editing a task.
///
/// The priority field is not typed: it cycles through the three buckets
/// with Left/Right or Space while active.
#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    fields: Vec<EditorField>,
    priority: Priority,
    active: usize,
    confirming: bool,
    error: Option<String>,
    task_id: Option<String>,
}

impl EditorState {
    pub fn new_task(default_priority: Priority) -> Self {
        Self {
            kind: EditorKind::NewTask,
            fields: text_fields(None),
            priority: default_priority,
            active: 0,
            confirming: false,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            kind: EditorKind::EditTask,
            fields: text_fields(Some(task)),
            priority: task.priority,
            active: 0,
            confirming: false,
            error: None,
            task_id: Some(task.id.clone()),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The priority selector sits after the text fields in tab order.
    pub fn priority_active(&self) -> bool {
        self.active == self.fields.len()
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.confirming = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if self.confirming {
            return self.handle_confirm_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.move_active(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_active(-1);
            }
            KeyCode::Enter => {
                if self.active >= self.fields.len() {
                    return self.attempt_confirm();
                }
                self.move_active(1);
            }
            KeyCode::Left if self.priority_active() => {
                self.priority = self.priority.prev();
            }
            KeyCode::Right if self.priority_active() => {
                self.priority = self.priority.next();
            }
            KeyCode::Char(' ') if self.priority_active() => {
                self.priority = self.priority.next();
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EditorAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        EditorAction::None
    }

    pub fn build_submit(&self) -> Result<EditorSubmit, String> {
        self.validate()?;
        let due_date = parse_due_field(self.field_value(EditorFieldId::Due))?;
        Ok(EditorSubmit {
            title: self.field_value(EditorFieldId::Title).trim().to_string(),
            description: self.field_value(EditorFieldId::Description).to_string(),
            due_date,
            tag: self.field_value(EditorFieldId::Tag).trim().to_string(),
            priority: self.priority,
        })
    }

    fn attempt_confirm(&mut self) -> EditorAction {
        match self.validate() {
            Ok(()) => {
                self.confirming = true;
                EditorAction::None
            }
            Err(err) => {
                self.error = Some(err);
                self.confirming = false;
                EditorAction::None
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Esc => EditorAction::Cancel,
            KeyCode::Backspace | KeyCode::Char('e') => {
                self.confirming = false;
                self.error = None;
                EditorAction::None
            }
            KeyCode::Char('y') | KeyCode::Enter => EditorAction::Submit,
            _ => EditorAction::None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.field_value(EditorFieldId::Title).trim().is_empty() {
            return Err("title is required".to_string());
        }
        parse_due_field(self.field_value(EditorFieldId::Due))?;
        Ok(())
    }

    fn move_active(&mut self, delta: isize) {
        // text fields plus the trailing priority selector
        let len = self.fields.len() as isize + 1;
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.active)
    }

    fn field_value(&self, id: EditorFieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }
}

fn text_fields(task: Option<&Task>) -> Vec<EditorField> {
    vec![
        EditorField {
            id: EditorFieldId::Title,
            label: "Title",
            value: task.map(|t| t.title.clone()).unwrap_or_default(),
            required: true,
        },
        EditorField {
            id: EditorFieldId::Description,
            label: "Description",
            value: task.map(|t| t.description.clone()).unwrap_or_default(),
            required: false,
        },
        EditorField {
            id: EditorFieldId::Due,
            label: "Due (YYYY-MM-DD)",
            value: task
                .map(|t| t.due_date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            required: false,
        },
        EditorField {
            id: EditorFieldId::Tag,
            label: "Tag",
            value: task.map(|t| t.tag.clone()).unwrap_or_default(),
            required: false,
        },
    ]
}

fn parse_due_field(value: &str) -> Result<Option<DateTime<Utc>>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| "due date must be YYYY-MM-DD".to_string())?;
    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(editor: &mut EditorState, text: &str) {
        for ch in text.chars() {
            editor.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn editor_requires_title() {
        let mut editor = EditorState::new_task(Priority::Medium);
        for _ in 0..=editor.fields().len() {
            let action = editor.handle_key(key(KeyCode::Enter));
            assert_eq!(action, EditorAction::None);
        }
        assert_eq!(editor.error(), Some("title is required"));
    }

    #[test]
    fn editor_rejects_bad_due_date() {
        let mut editor = EditorState::new_task(Priority::Medium);
        type_text(&mut editor, "Buy milk");
        editor.handle_key(key(KeyCode::Tab));
        editor.handle_key(key(KeyCode::Tab));
        type_text(&mut editor, "tomorrow");
        for _ in 0..=editor.fields().len() {
            editor.handle_key(key(KeyCode::Enter));
        }
        assert_eq!(editor.error(), Some("due date must be YYYY-MM-DD"));
    }

    #[test]
    fn submit_carries_cycled_priority() {
        let mut editor = EditorState::new_task(Priority::Medium);
        type_text(&mut editor, "Buy milk");
        // tab through the text fields to the priority selector
        for _ in 0..editor.fields().len() {
            editor.handle_key(key(KeyCode::Tab));
        }
        assert!(editor.priority_active());
        editor.handle_key(key(KeyCode::Right));
        let submit = editor.build_submit().unwrap();
        assert_eq!(submit.title, "Buy milk");
        assert_eq!(submit.priority, Priority::High);
        assert!(submit.due_date.is_none());
    }

    #[test]
    fn edit_task_presets_fields() {
        let mut task = Task::new("Water plants", Priority::Low);
        task.tag = "home".to_string();
        let editor = EditorState::edit_task(&task);
        assert_eq!(editor.kind(), EditorKind::EditTask);
        assert_eq!(editor.task_id(), Some(task.id.as_str()));
        assert_eq!(editor.priority(), Priority::Low);
        let submit = editor.build_submit().unwrap();
        assert_eq!(submit.title, "Water plants");
        assert_eq!(submit.tag, "home");
        assert!(submit.due_date.is_some());
    }

    #[test]
    fn enter_then_y_submits() {
        let mut editor = EditorState::new_task(Priority::High);
        type_text(&mut editor, "Ship it");
        for _ in 0..editor.fields().len() {
            editor.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(editor.handle_key(key(KeyCode::Enter)), EditorAction::None);
        assert!(editor.confirming());
        assert_eq!(editor.handle_key(key(KeyCode::Char('y'))), EditorAction::Submit);
    }
}
