use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::error::Result;
use crate::store::{PriorityBuckets, TaskStore};
use crate::task::Priority;
use crate::theme::{self, Theme};

use super::actions;
use super::editor::{EditorAction, EditorKind, EditorState};
use super::model::Selection;
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

#[derive(Default, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

pub struct AppState {
    pub(crate) buckets: PriorityBuckets,
    pub(crate) selection: Selection,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) show_help: bool,
    pub(crate) theme: Theme,
    info_message: Option<String>,
    error_message: Option<String>,
    viewport: Viewport,
    default_priority: Priority,
    store: TaskStore,
}

impl AppState {
    fn new(store: TaskStore, config: &Config) -> Self {
        let buckets = store.partition_by_priority();
        let theme = theme::resolve(store.storage().read_theme());
        let mut state = Self {
            buckets,
            selection: Selection::default(),
            editor: None,
            delete_confirm: None,
            show_help: false,
            theme,
            info_message: None,
            error_message: None,
            viewport: Viewport::default(),
            default_priority: config.default_priority,
            store,
        };
        state.selection.clamp(&state.buckets);
        state
    }

    fn update_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    pub(crate) fn total_tasks(&self) -> usize {
        self.buckets.total()
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.error_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(message) = self.info_message.as_ref() {
            return Some((message.clone(), StatusKind::Info));
        }
        None
    }

    /// Rebuild the buckets from the store and keep the cursor on the task
    /// it was on, wherever it ended up.
    fn refresh(&mut self, follow_id: Option<&str>) {
        self.buckets = self.store.partition_by_priority();
        self.selection.follow(&self.buckets, follow_id);
    }

    fn set_info(&mut self, message: String) {
        self.info_message = Some(message);
        self.error_message = None;
    }

    fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.info_message = None;
    }

    fn clear_messages(&mut self) {
        self.info_message = None;
        self.error_message = None;
    }

    /// Handle a key press. Returns true when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            self.show_help = false;
            return false;
        }
        if self.delete_confirm.is_some() {
            self.handle_delete_confirm_key(key);
            return false;
        }
        if self.editor.is_some() {
            self.handle_editor_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.clear_messages(),
            KeyCode::Up | KeyCode::Char('k') => self.selection.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.selection.move_down(&self.buckets),
            KeyCode::Left | KeyCode::Char('h') => self.selection.move_left(&self.buckets),
            KeyCode::Right | KeyCode::Char('l') => self.selection.move_right(&self.buckets),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('a') => {
                self.editor = Some(EditorState::new_task(self.default_priority));
            }
            KeyCode::Char('e') => self.open_edit_editor(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
        false
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.handle_key(key) {
            EditorAction::None => {}
            EditorAction::Cancel => {
                self.editor = None;
            }
            EditorAction::Submit => self.submit_editor(),
        }
    }

    fn submit_editor(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let submit = match editor.build_submit() {
            Ok(submit) => submit,
            Err(message) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.set_error(message);
                }
                return;
            }
        };

        let result = match editor.kind() {
            EditorKind::NewTask => actions::create_task(&mut self.store, submit),
            EditorKind::EditTask => {
                let id = editor.task_id().unwrap_or_default().to_string();
                actions::update_task(&mut self.store, &id, submit)
            }
        };

        match result {
            Ok(outcome) => {
                self.editor = None;
                self.refresh(outcome.task_id.as_deref());
                self.set_info(outcome.message);
            }
            Err(err) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.set_error(err.to_string());
                }
            }
        }
    }

    fn open_edit_editor(&mut self) {
        let Some(id) = self.selection.selected_id(&self.buckets) else {
            return;
        };
        if let Some(task) = self.store.get(&id) {
            self.editor = Some(EditorState::edit_task(task));
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selection.selected_id(&self.buckets) else {
            return;
        };
        match actions::toggle_task(&mut self.store, &id) {
            Ok(outcome) => {
                self.refresh(Some(&id));
                self.set_info(outcome.message);
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn request_delete(&mut self) {
        let Some(id) = self.selection.selected_id(&self.buckets) else {
            return;
        };
        let Some(task) = self.store.get(&id) else {
            return;
        };
        self.delete_confirm = Some(DeleteConfirmState {
            task_id: task.id.clone(),
            title: task.title.clone(),
        });
    }

    fn handle_delete_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let Some(confirm) = self.delete_confirm.take() else {
                    return;
                };
                match actions::delete_task(&mut self.store, &confirm.task_id) {
                    Ok(outcome) => {
                        self.refresh(None);
                        self.set_info(outcome.message);
                    }
                    Err(err) => self.set_error(err.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.delete_confirm = None;
            }
            _ => {}
        }
    }

    fn cycle_theme(&mut self) {
        match actions::cycle_theme(&self.store) {
            Ok(preference) => {
                self.theme = theme::resolve(preference);
                let label = match preference {
                    Some(theme) => theme.as_str(),
                    None => "default",
                };
                self.set_info(format!("theme: {label}"));
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }
}

/// Open the interactive board and block until the user quits.
pub fn run(store: TaskStore, config: Config) -> Result<()> {
    let mut app = AppState::new(store, &config);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width, frame.size().height);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::task::Task;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_tasks(titles: &[(&str, Priority)]) -> (TempDir, AppState) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("prio"));
        let mut store = TaskStore::open(storage);
        for (title, priority) in titles {
            store.upsert(Task::new(*title, *priority)).unwrap();
        }
        let app = AppState::new(store, &Config::default());
        (temp, app)
    }

    #[test]
    fn q_quits() {
        let (_temp, mut app) = app_with_tasks(&[]);
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn space_toggles_selected_task() {
        let (_temp, mut app) = app_with_tasks(&[("Buy milk", Priority::High)]);
        assert!(!app.handle_key(key(KeyCode::Char(' '))));
        let id = app.selection.selected_id(&app.buckets).unwrap();
        assert!(app.store.get(&id).unwrap().completed);

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.store.get(&id).unwrap().completed);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (_temp, mut app) = app_with_tasks(&[("Ephemeral", Priority::Medium)]);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.delete_confirm.is_some());

        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.delete_confirm.is_none());
        assert_eq!(app.store.len(), 1);

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.store.is_empty());
        assert_eq!(app.total_tasks(), 0);
    }

    #[test]
    fn add_form_submits_into_default_bucket() {
        let (_temp, mut app) = app_with_tasks(&[]);
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.editor.is_some());

        for ch in "Water plants".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        // advance past every field, then confirm
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Enter));
        }
        app.handle_key(key(KeyCode::Char('y')));

        assert!(app.editor.is_none());
        assert_eq!(app.buckets.medium.len(), 1);
        assert_eq!(app.buckets.medium[0].title, "Water plants");
    }

    #[test]
    fn t_cycles_and_persists_theme() {
        let (_temp, mut app) = app_with_tasks(&[]);
        assert_eq!(app.theme, Theme::Dark);

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.store.storage().read_theme(), Some(Theme::Dark));
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Light);
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.store.storage().read_theme(), None);
    }

    #[test]
    fn help_closes_on_any_key() {
        let (_temp, mut app) = app_with_tasks(&[]);
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('x')));
        assert!(!app.show_help);
    }
}
