use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{Priority, Task};
use crate::theme::Theme;

use super::app::{AppState, DeleteConfirmState, StatusKind};
use super::editor::EditorState;

const HELP_KEY_WIDTH: usize = 12;

pub(crate) struct Palette {
    pub text: Color,
    pub muted: Color,
    pub background: Color,
    pub accent: Color,
    pub info: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub selection_bg: Color,
}

const DARK: Palette = Palette {
    text: Color::Rgb(234, 236, 239),
    muted: Color::Rgb(160, 165, 172),
    background: Color::Rgb(24, 26, 30),
    accent: Color::Rgb(122, 170, 255),
    info: Color::Rgb(116, 198, 219),
    error: Color::Rgb(255, 107, 107),
    success: Color::Rgb(126, 210, 146),
    warning: Color::Rgb(244, 200, 98),
    border: Color::Rgb(92, 126, 166),
    selection_bg: Color::Rgb(52, 56, 60),
};

const LIGHT: Palette = Palette {
    text: Color::Rgb(32, 36, 40),
    muted: Color::Rgb(110, 118, 126),
    background: Color::Rgb(246, 247, 248),
    accent: Color::Rgb(36, 92, 196),
    info: Color::Rgb(22, 122, 152),
    error: Color::Rgb(188, 44, 44),
    success: Color::Rgb(34, 134, 70),
    warning: Color::Rgb(158, 116, 18),
    border: Color::Rgb(120, 146, 180),
    selection_bg: Color::Rgb(222, 228, 238),
};

pub(crate) fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let colors = palette(app.theme);
    let area = frame.size();
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);
    let header = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_header(frame, app, colors, header);
    render_columns(frame, app, colors, main);
    render_footer(frame, app, colors, footer);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, colors, editor);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, colors, state);
    }
    if app.show_help {
        render_help_modal(frame, area, colors);
    }
}

fn render_header(frame: &mut Frame, app: &AppState, colors: &Palette, area: Rect) {
    let total = app.total_tasks();
    let done = Priority::ALL
        .iter()
        .map(|p| {
            app.buckets
                .bucket(*p)
                .iter()
                .filter(|t| t.completed)
                .count()
        })
        .sum::<usize>();
    let line = Line::from(vec![
        Span::styled(
            " prio ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{done}/{total} done"),
            Style::default().fg(colors.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_columns(frame: &mut Frame, app: &AppState, colors: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);

    // high on the left, matching the cursor model
    for (idx, priority) in [Priority::High, Priority::Medium, Priority::Low]
        .into_iter()
        .enumerate()
    {
        render_column(frame, app, colors, chunks[idx], priority);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &AppState,
    colors: &Palette,
    area: Rect,
    priority: Priority,
) {
    let tasks = app.buckets.bucket(priority);
    let selected_here = app.selection.column == priority;
    let border_color = if selected_here {
        colors.accent
    } else {
        colors.border
    };
    let accent = priority_color(colors, priority);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ({}) ", priority.as_str(), tasks.len()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if tasks.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("empty", Style::default().fg(colors.muted))),
            inner,
        );
        return;
    }

    // two lines per task; keep the selected row in view
    let visible_rows = (inner.height as usize / 2).max(1);
    let first = if selected_here && app.selection.row >= visible_rows {
        app.selection.row + 1 - visible_rows
    } else {
        0
    };

    let mut lines: Vec<Line> = Vec::new();
    for (row, task) in tasks.iter().enumerate().skip(first).take(visible_rows) {
        let selected = selected_here && row == app.selection.row;
        lines.push(task_title_line(colors, task, selected));
        lines.push(task_meta_line(colors, task, selected));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn task_title_line(colors: &Palette, task: &Task, selected: bool) -> Line<'static> {
    let mark = if task.completed { "[x] " } else { "[ ] " };
    let mut title_style = if task.completed {
        Style::default()
            .fg(colors.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(colors.text)
    };
    let mut mark_style = Style::default().fg(if task.completed {
        colors.success
    } else {
        colors.muted
    });
    if selected {
        title_style = title_style.bg(colors.selection_bg).add_modifier(Modifier::BOLD);
        mark_style = mark_style.bg(colors.selection_bg);
    }
    Line::from(vec![
        Span::styled(mark.to_string(), mark_style),
        Span::styled(task.title.clone(), title_style),
    ])
}

fn task_meta_line(colors: &Palette, task: &Task, selected: bool) -> Line<'static> {
    let mut style = Style::default().fg(colors.muted);
    if selected {
        style = style.bg(colors.selection_bg);
    }
    let mut meta = format!("    due {}", task.due_date.format("%Y-%m-%d"));
    if !task.tag.is_empty() {
        meta.push_str(&format!("  #{}", task.tag));
    }
    Line::from(Span::styled(meta, style))
}

fn render_footer(frame: &mut Frame, app: &AppState, colors: &Palette, area: Rect) {
    if let Some((message, kind)) = app.status_line() {
        let color = match kind {
            StatusKind::Error => colors.error,
            StatusKind::Info => colors.info,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {message}"), Style::default().fg(color))),
            area,
        );
        return;
    }

    let hints = " space toggle  a add  e edit  d delete  t theme  ? help  q quit";
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(colors.muted))),
        area,
    );
}

fn render_editor_modal(frame: &mut Frame, area: Rect, colors: &Palette, editor: &EditorState) {
    let height = (editor.fields().len() as u16 + 7).min(area.height);
    let modal = centered_rect(area, 52, height);
    frame.render_widget(Clear, modal);

    let title = match editor.task_id() {
        Some(_) => " Edit task ",
        None => " New task ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
        .title(Span::styled(
            title,
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(colors.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let active = idx == editor.active_index() && !editor.confirming();
        let label_style = if active {
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted)
        };
        let value_style = Style::default().fg(colors.text);
        let cursor = if active { "_" } else { "" };
        let required = if field.required { "*" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}: ", field.label, required), label_style),
            Span::styled(format!("{}{cursor}", field.value), value_style),
        ]));
    }

    let priority_style = if editor.priority_active() && !editor.confirming() {
        Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };
    lines.push(Line::from(vec![
        Span::styled("Priority: ", priority_style),
        Span::styled(
            format!("< {} >", editor.priority().as_str()),
            Style::default().fg(priority_color(colors, editor.priority())),
        ),
    ]));

    lines.push(Line::default());
    if editor.confirming() {
        lines.push(Line::from(Span::styled(
            "save? y/enter confirm, e edit, esc cancel",
            Style::default().fg(colors.warning),
        )));
    } else if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(colors.error),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "tab next field, enter save, esc cancel",
            Style::default().fg(colors.muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_delete_confirm_modal(
    frame: &mut Frame,
    area: Rect,
    colors: &Palette,
    state: &DeleteConfirmState,
) {
    let modal = centered_rect(area, 46, 5);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.error))
        .title(Span::styled(
            " Delete task ",
            Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(colors.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines = vec![
        Line::from(Span::styled(
            format!("delete '{}'?", state.title),
            Style::default().fg(colors.text),
        )),
        Line::from(Span::styled(
            "y/enter confirm, n/esc cancel",
            Style::default().fg(colors.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_help_modal(frame: &mut Frame, area: Rect, colors: &Palette) {
    let entries: [(&str, &str); 9] = [
        ("arrows/hjkl", "move between tasks and buckets"),
        ("space", "toggle pending/completed"),
        ("a", "add a task"),
        ("e", "edit the selected task"),
        ("d", "delete the selected task"),
        ("t", "cycle theme (dark, light, default)"),
        ("esc", "dismiss message"),
        ("?", "this help"),
        ("q", "quit"),
    ];

    let modal = centered_rect(area, 54, entries.len() as u16 + 2);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(Span::styled(
            " Keys ",
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(colors.background));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:>HELP_KEY_WIDTH$}  "),
                    Style::default().fg(colors.accent),
                ),
                Span::styled(*action, Style::default().fg(colors.text)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn priority_color(colors: &Palette, priority: Priority) -> Color {
    match priority {
        Priority::Low => colors.info,
        Priority::Medium => colors.warning,
        Priority::High => colors.error,
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
