//! Layout components (stats header, sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{AppState, Mode, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 20;

/// Areas of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub sidebar: Rect,
    /// Counter row above the content, admin only
    pub header: Option<Rect>,
    pub main: Rect,
    pub status: Rect,
}

/// Create the main layout with sidebar and status bar
pub fn create_layout(area: Rect, mode: Mode) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar and content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    let (header, main) = match mode {
        Mode::Admin => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(columns[1]);
            (Some(parts[0]), parts[1])
        }
        Mode::User => (None, columns[1]),
    };

    ScreenAreas {
        sidebar: columns[0],
        header,
        main,
        status: rows[1],
    }
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let items = View::sidebar(state.mode);
    let active = state.current_view.sidebar_parent();

    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(items.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in items.iter().enumerate() {
        render_sidebar_button(
            frame,
            chunks[idx + 1],
            &(idx + 1).to_string(),
            view.label(),
            *view == active,
        );
    }
}

/// Draw the admin counters, animated while a count-up is running
pub fn draw_stats_header(frame: &mut Frame, area: Rect, state: &AppState, now: Instant) {
    let stats = &state.stats;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(" Projects ", label),
        Span::styled(stats.projects.value_at(now).to_string(), value),
        Span::styled("   Users ", label),
        Span::styled(stats.users.value_at(now).to_string(), value),
        Span::styled("   Forms ", label),
        Span::styled(stats.forms.value_at(now).to_string(), value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState, in_flight: usize) {
    let mut spans = vec![];

    let conn_status = match state.api_connected {
        Some(true) => Span::styled(" ● ", Style::default().fg(Color::Green)),
        Some(false) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        None => Span::styled(" ○ ", Style::default().fg(Color::Gray)),
    };
    spans.push(conn_status);

    spans.push(Span::styled(
        view_hints(state),
        Style::default().fg(Color::DarkGray),
    ));

    if in_flight > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Loading...", Style::default().fg(Color::Yellow)));
    }

    let mode_hint = match state.mode {
        Mode::Admin => " admin  q:quit ",
        Mode::User => " user  q:quit ",
    };

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let hint_width = mode_hint.len() as u16;
    let hint_area = Rect {
        x: area.x + area.width.saturating_sub(hint_width),
        y: area.y,
        width: hint_width.min(area.width),
        height: 1,
    };
    let hint =
        Paragraph::new(mode_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(hint, hint_area);
}

/// Keyboard hints for whatever currently has focus
pub fn view_hints(state: &AppState) -> String {
    if state.pending_delete.is_some() {
        return "←→:select  y:delete  Esc:cancel".to_string();
    }
    if state.form_state.is_open() {
        return format!("Tab:next  {SUBMIT_SHORTCUT}:save  Esc:cancel");
    }
    if state.form_fill.is_some() {
        return format!(
            "Tab:next  ←→:choose  Space:toggle  Enter/{SUBMIT_SHORTCUT}:submit  Esc:close"
        );
    }
    if state.submission_detail.is_some() {
        return "Esc:close".to_string();
    }

    match (state.current_view, state.mode) {
        (View::Projects, Mode::Admin) => "h/j/k/l:nav  n:new  d:delete  r:refresh".to_string(),
        (View::Projects, Mode::User) => "h/j/k/l:nav  Enter:open  r:refresh".to_string(),
        (View::ProjectForms, _) => "h/j/k/l:nav  Enter:fill  Esc:back".to_string(),
        (View::Users, _) => "j/k:nav  n:new  d:delete  r:refresh".to_string(),
        (View::Forms, _) => "h/j/k/l:nav  n:new  d:delete  r:refresh".to_string(),
        (View::Submissions, _) => "j/k:nav  Enter:view  r:refresh".to_string(),
    }
}
