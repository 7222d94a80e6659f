//! Users list view (admin)

use super::components::{badge, truncate_string};
use super::projects::placeholder;
use super::widgets::{render_empty, render_scrollable_list};
use crate::state::{AppState, User};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

const EMAIL_WIDTH: usize = 40;

fn role_badge(user: &User) -> Span<'static> {
    let color = if user.is_admin {
        Color::Magenta
    } else {
        Color::Blue
    };
    badge(user.role_label(), color)
}

fn user_line(user: &User, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let style = if is_selected {
        Style::default().fg(Color::Cyan).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let email = truncate_string(&user.email, EMAIL_WIDTH);
    Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(format!("{email:<EMAIL_WIDTH$} "), style),
        role_badge(user),
    ])
}

/// Draw the users list
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let users = &state.users;
    let block = Block::default()
        .title(format!(" Users ({}) ", users.items.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if users.items.is_empty() {
        let message = placeholder(users.status, "users", "Press 'n' to create a user.");
        render_empty(frame, area, block, &message);
        return;
    }

    let items: Vec<ListItem> = users
        .items
        .iter()
        .enumerate()
        .map(|(idx, user)| ListItem::new(user_line(user, idx == users.selected)))
        .collect();

    render_scrollable_list(frame, area, List::new(items).block(block), users.selected);
}
