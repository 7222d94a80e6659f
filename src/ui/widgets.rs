//! Reusable UI widget helpers

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, List, ListState, Paragraph},
    Frame,
};

/// Render a list that keeps the selected row in view.
///
/// Every list view goes through this so scrolling behaves the same
/// everywhere.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render a dimmed message inside `block`, for lists with nothing to show
pub fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let content = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(content, area);
}

/// Text of a test terminal's buffer, one line per row
#[cfg(test)]
pub(crate) fn screen_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
