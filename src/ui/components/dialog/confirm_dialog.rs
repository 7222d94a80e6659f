//! Confirmation dialog component for destructive actions

use super::base::{centered_area, open_dialog, truncate_string, wrap_text};
use crate::state::PendingDeleteAction;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render a confirmation dialog for delete action
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDeleteAction) {
    let dialog_width = 50u16;
    let text_width = (dialog_width - 4) as usize;
    let prompt = wrap_text(&action.prompt(), text_width);
    let dialog_height = prompt.len() as u16 + 8;
    let dialog_area = centered_area(frame.area(), dialog_width, dialog_height);
    let inner = open_dialog(frame, dialog_area, "Confirm Delete", Color::Red);

    let mut content: Vec<Line> = prompt
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White))))
        .collect();
    content.push(Line::from(Span::styled(
        truncate_string(&action.entity_display, text_width),
        Style::default().fg(Color::Cyan),
    )));
    content.push(Line::from(""));

    // Add options with selection highlighting
    let options = [(false, "Cancel", Color::White), (true, "Delete", Color::Red)];
    for (is_delete, label, color) in options {
        let is_selected = action.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("←→", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(
        Paragraph::new(content).style(Style::new().bg(Color::Black).fg(Color::White)),
        inner,
    );
}
