//! Project and user creation dialogs

use super::field_renderer::{draw_field, draw_help_text};
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::DialogForm;
use crate::ui::components::{centered_area, open_dialog};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Color,
    Frame,
};

const DIALOG_WIDTH: u16 = 56;
const FIELD_HEIGHT: u16 = 3;

/// Draw a fixed-layout creation dialog, one boxed input per field
pub fn draw_create_dialog<F: DialogForm>(frame: &mut Frame, title: &str, form: &F) {
    let count = form.field_count() as u16;
    let height = count * FIELD_HEIGHT + 4;
    let area = centered_area(frame.area(), DIALOG_WIDTH, height);
    let inner = open_dialog(frame, area, title, Color::Cyan);

    let mut constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for index in 0..form.field_count() {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, chunks[index], field, index == form.active_field());
        }
    }

    draw_help_text(
        frame,
        chunks[chunks.len() - 1],
        &[
            ("Tab", "next"),
            (SUBMIT_SHORTCUT, "create"),
            ("Esc", "cancel"),
        ],
    );
}
