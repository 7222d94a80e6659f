//! Dialog for filling in a form (user)

use super::field_renderer::{
    draw_field_view, draw_field_with_value, draw_help_text, render_field, FieldView,
};
use crate::state::{FillFocus, FillSession};
use crate::ui::components::{centered_area, open_dialog};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};

const DIALOG_WIDTH: u16 = 64;
const PATIENT_HEIGHT: u16 = 3;

/// Views for every schema field, in schema order
pub fn field_views(session: &FillSession) -> Vec<FieldView> {
    let fill = &session.fill;
    fill.entries()
        .enumerate()
        .map(|(i, (field, input))| {
            let focused = fill.focus == FillFocus::Field(i);
            let view = render_field(field, input, focused);
            if focused {
                view.with_cursor(fill.option_cursor)
            } else {
                view
            }
        })
        .collect()
}

fn total_height(heights: impl IntoIterator<Item = u16>) -> u16 {
    heights.into_iter().fold(0, u16::saturating_add)
}

/// First block to draw so the focused block fits in `available` rows.
/// Block 0 is the patient number; block i + 1 is field i.
fn first_visible(heights: &[u16], focused: usize, available: u16) -> usize {
    let mut first = 0;
    let mut used = total_height(heights[..=focused].iter().copied());
    while used > available && first < focused {
        used = used.saturating_sub(heights[first]);
        first += 1;
    }
    first
}

/// Draw the fill dialog over the current view
pub fn draw_fill(frame: &mut Frame, session: &FillSession) {
    let views = field_views(session);
    let content_height = total_height(views.iter().map(FieldView::height));
    let area = centered_area(
        frame.area(),
        DIALOG_WIDTH,
        PATIENT_HEIGHT
            .saturating_add(content_height)
            .saturating_add(3),
    );
    let inner = open_dialog(frame, area, &session.form_name, Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let body = chunks[0];

    let mut heights = vec![PATIENT_HEIGHT];
    heights.extend(views.iter().map(FieldView::height));
    let focused = match session.fill.focus {
        FillFocus::PatientNumber => 0,
        FillFocus::Field(i) => i + 1,
    };
    let first = first_visible(&heights, focused.min(heights.len() - 1), body.height);

    let mut y = body.y;
    for (block, height) in heights.iter().enumerate().skip(first) {
        if y.saturating_add(*height) > body.y.saturating_add(body.height) {
            break;
        }
        let block_area = Rect {
            y,
            height: *height,
            ..body
        };
        if block == 0 {
            draw_field_with_value(
                frame,
                block_area,
                "Patient Number *",
                &session.fill.patient_number,
                focused == 0,
                false,
            );
        } else {
            draw_field_view(frame, block_area, &views[block - 1]);
        }
        y += height;
    }

    draw_help_text(
        frame,
        chunks[1],
        &[
            ("Tab", "next"),
            ("←→", "choose"),
            ("Space", "toggle"),
            ("Enter", "submit"),
            ("Esc", "close"),
        ],
    );
}
