//! Form builder dialog (admin)

use super::field_renderer::draw_help_text;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{BuilderSlot, FormBuilderForm};
use crate::ui::components::{centered_area, open_dialog};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 24;
const LABEL_WIDTH: usize = 12;
const CURSOR: &str = "▌";

/// One labelled row. Returns the row and whether it holds the focus.
fn row(
    indent: &str,
    label: &str,
    value: &str,
    focused: bool,
    cursor: bool,
) -> (Line<'static>, bool) {
    let marker = if focused { "▸" } else { " " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("{marker}{indent}{label:<LABEL_WIDTH$}"), label_style),
        Span::raw(value.to_string()),
    ];
    if focused && cursor {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
    }
    (Line::from(spans), focused)
}

fn selector(value: &str) -> String {
    format!("◂ {value} ▸")
}

/// Lines of the builder and the index of the focused line
pub fn builder_lines(form: &FormBuilderForm) -> (Vec<Line<'static>>, usize) {
    let active = form.active();
    let mut lines = Vec::new();
    let mut focus_line = 0;
    let mut push = |lines: &mut Vec<Line<'static>>, (line, focused): (Line<'static>, bool)| {
        if focused {
            focus_line = lines.len();
        }
        lines.push(line);
    };

    push(
        &mut lines,
        row(
            "",
            "Form Name",
            form.name.as_text(),
            active == BuilderSlot::Name,
            true,
        ),
    );
    let project = form
        .selected_project()
        .map(|p| p.name.as_str())
        .unwrap_or("Select a project");
    push(
        &mut lines,
        row(
            "",
            "Project",
            &selector(project),
            active == BuilderSlot::Project,
            false,
        ),
    );
    lines.push(Line::from(""));

    if form.drafts.is_empty() {
        lines.push(Line::from(Span::styled(
            " No fields yet. Ctrl+N adds one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, draft) in form.drafts.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!(" Field {}", i + 1),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        push(
            &mut lines,
            row(
                "  ",
                "Label",
                &draft.label,
                active == BuilderSlot::Label(i),
                true,
            ),
        );
        push(
            &mut lines,
            row(
                "  ",
                "Type",
                &selector(draft.field_type.label()),
                active == BuilderSlot::Type(i),
                false,
            ),
        );
        if draft.field_type.has_options() {
            let focused = active == BuilderSlot::Options(i);
            let option_lines: Vec<&str> = draft.options_text.split('\n').collect();
            let last = option_lines.len() - 1;
            // The focus marker and cursor sit on the line being typed
            for (n, option) in option_lines.into_iter().enumerate() {
                let label = if n == 0 { "Options" } else { "" };
                push(&mut lines, row("  ", label, option, focused && n == last, true));
            }
        }
    }

    (lines, focus_line)
}

/// Draw the builder dialog
pub fn draw_builder(frame: &mut Frame, form: &FormBuilderForm) {
    let area = centered_area(frame.area(), DIALOG_WIDTH, DIALOG_HEIGHT);
    let inner = open_dialog(frame, area, "New Form", Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let (lines, focus_line) = builder_lines(form);
    let visible = chunks[0].height as usize;
    let scroll = focus_line.saturating_sub(visible.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), chunks[0]);

    draw_help_text(
        frame,
        chunks[1],
        &[
            ("Tab", "next"),
            ("←→", "choose"),
            ("^N", "field"),
            ("^D", "remove"),
            (SUBMIT_SHORTCUT, "save"),
            ("Esc", "cancel"),
        ],
    );
}
