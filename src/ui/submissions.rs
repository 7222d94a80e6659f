//! Submissions list and detail dialog (user)

use super::components::{centered_area, open_dialog, truncate_string};
use super::projects::placeholder;
use super::widgets::{render_empty, render_scrollable_list};
use crate::state::{AppState, Submission};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const COLUMN_WIDTH: usize = 18;
const DETAIL_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 22;

fn cell(value: &str) -> String {
    format!("{:<COLUMN_WIDTH$} ", truncate_string(value, COLUMN_WIDTH))
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Field rows of a submission's detail, one per answered label
pub fn submission_rows(submission: &Submission) -> Vec<(String, String)> {
    submission
        .fields
        .iter()
        .map(|(label, value)| (label.clone(), value.display()))
        .collect()
}

fn header_line() -> Line<'static> {
    let style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    Line::from(Span::styled(
        format!(
            "  {}{}{}{}",
            cell("Project"),
            cell("Form"),
            cell("Patient ID"),
            cell("Submitted")
        ),
        style,
    ))
}

fn submission_line(submission: &Submission, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let submitted = submission.submitted_display();
    Line::from(Span::styled(
        format!(
            "{prefix}{}{}{}{}",
            cell(or_dash(submission.project_name.as_deref())),
            cell(or_dash(submission.form_name.as_deref())),
            cell(or_dash(Some(submission.patient_id.as_str()))),
            cell(or_dash(Some(submitted.as_str()))),
        ),
        style,
    ))
}

/// Draw the submissions list
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let submissions = &state.submissions;
    let block = Block::default()
        .title(format!(" Submissions ({}) ", submissions.items.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if submissions.items.is_empty() {
        let message = placeholder(
            submissions.status,
            "submissions",
            "Open a project and fill in one of its forms.",
        );
        render_empty(frame, area, block, &message);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    frame.render_widget(
        Paragraph::new(header_line()),
        Rect {
            height: 1,
            ..inner
        },
    );

    let items: Vec<ListItem> = submissions
        .items
        .iter()
        .enumerate()
        .map(|(idx, s)| ListItem::new(submission_line(s, idx == submissions.selected)))
        .collect();
    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    render_scrollable_list(frame, list_area, List::new(items), submissions.selected);
}

/// Draw the detail dialog of an opened submission
pub fn draw_detail(frame: &mut Frame, submission: &Submission) {
    let label_style = Style::default().fg(Color::DarkGray);
    let mut content = vec![
        Line::from(vec![
            Span::styled("Project:    ", label_style),
            Span::raw(or_dash(submission.project_name.as_deref()).to_string()),
        ]),
        Line::from(vec![
            Span::styled("Form:       ", label_style),
            Span::raw(or_dash(submission.form_name.as_deref()).to_string()),
        ]),
        Line::from(vec![
            Span::styled("Patient ID: ", label_style),
            Span::raw(or_dash(Some(submission.patient_id.as_str())).to_string()),
        ]),
        Line::from(vec![
            Span::styled("Submitted:  ", label_style),
            Span::raw(or_dash(Some(submission.submitted_display().as_str())).to_string()),
        ]),
        Line::from(""),
    ];

    let rows = submission_rows(submission);
    if rows.is_empty() {
        content.push(Line::from(Span::styled("No answers recorded.", label_style)));
    }
    for (label, value) in rows {
        content.push(Line::from(vec![
            Span::styled(
                format!("{:<LABEL_WIDTH$} ", truncate_string(&label, LABEL_WIDTH)),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(value),
        ]));
    }
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" close", label_style),
    ]));

    let height = (content.len() as u16 + 2).min(frame.area().height);
    let area = centered_area(frame.area(), DETAIL_WIDTH, height);
    let inner = open_dialog(frame, area, "Submission", Color::Cyan);
    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .style(Style::new().bg(Color::Black).fg(Color::White)),
        inner,
    );
}
