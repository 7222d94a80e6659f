//! Projects grid view, and the card grid shared with the forms views

use crate::state::{AppState, LoadStatus, Mode, Project};
use crate::ui::components::truncate_string;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Grid layout configuration
pub const MIN_CARD_WIDTH: u16 = 24;
pub const CARD_SPACING_H: u16 = 1;
const CARD_HEIGHT: u16 = 5; // 1 (top border) + 3 (content) + 1 (bottom border)

/// Contents of one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub lines: Vec<String>,
}

/// Helper for grid layout calculations
struct GridLayout {
    columns: usize,
    card_width: u16,
}

impl GridLayout {
    /// Create a new grid layout based on available width
    fn new(area_width: u16) -> Self {
        // Account for outer block borders (2 chars total)
        let usable_width = area_width.saturating_sub(2);

        // Each card needs MIN_CARD_WIDTH plus spacing (except the last card)
        let columns = if usable_width >= MIN_CARD_WIDTH {
            ((usable_width + CARD_SPACING_H) / (MIN_CARD_WIDTH + CARD_SPACING_H)) as usize
        } else {
            1
        };
        let columns = columns.max(1);

        // Distribute remaining space evenly across cards
        let total_spacing = (columns.saturating_sub(1) as u16) * CARD_SPACING_H;
        let card_width = (usable_width.saturating_sub(total_spacing)) / columns as u16;

        Self {
            columns,
            card_width: card_width.max(MIN_CARD_WIDTH.min(usable_width)),
        }
    }

    /// Convert linear index to (row, col)
    fn index_to_pos(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Get card area for a given position within the inner area
    fn card_area(&self, inner: Rect, row: usize, col: usize) -> Rect {
        Rect {
            x: inner.x + (col as u16) * (self.card_width + CARD_SPACING_H),
            y: inner.y + (row as u16) * CARD_HEIGHT,
            width: self.card_width,
            height: CARD_HEIGHT,
        }
    }
}

/// Placeholder text for a list with nothing to show
pub fn placeholder(status: LoadStatus, plural: &str, empty_hint: &str) -> String {
    match status {
        LoadStatus::Idle | LoadStatus::Loading => format!("Loading {plural}..."),
        LoadStatus::Error => format!("Could not load {plural}.\nPress 'r' to retry."),
        LoadStatus::Populated => format!("No {plural} found.\n{empty_hint}"),
    }
}

/// Draw `cards` in a grid inside a titled block, scrolled so the selected
/// card is visible
pub fn draw_card_grid(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    cards: &[Card],
    selected: usize,
    empty_message: &str,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if cards.is_empty() {
        let message = Paragraph::new(empty_message.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    let grid = GridLayout::new(area.width);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let (selected_row, _) = grid.index_to_pos(selected);
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (idx, card) in cards.iter().enumerate() {
        let (row, col) = grid.index_to_pos(idx);
        if row < first_row {
            continue;
        }
        let card_area = grid.card_area(inner, row - first_row, col);

        // Skip if card is outside visible area
        if card_area.y + card_area.height > inner.y + inner.height {
            break;
        }

        draw_card(frame, card_area, card, idx == selected);
    }
}

/// Draw a single card
fn draw_card(frame: &mut Frame, area: Rect, card: &Card, is_selected: bool) {
    let border_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let bg_style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(bg_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let max_len = inner.width as usize;
    let title_style = if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut content = vec![Line::from(Span::styled(
        truncate_string(&card.title, max_len),
        title_style,
    ))];
    content.extend(card.lines.iter().map(|line| {
        Line::from(Span::styled(
            truncate_string(line, max_len),
            Style::default().fg(Color::Gray),
        ))
    }));

    frame.render_widget(Paragraph::new(content), inner);
}

fn plural(count: u32, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Card for one project
pub fn project_card(project: &Project) -> Card {
    let mut lines = Vec::new();
    let created = project.created_date();
    if !created.is_empty() {
        lines.push(format!("Created {created}"));
    }
    lines.push(plural(project.forms_count, "form", "forms"));
    Card {
        title: project.name.clone(),
        lines,
    }
}

/// Draw the projects grid
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let projects = &state.projects;
    let cards: Vec<Card> = projects.items.iter().map(project_card).collect();
    let hint = match state.mode {
        Mode::Admin => "Press 'n' to create a project.",
        Mode::User => "Ask an administrator to create one.",
    };
    draw_card_grid(
        frame,
        area,
        "Projects",
        &cards,
        projects.selected,
        &placeholder(projects.status, "projects", hint),
    );
}
