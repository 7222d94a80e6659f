//! Transient alerts stacked in the top-right corner

use super::components::wrap_text;
use crate::state::{Alert, Alerts, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const ALERT_WIDTH: u16 = 40;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

fn alert_lines(alert: &Alert) -> Vec<Line<'static>> {
    let text_width = (ALERT_WIDTH - 4) as usize;
    wrap_text(&alert.message, text_width)
        .into_iter()
        .map(Line::from)
        .collect()
}

/// Draw visible alerts, oldest at the top
pub fn draw(frame: &mut Frame, alerts: &Alerts) {
    let screen = frame.area();
    let width = ALERT_WIDTH.min(screen.width);
    let x = screen.x + screen.width - width;
    let mut y = screen.y;

    for alert in alerts.iter() {
        let lines = alert_lines(alert);
        let height = lines.len() as u16 + 2;
        if y + height > screen.y + screen.height {
            break;
        }
        let area = Rect {
            x,
            y,
            width,
            height,
        };
        let color = severity_color(alert.severity);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", alert.severity.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(color))
                .block(block),
            area,
        );
        y += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::screen_text;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_alerts_stack_oldest_first() {
        let mut alerts = Alerts::default();
        alerts.success("Project created successfully");
        alerts.danger("Error deleting user");

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &alerts)).unwrap();
        let screen = screen_text(&terminal);

        let first = screen.find("Project created successfully").unwrap();
        let second = screen.find("Error deleting user").unwrap();
        assert!(first < second);
        assert!(screen.contains(" danger "));
    }

    #[test]
    fn test_long_message_wraps() {
        let mut alerts = Alerts::default();
        alerts.warning("Please fill in all required fields before submitting this form");
        let lines = alert_lines(alerts.latest().unwrap());
        assert!(lines.len() > 1);
    }
}
