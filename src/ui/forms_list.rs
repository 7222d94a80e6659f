//! Forms grid views: every form (admin) and one project's forms (user)

use super::projects::{draw_card_grid, placeholder, Card};
use crate::state::{AppState, FormSummary};
use ratatui::{layout::Rect, Frame};

/// Card for one form. The project line is left out when the grid is
/// already scoped to a project.
pub fn form_card(form: &FormSummary, show_project: bool) -> Card {
    let mut lines = Vec::new();
    if show_project {
        if let Some(project) = form.project_name.as_deref().filter(|p| !p.is_empty()) {
            lines.push(project.to_string());
        }
    }
    lines.push(match form.field_count() {
        1 => "1 field".to_string(),
        n => format!("{n} fields"),
    });
    Card {
        title: form.name.clone(),
        lines,
    }
}

/// Draw every form (admin)
pub fn draw_all(frame: &mut Frame, area: Rect, state: &AppState) {
    let forms = &state.forms;
    let cards: Vec<Card> = forms.items.iter().map(|f| form_card(f, true)).collect();
    draw_card_grid(
        frame,
        area,
        "Forms",
        &cards,
        forms.selected,
        &placeholder(forms.status, "forms", "Press 'n' to build a form."),
    );
}

/// Draw the forms of the project being browsed (user)
pub fn draw_project_forms(frame: &mut Frame, area: Rect, state: &AppState) {
    let forms = &state.project_forms;
    let title = match &state.browsing_project {
        Some(project) => format!("Forms - {}", project.name),
        None => "Forms".to_string(),
    };
    let cards: Vec<Card> = forms.items.iter().map(|f| form_card(f, false)).collect();
    draw_card_grid(
        frame,
        area,
        &title,
        &cards,
        forms.selected,
        &placeholder(forms.status, "forms", "Press Esc to go back."),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mode, ProjectRef};
    use crate::ui::widgets::screen_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn form(name: &str, project: Option<&str>, fields: usize) -> FormSummary {
        FormSummary {
            id: name.to_string(),
            name: name.to_string(),
            project_id: Some("1".to_string()),
            project_name: project.map(str::to_string),
            listed_fields: fields,
            fields_count: None,
        }
    }

    #[test]
    fn test_card_lists_project_and_field_count() {
        let card = form_card(&form("Intake", Some("Trial A"), 1), true);
        assert_eq!(card.title, "Intake");
        assert_eq!(card.lines, vec!["Trial A", "1 field"]);
    }

    #[test]
    fn test_project_scoped_card_skips_project() {
        let card = form_card(&form("Exit", Some("Trial A"), 2), false);
        assert_eq!(card.lines, vec!["2 fields"]);
    }

    #[test]
    fn test_project_forms_title_names_project() {
        let mut state = AppState::new(Mode::User);
        state.browsing_project = Some(ProjectRef {
            id: "1".to_string(),
            name: "Trial A".to_string(),
        });
        let token = state.project_forms.begin_load();
        state
            .project_forms
            .finish::<()>(token, Ok(vec![form("Intake", None, 0)]));

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_project_forms(frame, area, &state)
            })
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("Forms - Trial A"));
        assert!(screen.contains("Intake"));
        assert!(screen.contains("0 fields"));
    }
}
