//! UI module for rendering the TUI

mod alerts;
mod components;
mod forms;
mod forms_list;
pub mod layout;
pub mod projects;
mod submissions;
mod users;
mod widgets;

use crate::api::ApiClientTrait;
use crate::app::App;
use crate::state::{AppState, FormState, View};
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw<C: ApiClientTrait + 'static>(frame: &mut Frame, app: &App<C>) {
    draw_state(frame, &app.state, app.in_flight(), Instant::now());
}

/// Draw the screen for `state` as of `now`
pub fn draw_state(frame: &mut Frame, state: &AppState, in_flight: usize, now: Instant) {
    let areas = layout::create_layout(frame.area(), state.mode);

    layout::draw_sidebar(frame, areas.sidebar, state);
    if let Some(header) = areas.header {
        layout::draw_stats_header(frame, header, state, now);
    }

    match state.current_view {
        View::Projects => projects::draw(frame, areas.main, state),
        View::ProjectForms => forms_list::draw_project_forms(frame, areas.main, state),
        View::Users => users::draw(frame, areas.main, state),
        View::Forms => forms_list::draw_all(frame, areas.main, state),
        View::Submissions => submissions::draw(frame, areas.main, state),
    }

    layout::draw_status_bar(frame, areas.status, state, in_flight);

    // Overlays, topmost last
    match &state.form_state {
        FormState::None => {}
        FormState::ProjectCreate(form) => forms::draw_create_dialog(frame, "New Project", form),
        FormState::UserCreate(form) => forms::draw_create_dialog(frame, "New User", form),
        FormState::FormBuilder(form) => forms::draw_builder(frame, form),
    }
    if let Some(session) = &state.form_fill {
        forms::draw_fill(frame, session);
    }
    if let Some(submission) = &state.submission_detail {
        submissions::draw_detail(frame, submission);
    }
    if let Some(action) = &state.pending_delete {
        components::render_confirm_dialog(frame, action);
    }

    alerts::draw(frame, &state.alerts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mode, PendingDeleteAction, Project, Resource};
    use crate::ui::widgets::screen_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| draw_state(frame, state, 0, Instant::now()))
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_admin_sidebar_and_counters() {
        let state = AppState::new(Mode::Admin);
        let screen = render(&state);
        assert!(screen.contains("1 Projects"));
        assert!(screen.contains("2 Users"));
        assert!(screen.contains("3 Forms"));
        assert!(screen.contains("Projects 0"));
    }

    #[test]
    fn test_user_sidebar_has_submissions() {
        let state = AppState::new(Mode::User);
        let screen = render(&state);
        assert!(screen.contains("2 Submissions"));
        assert!(!screen.contains("Users"));
    }

    #[test]
    fn test_confirm_dialog_drawn_over_view() {
        let mut state = AppState::new(Mode::Admin);
        let token = state.projects.begin_load();
        state.projects.finish::<()>(
            token,
            Ok(vec![Project {
                id: "1".to_string(),
                name: "Trial A".to_string(),
                created_at: None,
                forms_count: 0,
            }]),
        );
        state.pending_delete = Some(PendingDeleteAction::new(Resource::Project, "1", "Trial A"));

        let screen = render(&state);
        assert!(screen.contains("Confirm Delete"));
        assert!(screen.contains("▸ Cancel"));
    }

    #[test]
    fn test_alert_drawn() {
        let mut state = AppState::new(Mode::User);
        state.alerts.danger("Error loading projects");
        assert!(render(&state).contains("Error loading projects"));
    }
}
