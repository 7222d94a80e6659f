//! Application state and core logic

use crate::api::{ApiClientTrait, ApiResult};
use crate::platform::is_submit;
use crate::state::{
    assemble_submission, Alerts, AppState, FillSession, Form, FormBuilderForm, FormState,
    FormSummary, HealthStatus, ListState, LoadToken, Mode, PendingDeleteAction, Project,
    ProjectCreateForm, ProjectRef, Resource, Submission, User, UserCreateForm, View,
};
use crate::ui::layout::SIDEBAR_WIDTH;
use crate::ui::projects::{CARD_SPACING_H, MIN_CARD_WIDTH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Result of a background request, sent back to the event loop
#[derive(Debug)]
pub enum Outcome {
    Health(ApiResult<HealthStatus>),
    Projects(LoadToken, ApiResult<Vec<Project>>),
    Users(LoadToken, ApiResult<Vec<User>>),
    Forms(LoadToken, ApiResult<Vec<FormSummary>>),
    ProjectForms(LoadToken, ApiResult<Vec<FormSummary>>),
    Submissions(LoadToken, ApiResult<Vec<Submission>>),
    Created(Resource, ApiResult<()>),
    Deleted(Resource, ApiResult<()>),
    FormOpened(ApiResult<Form>),
    SubmissionOpened(ApiResult<Submission>),
    Submitted(ApiResult<()>),
}

/// Main application struct
pub struct App<C: ApiClientTrait + 'static> {
    /// Current application state
    pub state: AppState,
    /// API client shared with in-flight requests
    api: Arc<C>,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
    /// Requests spawned but not yet applied
    in_flight: usize,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for grid calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl<C: ApiClientTrait + 'static> App<C> {
    /// Create a new App instance
    pub fn new(api: Arc<C>, mode: Mode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(mode),
            api,
            tx,
            rx,
            in_flight: 0,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Number of requests still waiting for a response
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Probe the server and load what the start view shows
    pub fn start(&mut self) {
        self.check_health();
        match self.state.mode {
            Mode::Admin => {
                // All three lists feed the stats header
                self.load_projects();
                self.load_users();
                self.load_forms();
            }
            Mode::User => {
                self.load_projects();
                self.load_submissions();
            }
        }
    }

    /// Housekeeping run once per frame
    pub fn tick(&mut self, now: Instant) {
        self.state.alerts.prune(now);
    }

    /// Apply every outcome that has arrived since the last call
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Run `request` on the runtime and report its outcome to the event loop
    fn spawn<F, Fut>(&mut self, request: F)
    where
        F: FnOnce(Arc<C>) -> Fut,
        Fut: Future<Output = Outcome> + Send + 'static,
    {
        let fut = request(Arc::clone(&self.api));
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            // The receiver only goes away on shutdown
            let _ = tx.send(fut.await);
        });
    }

    // =========================================================================
    // Requests
    // =========================================================================

    pub fn check_health(&mut self) {
        self.spawn(|api| async move { Outcome::Health(api.health().await) });
    }

    pub fn load_projects(&mut self) {
        let token = self.state.projects.begin_load();
        self.spawn(move |api| async move { Outcome::Projects(token, api.list_projects().await) });
    }

    pub fn load_users(&mut self) {
        let token = self.state.users.begin_load();
        self.spawn(move |api| async move { Outcome::Users(token, api.list_users().await) });
    }

    pub fn load_forms(&mut self) {
        let token = self.state.forms.begin_load();
        self.spawn(move |api| async move { Outcome::Forms(token, api.list_forms().await) });
    }

    /// Load the forms of `project_id` into the project forms list
    pub fn load_project_forms(&mut self, project_id: String) {
        let token = self.state.project_forms.begin_load();
        self.spawn(move |api| async move {
            Outcome::ProjectForms(token, api.list_project_forms(&project_id).await)
        });
    }

    pub fn load_submissions(&mut self) {
        let token = self.state.submissions.begin_load();
        self.spawn(move |api| async move {
            Outcome::Submissions(token, api.list_submissions().await)
        });
    }

    /// Reload the list a resource is shown in
    fn reload(&mut self, resource: Resource) {
        match resource {
            Resource::Project => self.load_projects(),
            Resource::User => self.load_users(),
            Resource::Form => self.load_forms(),
            Resource::Submission => self.load_submissions(),
        }
    }

    /// Reload whatever the current view lists
    pub fn reload_current_view(&mut self) {
        match self.state.current_view {
            View::Projects => self.load_projects(),
            View::Users => self.load_users(),
            View::Forms => self.load_forms(),
            View::Submissions => self.load_submissions(),
            View::ProjectForms => {
                if let Some(project) = self.state.browsing_project.clone() {
                    self.load_project_forms(project.id);
                }
            }
        }
    }

    fn delete(&mut self, action: PendingDeleteAction) {
        info!(resource = action.resource.noun(), id = %action.id, "deleting");
        let id = action.id;
        match action.resource {
            Resource::Project => self.spawn(move |api| async move {
                Outcome::Deleted(Resource::Project, api.delete_project(&id).await)
            }),
            Resource::User => self.spawn(move |api| async move {
                Outcome::Deleted(Resource::User, api.delete_user(&id).await)
            }),
            Resource::Form => self.spawn(move |api| async move {
                Outcome::Deleted(Resource::Form, api.delete_form(&id).await)
            }),
            // No view offers deleting a submission
            Resource::Submission => warn!(id = %id, "submissions cannot be deleted"),
        }
    }

    fn open_form(&mut self, form_id: String) {
        self.spawn(move |api| async move { Outcome::FormOpened(api.get_form(&form_id).await) });
    }

    fn open_submission(&mut self, id: String) {
        self.spawn(move |api| async move {
            Outcome::SubmissionOpened(api.get_submission(&id).await)
        });
    }

    // =========================================================================
    // Outcomes
    // =========================================================================

    /// Fold the result of a background request into the state
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let now = Instant::now();
        let state = &mut self.state;

        match outcome {
            Outcome::Health(result) => {
                let healthy = match result {
                    Ok(health) => health.is_healthy(),
                    Err(e) => {
                        warn!(error = %e, "health check failed");
                        false
                    }
                };
                state.api_connected = Some(healthy);
            }
            Outcome::Projects(token, result) => {
                let fresh = finish_load(
                    &mut state.projects,
                    &mut state.alerts,
                    Resource::Project,
                    token,
                    result,
                );
                if fresh {
                    if let FormState::FormBuilder(ref mut builder) = state.form_state {
                        builder.set_projects(&state.projects.items);
                    }
                    if state.mode == Mode::Admin {
                        state.stats.projects.animate_to(state.projects.items.len(), now);
                    }
                }
            }
            Outcome::Users(token, result) => {
                if finish_load(&mut state.users, &mut state.alerts, Resource::User, token, result)
                    && state.mode == Mode::Admin
                {
                    state.stats.users.animate_to(state.users.items.len(), now);
                }
            }
            Outcome::Forms(token, result) => {
                if finish_load(&mut state.forms, &mut state.alerts, Resource::Form, token, result)
                    && state.mode == Mode::Admin
                {
                    state.stats.forms.animate_to(state.forms.items.len(), now);
                }
            }
            Outcome::ProjectForms(token, result) => {
                finish_load(
                    &mut state.project_forms,
                    &mut state.alerts,
                    Resource::Form,
                    token,
                    result,
                );
            }
            Outcome::Submissions(token, result) => {
                finish_load(
                    &mut state.submissions,
                    &mut state.alerts,
                    Resource::Submission,
                    token,
                    result,
                );
            }
            Outcome::Created(resource, result) => match result {
                Ok(()) => {
                    info!(resource = resource.noun(), "created");
                    state.form_state = FormState::None;
                    state.alerts.success(format!("{} created successfully", resource.title()));
                    self.reload(resource);
                }
                Err(e) => {
                    warn!(resource = resource.noun(), error = %e, "create failed");
                    let fallback = format!("Error creating {}", resource.noun());
                    state.alerts.danger(e.alert_text(&fallback));
                }
            },
            Outcome::Deleted(resource, result) => match result {
                Ok(()) => {
                    info!(resource = resource.noun(), "deleted");
                    state.alerts.success(format!("{} deleted successfully", resource.title()));
                    self.reload(resource);
                }
                Err(e) => {
                    warn!(resource = resource.noun(), error = %e, "delete failed");
                    let fallback = format!("Error deleting {}", resource.noun());
                    state.alerts.danger(e.alert_text(&fallback));
                }
            },
            Outcome::FormOpened(result) => match result {
                Ok(form) => {
                    debug!(form = %form.id, fields = form.fields.len(), "form opened");
                    state.form_fill = Some(FillSession::from_form(form));
                }
                Err(e) => {
                    warn!(error = %e, "could not load form");
                    state.alerts.danger(e.alert_text("Error loading form"));
                }
            },
            Outcome::SubmissionOpened(result) => match result {
                Ok(submission) => state.submission_detail = Some(submission),
                Err(e) => {
                    warn!(error = %e, "could not load submission");
                    state.alerts.danger(e.alert_text("Error loading submission"));
                }
            },
            Outcome::Submitted(result) => match result {
                Ok(()) => {
                    info!("form submitted");
                    state.form_fill = None;
                    state.alerts.success("Form submitted successfully");
                    self.load_submissions();
                }
                Err(e) => {
                    // Dialog and answers stay so the user can try again
                    warn!(error = %e, "submission failed");
                    state.alerts.danger(e.alert_text("Error submitting form"));
                }
            },
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        if let Some(view) = self.state.view_history.pop() {
            if view == View::Projects {
                self.state.browsing_project = None;
            }
            self.state.current_view = view;
        }
    }

    /// Jump to a sidebar entry, dropping the navigation history
    pub fn switch_view(&mut self, view: View) {
        if view == self.state.current_view {
            return;
        }
        self.state.view_history.clear();
        self.state.browsing_project = None;
        self.state.current_view = view;
        self.reload_current_view();
    }

    /// Calculate number of columns for card grids based on terminal width
    pub fn grid_columns(&self) -> usize {
        // terminal_size is (height, width)
        let width = self.terminal_size.map(|(_, w)| w).unwrap_or(80);
        // Subtract sidebar and outer borders (2)
        let usable_width = width.saturating_sub(SIDEBAR_WIDTH + 2);
        let columns = if usable_width >= MIN_CARD_WIDTH {
            ((usable_width + CARD_SPACING_H) / (MIN_CARD_WIDTH + CARD_SPACING_H)) as usize
        } else {
            1
        };
        columns.max(1)
    }

    // =========================================================================
    // Keys
    // =========================================================================

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Ok(());
        }

        // Overlays are modal
        if self.state.pending_delete.is_some() {
            return self.handle_confirm_dialog_key(key);
        }
        if self.state.form_state.is_open() {
            return self.handle_create_dialog_key(key);
        }
        if self.state.form_fill.is_some() {
            return self.handle_fill_key(key);
        }
        if self.state.submission_detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.state.submission_detail = None;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('x') => {
                self.state.alerts.dismiss_latest();
                return Ok(());
            }
            KeyCode::Char('r') => {
                self.reload_current_view();
                return Ok(());
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(&view) = View::sidebar(self.state.mode).get(index) {
                    self.switch_view(view);
                }
                return Ok(());
            }
            _ => {}
        }

        match self.state.current_view {
            View::Projects => self.handle_projects_key(key),
            View::ProjectForms => self.handle_project_forms_key(key),
            View::Users => self.handle_users_key(key),
            View::Forms => self.handle_forms_key(key),
            View::Submissions => self.handle_submissions_key(key),
        }
        Ok(())
    }

    /// Arrow handling shared by the card grids
    fn handle_grid_movement(&mut self, key: KeyEvent) -> bool {
        let columns = self.grid_columns() as isize;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_by(columns),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_by(-columns),
            KeyCode::Char('h') | KeyCode::Left => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.select_next(),
            _ => return false,
        }
        true
    }

    /// Arrow handling shared by the tables
    fn handle_list_movement(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => return false,
        }
        true
    }

    fn handle_projects_key(&mut self, key: KeyEvent) {
        if self.handle_grid_movement(key) {
            return;
        }
        match (self.state.mode, key.code) {
            (Mode::Admin, KeyCode::Char('n')) => {
                self.state.form_state = FormState::ProjectCreate(ProjectCreateForm::new());
            }
            (Mode::Admin, KeyCode::Char('d')) => {
                if let Some(project) = self.state.projects.selected_item() {
                    self.state.pending_delete = Some(PendingDeleteAction::new(
                        Resource::Project,
                        &project.id,
                        &project.name,
                    ));
                }
            }
            (Mode::User, KeyCode::Enter) => {
                if let Some(project) = self.state.projects.selected_item() {
                    let project = ProjectRef::from(project);
                    let id = project.id.clone();
                    self.state.browsing_project = Some(project);
                    self.state.project_forms.reset();
                    self.navigate(View::ProjectForms);
                    self.load_project_forms(id);
                }
            }
            _ => {}
        }
    }

    fn handle_project_forms_key(&mut self, key: KeyEvent) {
        if self.handle_grid_movement(key) {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            KeyCode::Enter => {
                if let Some(form) = self.state.project_forms.selected_item() {
                    let id = form.id.clone();
                    self.open_form(id);
                }
            }
            _ => {}
        }
    }

    fn handle_users_key(&mut self, key: KeyEvent) {
        if self.handle_list_movement(key) {
            return;
        }
        match key.code {
            KeyCode::Char('n') => {
                self.state.form_state = FormState::UserCreate(UserCreateForm::new());
            }
            KeyCode::Char('d') => {
                if let Some(user) = self.state.users.selected_item() {
                    self.state.pending_delete =
                        Some(PendingDeleteAction::new(Resource::User, &user.id, &user.email));
                }
            }
            _ => {}
        }
    }

    fn handle_forms_key(&mut self, key: KeyEvent) {
        if self.handle_grid_movement(key) {
            return;
        }
        match key.code {
            KeyCode::Char('n') => {
                let mut builder = FormBuilderForm::new();
                builder.set_projects(&self.state.projects.items);
                self.state.form_state = FormState::FormBuilder(builder);
                // Refresh the project selector
                self.load_projects();
            }
            KeyCode::Char('d') => {
                if let Some(form) = self.state.forms.selected_item() {
                    self.state.pending_delete =
                        Some(PendingDeleteAction::new(Resource::Form, &form.id, &form.name));
                }
            }
            _ => {}
        }
    }

    fn handle_submissions_key(&mut self, key: KeyEvent) {
        if self.handle_list_movement(key) {
            return;
        }
        if key.code == KeyCode::Enter {
            if let Some(submission) = self.state.submissions.selected_item() {
                let id = submission.id.clone();
                self.open_submission(id);
            }
        }
    }

    /// Handle keys for the delete confirmation dialog
    fn handle_confirm_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Cancel - dismiss dialog
            KeyCode::Esc | KeyCode::Char('n') => {
                self.state.pending_delete = None;
            }
            // Toggle between Cancel and Delete
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Char('l') => {
                if let Some(ref mut action) = self.state.pending_delete {
                    action.selected_option = !action.selected_option;
                }
            }
            KeyCode::Char('y') => {
                if let Some(action) = self.state.pending_delete.take() {
                    self.delete(action);
                }
            }
            // Confirm selection
            KeyCode::Enter => {
                if let Some(action) = self.state.pending_delete.take() {
                    if action.selected_option {
                        self.delete(action);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys for the project, user and form creation dialogs
    fn handle_create_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_submit(&key) {
            self.submit_create_dialog();
            return Ok(());
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if let FormState::FormBuilder(ref mut builder) = self.state.form_state {
            match key.code {
                KeyCode::Char('n') if ctrl => {
                    builder.add_draft();
                    return Ok(());
                }
                KeyCode::Char('d') if ctrl => {
                    builder.remove_active_draft();
                    return Ok(());
                }
                KeyCode::Left => {
                    builder.cycle(false);
                    return Ok(());
                }
                KeyCode::Right => {
                    builder.cycle(true);
                    return Ok(());
                }
                KeyCode::Enter if builder.is_active_multiline() => {
                    builder.push_char('\n');
                    return Ok(());
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => self.state.form_state = FormState::None,
            KeyCode::Tab | KeyCode::Down => self.state.form_state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form_state.prev_field(),
            KeyCode::Enter => match self.state.form_state {
                FormState::FormBuilder(_) => self.state.form_state.next_field(),
                _ => self.submit_create_dialog(),
            },
            KeyCode::Backspace => self.state.form_state.pop_char(),
            KeyCode::Char(c) if !ctrl => self.state.form_state.push_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Validate the open creation dialog and send it
    fn submit_create_dialog(&mut self) {
        match &self.state.form_state {
            FormState::None => {}
            FormState::ProjectCreate(form) => match form.build() {
                Ok(body) => self.spawn(move |api| async move {
                    Outcome::Created(Resource::Project, api.create_project(&body).await)
                }),
                Err(e) => {
                    self.state.alerts.warning(e.to_string());
                }
            },
            FormState::UserCreate(form) => match form.build() {
                Ok(body) => self.spawn(move |api| async move {
                    Outcome::Created(Resource::User, api.create_user(&body).await)
                }),
                Err(e) => {
                    self.state.alerts.warning(e.to_string());
                }
            },
            FormState::FormBuilder(form) => match form.build() {
                Ok(body) => self.spawn(move |api| async move {
                    Outcome::Created(Resource::Form, api.create_form(&body).await)
                }),
                Err(e) => {
                    self.state.alerts.warning(e.to_string());
                }
            },
        }
    }

    /// Handle keys in the form fill dialog
    fn handle_fill_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_submit(&key) || key.code == KeyCode::Enter {
            self.submit_fill();
            return Ok(());
        }
        let Some(session) = self.state.form_fill.as_mut() else {
            return Ok(());
        };
        let fill = &mut session.fill;
        match key.code {
            KeyCode::Esc => self.state.form_fill = None,
            KeyCode::Tab | KeyCode::Down => fill.next_focus(),
            KeyCode::BackTab | KeyCode::Up => fill.prev_focus(),
            KeyCode::Left => fill.move_option(false),
            KeyCode::Right => fill.move_option(true),
            KeyCode::Backspace => fill.pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => fill.push_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Assemble the open form's answers and send them
    fn submit_fill(&mut self) {
        let Some(session) = &self.state.form_fill else {
            return;
        };
        match assemble_submission(
            &session.fill.patient_number,
            Some(&session.form_id),
            &session.fill,
        ) {
            Ok(body) => {
                info!(form = %body.form_id, "submitting form");
                self.spawn(move |api| async move {
                    Outcome::Submitted(api.create_submission(&body).await)
                });
            }
            Err(e) => {
                self.state.alerts.warning(e.to_string());
            }
        }
    }
}

/// Apply a list load, raising an alert when a current load failed. Returns
/// whether fresh items were stored.
fn finish_load<T>(
    list: &mut ListState<T>,
    alerts: &mut Alerts,
    resource: Resource,
    token: LoadToken,
    result: ApiResult<Vec<T>>,
) -> bool {
    if !list.is_current(token) {
        debug!(resource = resource.plural(), "dropping superseded response");
        return false;
    }
    let ok = result.is_ok();
    if let Err(ref e) = result {
        warn!(resource = resource.plural(), error = %e, "load failed");
        alerts.danger(e.alert_text(&format!("Error loading {}", resource.plural())));
    }
    list.finish(token, result) && ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockApiClientTrait};
    use crate::state::{Field, FieldValue, LoadStatus, Severity};
    use reqwest::StatusCode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App<MockApiClientTrait>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            created_at: None,
            forms_count: 0,
        }
    }

    fn listed_form(id: &str, name: &str) -> FormSummary {
        FormSummary {
            id: id.to_string(),
            name: name.to_string(),
            project_id: None,
            project_name: None,
            listed_fields: 0,
            fields_count: None,
        }
    }

    fn app(mock: MockApiClientTrait, mode: Mode) -> App<MockApiClientTrait> {
        App::new(Arc::new(mock), mode)
    }

    /// Wait for the next background request to finish and apply it
    async fn settle(app: &mut App<MockApiClientTrait>) {
        let outcome = app.rx.recv().await.unwrap();
        app.apply_outcome(outcome);
    }

    fn with_projects(app: &mut App<MockApiClientTrait>, projects: Vec<Project>) {
        let token = app.state.projects.begin_load();
        app.state.projects.finish::<()>(token, Ok(projects));
    }

    fn latest_alert(app: &App<MockApiClientTrait>) -> (String, Severity) {
        let alert = app.state.alerts.latest().unwrap();
        (alert.message.clone(), alert.severity)
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_sidebar_number_switches_view() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_list_users().returning(|| Ok(vec![]));
            let mut app = app(mock, Mode::Admin);

            app.handle_key(key(KeyCode::Char('2'))).unwrap();
            assert_eq!(app.state.current_view, View::Users);
            assert!(app.state.users.is_loading());
        }

        #[test]
        fn test_go_back_clears_browsing_project() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            app.state.browsing_project = Some(ProjectRef {
                id: "1".into(),
                name: "Trial A".into(),
            });
            app.navigate(View::ProjectForms);
            app.go_back();
            assert_eq!(app.state.current_view, View::Projects);
            assert!(app.state.browsing_project.is_none());
        }

        #[test]
        fn test_grid_columns() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            app.terminal_size = Some((24, 20));
            assert_eq!(app.grid_columns(), 1);
            app.terminal_size = Some((24, 200));
            assert!(app.grid_columns() > 1);
        }

        #[test]
        fn test_quit_keys() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_superseded_load_is_discarded() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            let first = app.state.projects.begin_load();
            let second = app.state.projects.begin_load();

            app.apply_outcome(Outcome::Projects(second, Ok(vec![project("2", "Fresh")])));
            app.apply_outcome(Outcome::Projects(
                first,
                Err(ApiError::Decode("late".to_string())),
            ));

            assert_eq!(app.state.projects.items, vec![project("2", "Fresh")]);
            assert_eq!(app.state.projects.status, LoadStatus::Populated);
            assert!(app.state.alerts.is_empty());
        }

        #[tokio::test]
        async fn test_forms_of_previous_project_are_dropped() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_list_project_forms().returning(|id| {
                let name = if id == "1" { "Alpha intake" } else { "Beta intake" };
                Ok(vec![listed_form(id, name)])
            });
            let mut app = app(mock, Mode::User);
            with_projects(&mut app, vec![project("1", "Alpha"), project("2", "Beta")]);

            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(
                app.state.browsing_project.as_ref().map(|p| p.name.as_str()),
                Some("Beta")
            );

            // Beta answers first, Alpha's response straggles in afterwards
            let mut outcomes = vec![app.rx.recv().await.unwrap(), app.rx.recv().await.unwrap()];
            outcomes.sort_by_key(|outcome| match outcome {
                Outcome::ProjectForms(_, Ok(forms)) => forms[0].name == "Alpha intake",
                _ => false,
            });
            for outcome in outcomes {
                app.apply_outcome(outcome);
            }

            let names: Vec<&str> = app
                .state
                .project_forms
                .items
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            assert_eq!(names, vec!["Beta intake"]);
        }

        #[tokio::test]
        async fn test_load_error_keeps_items_and_alerts() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            with_projects(&mut app, vec![project("1", "Old")]);

            let token = app.state.projects.begin_load();
            app.apply_outcome(Outcome::Projects(
                token,
                Err(ApiError::Decode("bad".to_string())),
            ));

            assert_eq!(app.state.projects.items, vec![project("1", "Old")]);
            assert_eq!(
                latest_alert(&app),
                ("Error loading projects".to_string(), Severity::Danger)
            );
        }

        #[tokio::test]
        async fn test_start_loads_admin_lists() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_health().returning(|| {
                Ok(HealthStatus {
                    status: "healthy".into(),
                    timestamp: None,
                })
            });
            mock.expect_list_projects()
                .returning(|| Ok(vec![project("1", "A"), project("2", "B")]));
            mock.expect_list_users().returning(|| Ok(vec![]));
            mock.expect_list_forms().returning(|| Ok(vec![]));
            let mut app = app(mock, Mode::Admin);

            app.start();
            assert_eq!(app.in_flight(), 4);
            for _ in 0..4 {
                settle(&mut app).await;
            }

            assert_eq!(app.state.api_connected, Some(true));
            assert_eq!(app.state.projects.items.len(), 2);
            assert_eq!(app.state.stats.projects.to, 2);
            assert_eq!(app.in_flight(), 0);
        }

        #[tokio::test]
        async fn test_form_with_bad_schema_fails_to_open() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            app.apply_outcome(Outcome::FormOpened(Err(ApiError::Decode(
                "unknown field type \"date\"".to_string(),
            ))));
            assert!(app.state.form_fill.is_none());
            assert_eq!(
                latest_alert(&app),
                ("Error loading form".to_string(), Severity::Danger)
            );
        }
    }

    mod create {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_empty_project_name_issues_no_request() {
            let mut app = app(MockApiClientTrait::new(), Mode::Admin);

            app.handle_key(key(KeyCode::Char('n'))).unwrap();
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.in_flight(), 0);
            assert!(app.state.form_state.is_open());
            assert_eq!(
                latest_alert(&app),
                ("Please enter a project name".to_string(), Severity::Warning)
            );
        }

        #[tokio::test]
        async fn test_empty_user_fields_issue_no_request() {
            let mut app = app(MockApiClientTrait::new(), Mode::Admin);
            app.state.current_view = View::Users;

            app.handle_key(key(KeyCode::Char('n'))).unwrap();
            type_text(&mut app, "a@b.co");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.in_flight(), 0);
            assert_eq!(latest_alert(&app).0, "Please fill in all fields");
        }

        #[tokio::test]
        async fn test_form_without_project_issues_no_request() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_list_projects().returning(|| Ok(vec![]));
            let mut app = app(mock, Mode::Admin);
            app.state.current_view = View::Forms;

            app.handle_key(key(KeyCode::Char('n'))).unwrap();
            settle(&mut app).await;
            type_text(&mut app, "Intake");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.in_flight(), 0);
            assert_eq!(latest_alert(&app).0, "Please fill in all required fields");
        }

        #[tokio::test]
        async fn test_created_project_appears_after_reload() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_create_project()
                .withf(|p| p.name == "Trial A")
                .times(1)
                .returning(|_| Ok(()));
            mock.expect_list_projects()
                .times(1)
                .returning(|| Ok(vec![project("7", "Trial A")]));
            let mut app = app(mock, Mode::Admin);

            app.handle_key(key(KeyCode::Char('n'))).unwrap();
            type_text(&mut app, "Trial A");
            app.handle_key(key(KeyCode::Enter)).unwrap();

            settle(&mut app).await;
            assert!(!app.state.form_state.is_open());
            assert_eq!(
                latest_alert(&app),
                ("Project created successfully".to_string(), Severity::Success)
            );

            settle(&mut app).await;
            let names: Vec<_> = app.state.projects.items.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["Trial A"]);
        }

        #[tokio::test]
        async fn test_server_error_message_is_shown_and_dialog_kept() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_create_user().returning(|_| {
                Err(ApiError::Server {
                    status: StatusCode::BAD_REQUEST,
                    message: Some("Invalid email format".to_string()),
                })
            });
            let mut app = app(mock, Mode::Admin);
            app.state.current_view = View::Users;

            app.handle_key(key(KeyCode::Char('n'))).unwrap();
            type_text(&mut app, "nope");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "password1");
            app.handle_key(ctrl('s')).unwrap();
            settle(&mut app).await;

            assert!(app.state.form_state.is_open());
            assert_eq!(
                latest_alert(&app),
                ("Invalid email format".to_string(), Severity::Danger)
            );
        }
    }

    mod delete {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_declined_delete_issues_no_request() {
            let mut app = app(MockApiClientTrait::new(), Mode::Admin);
            with_projects(&mut app, vec![project("1", "Trial A")]);

            app.handle_key(key(KeyCode::Char('d'))).unwrap();
            let pending = app.state.pending_delete.clone().unwrap();
            assert_eq!(pending.prompt(), "Are you sure you want to delete this project?");

            // Enter on the default option cancels
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.pending_delete.is_none());

            app.handle_key(key(KeyCode::Char('d'))).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();

            assert_eq!(app.in_flight(), 0);
            assert_eq!(app.state.projects.items, vec![project("1", "Trial A")]);
        }

        #[tokio::test]
        async fn test_confirmed_delete_reloads() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_delete_form()
                .withf(|id| id == "9")
                .times(1)
                .returning(|_| Ok(()));
            mock.expect_list_forms().returning(|| Ok(vec![]));
            let mut app = app(mock, Mode::Admin);
            app.state.current_view = View::Forms;
            let token = app.state.forms.begin_load();
            app.state.forms.finish::<()>(
                token,
                Ok(vec![listed_form("9", "Intake")]),
            );

            app.handle_key(key(KeyCode::Char('d'))).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            settle(&mut app).await;
            assert_eq!(latest_alert(&app).0, "Form deleted successfully");
            settle(&mut app).await;
            assert!(app.state.forms.items.is_empty());
        }

        #[tokio::test]
        async fn test_failed_delete_uses_fallback() {
            let mut app = app(MockApiClientTrait::new(), Mode::Admin);
            app.apply_outcome(Outcome::Deleted(
                Resource::User,
                Err(ApiError::Server {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: None,
                }),
            ));
            assert_eq!(
                latest_alert(&app),
                ("Error deleting user".to_string(), Severity::Danger)
            );
        }
    }

    mod fill {
        use super::*;
        use pretty_assertions::assert_eq;

        fn open_age_form(app: &mut App<MockApiClientTrait>) {
            app.apply_outcome(Outcome::FormOpened(Ok(Form {
                id: "3".into(),
                name: "Intake".into(),
                project_id: Some("1".into()),
                project_name: None,
                fields: vec![Field::text("Age")],
            })));
        }

        #[tokio::test]
        async fn test_missing_patient_number_issues_no_request() {
            let mut app = app(MockApiClientTrait::new(), Mode::User);
            open_age_form(&mut app);

            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.in_flight(), 0);
            assert_eq!(
                latest_alert(&app),
                ("Please enter a patient number".to_string(), Severity::Warning)
            );
        }

        #[tokio::test]
        async fn test_successful_submit_closes_and_reloads() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_create_submission()
                .withf(|s| {
                    s.patient_number == "17"
                        && s.form_id == "3"
                        && s.fields.get("Age") == Some(&FieldValue::Single("30".into()))
                })
                .times(1)
                .returning(|_| Ok(()));
            mock.expect_list_submissions().returning(|| Ok(vec![]));
            let mut app = app(mock, Mode::User);
            open_age_form(&mut app);

            type_text(&mut app, "17");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "30");
            app.handle_key(key(KeyCode::Enter)).unwrap();

            settle(&mut app).await;
            assert!(app.state.form_fill.is_none());
            assert_eq!(latest_alert(&app).0, "Form submitted successfully");
            settle(&mut app).await;
            assert_eq!(app.state.submissions.status, LoadStatus::Populated);
        }

        #[tokio::test]
        async fn test_failed_submit_keeps_answers() {
            let mut mock = MockApiClientTrait::new();
            mock.expect_create_submission().times(1).returning(|_| {
                Err(ApiError::Server {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: Some("database unavailable".to_string()),
                })
            });
            let mut app = app(mock, Mode::User);
            open_age_form(&mut app);

            type_text(&mut app, "17");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "30");
            app.handle_key(ctrl('s')).unwrap();
            settle(&mut app).await;

            let session = app.state.form_fill.as_ref().unwrap();
            assert_eq!(session.fill.patient_number, "17");
            assert_eq!(
                latest_alert(&app),
                ("database unavailable".to_string(), Severity::Danger)
            );
            assert_eq!(app.in_flight(), 0);
        }
    }
}
