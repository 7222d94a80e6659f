//! Application state definitions

use super::{
    Alerts, DashboardStats, Form, FormFill, FormState, FormSummary, ListState, Project,
    Submission, User,
};
use serde::{Deserialize, Serialize};

/// Which controller the client runs as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Admin,
    #[default]
    User,
}

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Projects,
    /// Forms of the selected project (user mode)
    ProjectForms,
    Users,
    Forms,
    Submissions,
}

impl View {
    /// Views reachable from the sidebar in a mode, in display order
    pub fn sidebar(mode: Mode) -> &'static [View] {
        match mode {
            Mode::Admin => &[View::Projects, View::Users, View::Forms],
            Mode::User => &[View::Projects, View::Submissions],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::ProjectForms => "Forms",
            Self::Users => "Users",
            Self::Forms => "Forms",
            Self::Submissions => "Submissions",
        }
    }

    /// The sidebar entry highlighted while this view is shown
    pub fn sidebar_parent(&self) -> View {
        match self {
            Self::ProjectForms => Self::Projects,
            other => *other,
        }
    }
}

/// Server resources the controllers manage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Project,
    User,
    Form,
    Submission,
}

impl Resource {
    /// Lowercase singular, as used in messages
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::User => "user",
            Self::Form => "form",
            Self::Submission => "submission",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::User => "users",
            Self::Form => "forms",
            Self::Submission => "submissions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::User => "User",
            Self::Form => "Form",
            Self::Submission => "Submission",
        }
    }
}

/// Delete waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteAction {
    pub resource: Resource,
    pub id: String,
    /// Name, email or title shown in the dialog
    pub entity_display: String,
    /// `true` when "Delete" is highlighted; starts on "Cancel"
    pub selected_option: bool,
}

impl PendingDeleteAction {
    pub fn new(resource: Resource, id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            resource,
            id: id.into(),
            entity_display: display.into(),
            selected_option: false,
        }
    }

    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.resource.noun())
    }
}

/// Project whose forms are being browsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

impl From<&Project> for ProjectRef {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
        }
    }
}

/// The form being filled in, with the identity of the form it answers
#[derive(Debug, Clone)]
pub struct FillSession {
    pub form_id: String,
    pub form_name: String,
    pub fill: FormFill,
}

impl FillSession {
    pub fn from_form(form: Form) -> Self {
        Self {
            form_id: form.id,
            form_name: form.name,
            fill: FormFill::new(form.fields),
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub mode: Mode,
    pub current_view: View,
    pub view_history: Vec<View>,

    // Lists
    pub projects: ListState<Project>,
    pub users: ListState<User>,
    pub forms: ListState<FormSummary>,
    pub project_forms: ListState<FormSummary>,
    pub submissions: ListState<Submission>,

    /// Project whose forms `project_forms` holds
    pub browsing_project: Option<ProjectRef>,

    // Overlays
    pub form_state: FormState,
    pub form_fill: Option<FillSession>,
    pub submission_detail: Option<Submission>,
    pub pending_delete: Option<PendingDeleteAction>,

    // UI state
    pub alerts: Alerts,
    pub stats: DashboardStats,
    pub api_connected: Option<bool>,
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Whether a dialog is capturing keys
    pub fn has_overlay(&self) -> bool {
        self.pending_delete.is_some()
            || self.form_state.is_open()
            || self.form_fill.is_some()
            || self.submission_detail.is_some()
    }

    /// Number of entries in the list shown by the current view
    pub fn current_list_len(&self) -> usize {
        match self.current_view {
            View::Projects => self.projects.items.len(),
            View::ProjectForms => self.project_forms.items.len(),
            View::Users => self.users.items.len(),
            View::Forms => self.forms.items.len(),
            View::Submissions => self.submissions.items.len(),
        }
    }

    pub fn select_next(&mut self) {
        match self.current_view {
            View::Projects => self.projects.select_next(),
            View::ProjectForms => self.project_forms.select_next(),
            View::Users => self.users.select_next(),
            View::Forms => self.forms.select_next(),
            View::Submissions => self.submissions.select_next(),
        }
    }

    pub fn select_prev(&mut self) {
        match self.current_view {
            View::Projects => self.projects.select_prev(),
            View::ProjectForms => self.project_forms.select_prev(),
            View::Users => self.users.select_prev(),
            View::Forms => self.forms.select_prev(),
            View::Submissions => self.submissions.select_prev(),
        }
    }

    /// Move the selection in a card grid by `delta` cards
    pub fn select_by(&mut self, delta: isize) {
        match self.current_view {
            View::Projects => self.projects.select_by(delta),
            View::ProjectForms => self.project_forms.select_by(delta),
            View::Forms => self.forms.select_by(delta),
            View::Users | View::Submissions => {}
        }
    }
}
