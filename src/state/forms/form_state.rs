//! Form state management for the creation dialogs

use super::field::FormField;
use super::schema::{Field, FieldKind, FieldType};
use crate::state::{NewForm, NewProject, NewUser, Project};
use std::collections::HashSet;
use thiserror::Error;

/// Local validation failures of the creation dialogs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please enter a project name")]
    MissingProjectName,
    #[error("Please fill in all fields")]
    MissingUserFields,
    #[error("Please fill in all required fields")]
    MissingFormFields,
    #[error("Field {position} needs a label")]
    EmptyLabel { position: usize },
    #[error("Field \"{label}\" needs at least one option")]
    MissingOptions { label: String },
    #[error("Two fields are labelled \"{label}\"")]
    DuplicateLabel { label: String },
}

/// Field cycling shared by the fixed-layout dialogs
pub trait DialogForm {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Enum representing the open creation dialog, if any
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    ProjectCreate(ProjectCreateForm),
    UserCreate(UserCreateForm),
    FormBuilder(FormBuilderForm),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::None)
    }

    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::ProjectCreate(f) => f.next_field(),
            FormState::UserCreate(f) => f.next_field(),
            FormState::FormBuilder(f) => f.next_slot(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::ProjectCreate(f) => f.prev_field(),
            FormState::UserCreate(f) => f.prev_field(),
            FormState::FormBuilder(f) => f.prev_slot(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self {
            FormState::None => {}
            FormState::ProjectCreate(f) => f.get_active_field_mut().push_char(c),
            FormState::UserCreate(f) => f.get_active_field_mut().push_char(c),
            FormState::FormBuilder(f) => f.push_char(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self {
            FormState::None => {}
            FormState::ProjectCreate(f) => f.get_active_field_mut().pop_char(),
            FormState::UserCreate(f) => f.get_active_field_mut().pop_char(),
            FormState::FormBuilder(f) => f.pop_char(),
        }
    }
}

// Project Create Form
#[derive(Debug, Clone)]
pub struct ProjectCreateForm {
    pub name: FormField,
    pub active_field_index: usize,
}

impl ProjectCreateForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Project Name", false),
            active_field_index: 0,
        }
    }

    pub fn build(&self) -> Result<NewProject, DraftError> {
        if self.name.is_blank() {
            return Err(DraftError::MissingProjectName);
        }
        Ok(NewProject {
            name: self.name.as_text().trim().to_string(),
        })
    }
}

impl Default for ProjectCreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogForm for ProjectCreateForm {
    fn field_count(&self) -> usize {
        1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        &mut self.name
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            _ => None,
        }
    }
}

// User Create Form
#[derive(Debug, Clone)]
pub struct UserCreateForm {
    pub email: FormField,
    pub password: FormField,
    pub is_admin: FormField,
    pub active_field_index: usize,
}

impl UserCreateForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email", false),
            password: FormField::secret("password", "Password"),
            is_admin: FormField::toggle("is_admin", "Administrator (space to toggle)"),
            active_field_index: 0,
        }
    }

    pub fn build(&self) -> Result<NewUser, DraftError> {
        if self.email.is_blank() || self.password.as_text().is_empty() {
            return Err(DraftError::MissingUserFields);
        }
        Ok(NewUser {
            email: self.email.as_text().trim().to_string(),
            password: self.password.as_text().to_string(),
            is_admin: self.is_admin.as_bool(),
        })
    }
}

impl Default for UserCreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogForm for UserCreateForm {
    fn field_count(&self) -> usize {
        3
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.email,
            1 => &mut self.password,
            _ => &mut self.is_admin,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            2 => Some(&self.is_admin),
            _ => None,
        }
    }
}

/// A field definition being edited in the form builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDraft {
    pub label: String,
    pub field_type: FieldType,
    /// One option per line
    pub options_text: String,
}

impl FieldDraft {
    /// Non-blank option lines, trimmed
    pub fn options(&self) -> Vec<String> {
        self.options_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Convert to a schema field. `position` is 1-based, for messages.
    pub fn to_field(&self, position: usize) -> Result<Field, DraftError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(DraftError::EmptyLabel { position });
        }
        let kind = FieldKind::new(self.field_type, self.options()).ok_or_else(|| {
            DraftError::MissingOptions {
                label: label.to_string(),
            }
        })?;
        Ok(Field::new(label, kind))
    }
}

/// Focusable parts of the form builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderSlot {
    Name,
    Project,
    Label(usize),
    Type(usize),
    Options(usize),
}

/// Project choice offered by the builder's project selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectChoice {
    pub id: String,
    pub name: String,
}

// Form Builder
#[derive(Debug, Clone)]
pub struct FormBuilderForm {
    pub name: FormField,
    pub projects: Vec<ProjectChoice>,
    /// Index into `projects`; `None` is "Select a project"
    pub selected_project: Option<usize>,
    pub drafts: Vec<FieldDraft>,
    pub active_slot: usize,
}

impl FormBuilderForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Form Name", false),
            projects: Vec::new(),
            selected_project: None,
            drafts: Vec::new(),
            active_slot: 0,
        }
    }

    /// Replace the project selector's choices, keeping the selection when the
    /// same project is still offered
    pub fn set_projects(&mut self, projects: &[Project]) {
        let previous = self
            .selected_project
            .and_then(|i| self.projects.get(i))
            .map(|p| p.id.clone());
        self.projects = projects
            .iter()
            .map(|p| ProjectChoice {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .collect();
        self.selected_project =
            previous.and_then(|id| self.projects.iter().position(|p| p.id == id));
    }

    pub fn selected_project(&self) -> Option<&ProjectChoice> {
        self.selected_project.and_then(|i| self.projects.get(i))
    }

    /// Focusable slots in display order. Options only appear for choice types.
    pub fn slots(&self) -> Vec<BuilderSlot> {
        let mut slots = vec![BuilderSlot::Name, BuilderSlot::Project];
        for (i, draft) in self.drafts.iter().enumerate() {
            slots.push(BuilderSlot::Label(i));
            slots.push(BuilderSlot::Type(i));
            if draft.field_type.has_options() {
                slots.push(BuilderSlot::Options(i));
            }
        }
        slots
    }

    pub fn active(&self) -> BuilderSlot {
        let slots = self.slots();
        slots[self.active_slot.min(slots.len() - 1)]
    }

    pub fn next_slot(&mut self) {
        self.active_slot = (self.active_slot + 1) % self.slots().len();
    }

    pub fn prev_slot(&mut self) {
        let count = self.slots().len();
        self.active_slot = (self.active_slot + count - 1) % count;
    }

    fn focus(&mut self, slot: BuilderSlot) {
        if let Some(index) = self.slots().iter().position(|s| *s == slot) {
            self.active_slot = index;
        }
    }

    /// Append an empty text field and focus its label
    pub fn add_draft(&mut self) {
        self.drafts.push(FieldDraft::default());
        self.focus(BuilderSlot::Label(self.drafts.len() - 1));
    }

    /// Remove the draft owning the focused slot
    pub fn remove_active_draft(&mut self) {
        let index = match self.active() {
            BuilderSlot::Label(i) | BuilderSlot::Type(i) | BuilderSlot::Options(i) => i,
            _ => return,
        };
        self.drafts.remove(index);
        match index.checked_sub(1) {
            Some(prev) => self.focus(BuilderSlot::Label(prev)),
            None if !self.drafts.is_empty() => self.focus(BuilderSlot::Label(0)),
            None => self.focus(BuilderSlot::Project),
        }
    }

    /// Left/right on the project selector or a type selector
    pub fn cycle(&mut self, forward: bool) {
        match self.active() {
            BuilderSlot::Project => {
                let count = self.projects.len();
                if count == 0 {
                    return;
                }
                // None sits before the first project
                self.selected_project = match (self.selected_project, forward) {
                    (None, true) => Some(0),
                    (None, false) => Some(count - 1),
                    (Some(i), true) if i + 1 < count => Some(i + 1),
                    (Some(0), false) => None,
                    (Some(i), false) => Some(i - 1),
                    (Some(_), true) => None,
                };
            }
            BuilderSlot::Type(i) => {
                let draft = &mut self.drafts[i];
                draft.field_type = if forward {
                    draft.field_type.next()
                } else {
                    draft.field_type.prev()
                };
                self.focus(BuilderSlot::Type(i));
            }
            _ => {}
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.active() {
            BuilderSlot::Name => self.name.push_char(c),
            BuilderSlot::Label(i) => self.drafts[i].label.push(c),
            BuilderSlot::Options(i) => self.drafts[i].options_text.push(c),
            BuilderSlot::Project | BuilderSlot::Type(_) => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.active() {
            BuilderSlot::Name => self.name.pop_char(),
            BuilderSlot::Label(i) => {
                self.drafts[i].label.pop();
            }
            BuilderSlot::Options(i) => {
                self.drafts[i].options_text.pop();
            }
            BuilderSlot::Project | BuilderSlot::Type(_) => {}
        }
    }

    /// Whether Enter should add a line to the focused input
    pub fn is_active_multiline(&self) -> bool {
        matches!(self.active(), BuilderSlot::Options(_))
    }

    pub fn build(&self) -> Result<NewForm, DraftError> {
        let project = match self.selected_project() {
            Some(project) if !self.name.is_blank() => project,
            _ => return Err(DraftError::MissingFormFields),
        };
        let fields = self
            .drafts
            .iter()
            .enumerate()
            .map(|(i, draft)| draft.to_field(i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        // Labels key the answers of a submission
        let mut seen = HashSet::new();
        if let Some(dup) = fields.iter().find(|f| !seen.insert(f.label.as_str())) {
            return Err(DraftError::DuplicateLabel {
                label: dup.label.clone(),
            });
        }
        Ok(NewForm {
            name: self.name.as_text().trim().to_string(),
            project_id: project.id.clone(),
            fields,
        })
    }
}

impl Default for FormBuilderForm {
    fn default() -> Self {
        Self::new()
    }
}
