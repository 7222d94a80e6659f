//! Fill-in state for answering a form, and assembly of the submission body

use super::schema::{Field, FieldKind};
use crate::state::{FieldValue, NewSubmission, SubmissionFields};
use thiserror::Error;

/// Why the answers cannot be collected yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("Please answer \"{label}\"")]
    MissingAnswer { label: String },
    #[error("\"{label}\" must be a number")]
    InvalidNumber { label: String },
}

/// Why a submission was rejected before sending
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please enter a patient number")]
    MissingPatientNumber,
    #[error("No form selected")]
    NoFormSelected,
    #[error(transparent)]
    Answers(#[from] FillError),
}

/// Current answer for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Number(String),
    /// A select always holds a value; the first option is preselected
    Dropdown { selected: usize },
    Radio { selected: Option<usize> },
    Checkbox { checked: Vec<bool> },
}

impl FieldInput {
    /// Empty input matching a field's kind
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldInput::Text(String::new()),
            FieldKind::Number => FieldInput::Number(String::new()),
            FieldKind::Dropdown { .. } => FieldInput::Dropdown { selected: 0 },
            FieldKind::Radio { .. } => FieldInput::Radio { selected: None },
            FieldKind::Checkbox { options } => FieldInput::Checkbox {
                checked: vec![false; options.len()],
            },
        }
    }
}

/// Which part of the fill dialog has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillFocus {
    #[default]
    PatientNumber,
    Field(usize),
}

/// Answers being entered for one form
#[derive(Debug, Clone)]
pub struct FormFill {
    pub patient_number: String,
    fields: Vec<Field>,
    inputs: Vec<FieldInput>,
    pub focus: FillFocus,
    /// Highlighted option inside the focused radio or checkbox group
    pub option_cursor: usize,
}

impl FormFill {
    pub fn new(fields: Vec<Field>) -> Self {
        let inputs = fields.iter().map(|f| FieldInput::for_kind(&f.kind)).collect();
        Self {
            patient_number: String::new(),
            fields,
            inputs,
            focus: FillFocus::PatientNumber,
            option_cursor: 0,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn inputs(&self) -> &[FieldInput] {
        &self.inputs
    }

    /// Field and input pairs in schema order
    pub fn entries(&self) -> impl Iterator<Item = (&Field, &FieldInput)> {
        self.fields.iter().zip(self.inputs.iter())
    }

    fn focus_count(&self) -> usize {
        self.fields.len() + 1
    }

    fn focus_index(&self) -> usize {
        match self.focus {
            FillFocus::PatientNumber => 0,
            FillFocus::Field(i) => i + 1,
        }
    }

    fn set_focus_index(&mut self, index: usize) {
        self.focus = match index {
            0 => FillFocus::PatientNumber,
            i => FillFocus::Field(i - 1),
        };
        self.option_cursor = 0;
    }

    pub fn next_focus(&mut self) {
        let next = (self.focus_index() + 1) % self.focus_count();
        self.set_focus_index(next);
    }

    pub fn prev_focus(&mut self) {
        let current = self.focus_index();
        let prev = if current == 0 {
            self.focus_count() - 1
        } else {
            current - 1
        };
        self.set_focus_index(prev);
    }

    fn focused_field(&self) -> Option<usize> {
        match self.focus {
            FillFocus::PatientNumber => None,
            FillFocus::Field(i) => Some(i),
        }
    }

    /// Type a character into the focused text, number or patient input
    pub fn push_char(&mut self, c: char) {
        let Some(index) = self.focused_field() else {
            self.patient_number.push(c);
            return;
        };
        match &mut self.inputs[index] {
            FieldInput::Text(s) => s.push(c),
            FieldInput::Number(s) => {
                if c.is_ascii_digit() || matches!(c, '.' | '-') {
                    s.push(c);
                }
            }
            _ => {
                // Space toggles choices
                if c == ' ' {
                    self.toggle();
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        let Some(index) = self.focused_field() else {
            self.patient_number.pop();
            return;
        };
        if let FieldInput::Text(s) | FieldInput::Number(s) = &mut self.inputs[index] {
            s.pop();
        }
    }

    /// Move within the focused choice group. Dropdowns change their value
    /// directly; radio and checkbox groups move the highlight.
    pub fn move_option(&mut self, forward: bool) {
        let Some(index) = self.focused_field() else {
            return;
        };
        let len = self.fields[index].kind.options().len();
        if len == 0 {
            return;
        }
        let step = |i: usize| {
            if forward {
                (i + 1) % len
            } else {
                (i + len - 1) % len
            }
        };
        match &mut self.inputs[index] {
            FieldInput::Dropdown { selected } => *selected = step(*selected),
            FieldInput::Radio { .. } | FieldInput::Checkbox { .. } => {
                self.option_cursor = step(self.option_cursor)
            }
            _ => {}
        }
    }

    /// Select the highlighted radio option or flip the highlighted checkbox
    pub fn toggle(&mut self) {
        let Some(index) = self.focused_field() else {
            return;
        };
        let cursor = self.option_cursor;
        match &mut self.inputs[index] {
            FieldInput::Radio { selected } => *selected = Some(cursor),
            FieldInput::Checkbox { checked } => {
                if let Some(c) = checked.get_mut(cursor) {
                    *c = !*c;
                }
            }
            _ => {}
        }
    }

    /// Reset all answers and the patient number
    pub fn clear(&mut self) {
        self.patient_number.clear();
        self.inputs = self
            .fields
            .iter()
            .map(|f| FieldInput::for_kind(&f.kind))
            .collect();
        self.focus = FillFocus::PatientNumber;
        self.option_cursor = 0;
    }

    /// Answers keyed by label. Every label of the schema is present; checkbox
    /// groups yield the checked options in option order.
    pub fn collect(&self) -> Result<SubmissionFields, FillError> {
        let mut answers = SubmissionFields::new();
        for (field, input) in self.entries() {
            let missing = || FillError::MissingAnswer {
                label: field.label.clone(),
            };
            let options = field.kind.options();
            let value = match input {
                FieldInput::Text(s) => {
                    if s.trim().is_empty() {
                        return Err(missing());
                    }
                    FieldValue::Single(s.clone())
                }
                FieldInput::Number(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        return Err(missing());
                    }
                    if !trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
                        return Err(FillError::InvalidNumber {
                            label: field.label.clone(),
                        });
                    }
                    FieldValue::Single(trimmed.to_string())
                }
                FieldInput::Dropdown { selected }
                | FieldInput::Radio {
                    selected: Some(selected),
                } => {
                    let option = options.get(*selected).ok_or_else(missing)?;
                    FieldValue::Single(option.clone())
                }
                FieldInput::Radio { selected: None } => return Err(missing()),
                FieldInput::Checkbox { checked } => FieldValue::Multi(
                    options
                        .iter()
                        .zip(checked)
                        .filter(|(_, on)| **on)
                        .map(|(o, _)| o.clone())
                        .collect(),
                ),
            };
            answers.insert(field.label.clone(), value);
        }
        Ok(answers)
    }
}

/// Combine the patient number, the selected form and the answers into the
/// body of `POST /api/submissions`.
pub fn assemble_submission(
    patient_number: &str,
    form_id: Option<&str>,
    fill: &FormFill,
) -> Result<NewSubmission, SubmissionError> {
    let patient_number = patient_number.trim();
    if patient_number.is_empty() {
        return Err(SubmissionError::MissingPatientNumber);
    }
    let form_id = form_id
        .filter(|id| !id.is_empty())
        .ok_or(SubmissionError::NoFormSelected)?;
    let fields = fill.collect()?;
    Ok(NewSubmission {
        patient_number: patient_number.to_string(),
        form_id: form_id.to_string(),
        fields,
    })
}
