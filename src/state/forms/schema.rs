//! Form field schema
//!
//! A form is an ordered list of [`Field`]s. On the wire each field is
//! `{ "label": .., "type": .., "options": [..] }`; in memory the type tag and
//! option list are folded into the closed [`FieldKind`] enum so that every
//! field the client holds is one it knows how to render.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a wire field is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown field type `{kind}` for field `{label}`")]
    UnknownType { label: String, kind: String },
    #[error("field `{label}` needs at least one option")]
    MissingOptions { label: String },
    #[error("field label must not be empty")]
    EmptyLabel,
}

/// Field type tag, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Dropdown,
    Radio,
    Checkbox,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::Checkbox,
    ];

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }

    /// Name shown in the form builder
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Number => "Number Input",
            Self::Dropdown => "Dropdown",
            Self::Radio => "Radio Buttons",
            Self::Checkbox => "Checkboxes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::Checkbox)
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Text => Self::Number,
            Self::Number => Self::Dropdown,
            Self::Dropdown => Self::Radio,
            Self::Radio => Self::Checkbox,
            Self::Checkbox => Self::Text,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Text => Self::Checkbox,
            Self::Number => Self::Text,
            Self::Dropdown => Self::Number,
            Self::Radio => Self::Dropdown,
            Self::Checkbox => Self::Radio,
        }
    }
}

/// What kind of input a field takes. Choice kinds carry their options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Dropdown { options: Vec<String> },
    Radio { options: Vec<String> },
    Checkbox { options: Vec<String> },
}

impl FieldKind {
    /// Build a kind from its tag and an option list. Options are dropped for
    /// text and number and required for the choice kinds.
    pub fn new(kind: FieldType, options: Vec<String>) -> Option<Self> {
        match kind {
            FieldType::Text => Some(Self::Text),
            FieldType::Number => Some(Self::Number),
            _ if options.is_empty() => None,
            FieldType::Dropdown => Some(Self::Dropdown { options }),
            FieldType::Radio => Some(Self::Radio { options }),
            FieldType::Checkbox => Some(Self::Checkbox { options }),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Number => FieldType::Number,
            Self::Dropdown { .. } => FieldType::Dropdown,
            Self::Radio { .. } => FieldType::Radio,
            Self::Checkbox { .. } => FieldType::Checkbox,
        }
    }

    /// Options offered by a choice kind; empty for text and number.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Text | Self::Number => &[],
            Self::Dropdown { options } | Self::Radio { options } | Self::Checkbox { options } => {
                options
            }
        }
    }

    /// Whether an answer is mandatory. Only checkbox groups may be left empty.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Checkbox { .. })
    }
}

/// One question of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireField", into = "WireField")]
pub struct Field {
    /// Question text, also the key of the answer in a submission
    pub label: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Text)
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Number)
    }

    pub fn dropdown(label: impl Into<String>, options: &[&str]) -> Self {
        Self::new(
            label,
            FieldKind::Dropdown {
                options: to_owned(options),
            },
        )
    }

    pub fn radio(label: impl Into<String>, options: &[&str]) -> Self {
        Self::new(
            label,
            FieldKind::Radio {
                options: to_owned(options),
            },
        )
    }

    pub fn checkbox(label: impl Into<String>, options: &[&str]) -> Self {
        Self::new(
            label,
            FieldKind::Checkbox {
                options: to_owned(options),
            },
        )
    }
}

fn to_owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireField {
    label: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    options: Vec<String>,
}

impl TryFrom<WireField> for Field {
    type Error = SchemaError;

    fn try_from(wire: WireField) -> Result<Self, Self::Error> {
        let kind = FieldType::parse(&wire.kind).ok_or_else(|| SchemaError::UnknownType {
            label: wire.label.clone(),
            kind: wire.kind.clone(),
        })?;
        let kind = FieldKind::new(kind, wire.options).ok_or_else(|| SchemaError::MissingOptions {
            label: wire.label.clone(),
        })?;
        Ok(Field {
            label: wire.label,
            kind,
        })
    }
}

impl From<Field> for WireField {
    fn from(field: Field) -> Self {
        let kind = field.kind.field_type().as_str().to_string();
        let options = match field.kind {
            FieldKind::Text | FieldKind::Number => Vec::new(),
            FieldKind::Dropdown { options }
            | FieldKind::Radio { options }
            | FieldKind::Checkbox { options } => options,
        };
        WireField {
            label: field.label,
            kind,
            options,
        }
    }
}
