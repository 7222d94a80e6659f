//! Form domain layer
//!
//! - `schema`: the field schema of a form, as served by the API
//! - `fill`: answering a form and assembling the submission
//! - `field` / `form_state`: the admin creation dialogs

mod field;
mod fill;
mod form_state;
mod schema;

pub use field::{FormField, InputValue};
pub use fill::{assemble_submission, FieldInput, FillError, FillFocus, FormFill, SubmissionError};
pub use form_state::{
    BuilderSlot, DialogForm, DraftError, FieldDraft, FormBuilderForm, FormState, ProjectChoice,
    ProjectCreateForm, UserCreateForm,
};
pub use schema::{Field, FieldKind, FieldType, SchemaError};
