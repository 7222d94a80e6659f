//! Form rendering module
//!
//! - `field_renderer`: schema field views and boxed inputs
//! - `fill_form`: answering a form
//! - `create_dialog`: project and user creation dialogs
//! - `builder_form`: the form builder

mod builder_form;
mod create_dialog;
mod field_renderer;
mod fill_form;

pub use builder_form::draw_builder;
pub use create_dialog::draw_create_dialog;
pub use fill_form::draw_fill;
