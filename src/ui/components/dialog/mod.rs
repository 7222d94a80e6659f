//! Dialog components for TUI

mod base;
mod confirm_dialog;

pub use base::{centered_area, open_dialog, truncate_string, wrap_text};
pub use confirm_dialog::render_confirm_dialog;
