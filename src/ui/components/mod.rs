//! Reusable UI components

mod button;
mod dialog;

pub use button::{badge, render_sidebar_button, BUTTON_HEIGHT};
pub use dialog::{centered_area, open_dialog, render_confirm_dialog, truncate_string, wrap_text};
