//! Application state module

mod alerts;
mod app_state;
mod forms;
mod list_state;
mod models;
mod stats_state;

pub use alerts::*;
pub use app_state::*;
pub use forms::*;
pub use list_state::*;
pub use models::*;
pub use stats_state::*;
