//! Forms TUI - terminal client for a forms-management REST API
//!
//! Admins manage projects, users and form schemas; users fill in forms for
//! patients and review past submissions.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod platform;
pub mod state;
pub mod ui;
