//! UI modules for the dispatch front end.

pub mod app_shell;
pub mod controls;
pub mod dashboard;
pub mod rendering;
pub mod utils;
