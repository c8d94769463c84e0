//! Ratatui presenter: hymn lookup, slide navigation, the quick display, and
//! the custom hymn manager.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
