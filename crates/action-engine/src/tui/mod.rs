/*
[INPUT]:  TaskListController, engine config, log buffer, shutdown token
[OUTPUT]: Ratatui-based TUI for adding, executing, and deleting tasks
[POS]:    TUI module for the action-engine binary
[UPDATE]: When changing TUI module layout or the public entry point
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::run_tui;
