/*
[INPUT]:  TUI app state for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding or removing panels
*/

mod header;
mod input;
mod logs;
mod task_list;

pub(in crate::tui) use header::draw_header;
pub(in crate::tui) use input::draw_input;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use task_list::draw_task_list;
