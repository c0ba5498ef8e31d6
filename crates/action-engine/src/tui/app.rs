/*
[INPUT]:  TaskListController, log buffer handle, UI settings
[OUTPUT]: AppState with focus, selection, and controller-backed task actions
[POS]:    TUI app state - the only holder of the controller while the UI runs
[UPDATE]: When adding UI-local state or new task actions
*/

use ratatui::widgets::ListState;

use action_engine::logging::LogBufferHandle;
use action_engine::{Task, TaskId, TaskListController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Input,
    List,
}

pub(super) struct AppState {
    pub(super) controller: TaskListController,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) list_state: ListState,
    pub(super) focus: Focus,
    pub(super) show_logs: bool,
    pub(super) status_message: String,
}

impl AppState {
    pub(super) fn new(
        controller: TaskListController,
        log_buffer: LogBufferHandle,
        show_logs: bool,
    ) -> Self {
        let mut app = Self {
            controller,
            log_buffer,
            list_state: ListState::default(),
            focus: Focus::Input,
            show_logs,
            status_message: "Ready".to_string(),
        };
        app.sync_selection();
        app
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        let idx = self.list_state.selected()?;
        self.controller.tasks().get(idx)
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task().map(Task::id)
    }

    pub(super) fn submit_input(&mut self) {
        match self.controller.submit_input() {
            Some(id) => {
                self.status_message = format!("task added: #{id}");
                self.sync_selection();
            }
            None => {
                self.status_message = "Ready".to_string();
            }
        }
    }

    pub(super) fn execute_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.controller.execute_task(id) {
            self.status_message = format!("task executing: #{id}");
        }
    }

    pub(super) fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.controller.delete_task(id) {
            self.status_message = format!("task deleted: #{id}");
            self.sync_selection();
        }
    }

    pub(super) fn complete(&mut self, id: TaskId) {
        if self.controller.apply_completion(id) {
            self.status_message = format!("task completed: #{id}");
        }
    }

    pub(super) fn focus_list(&mut self) {
        self.focus = Focus::List;
        self.sync_selection();
    }

    pub(super) fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub(super) fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.controller.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.list_state.select(Some(next));
    }

    /// Keep the selection pointing at an existing row.
    fn sync_selection(&mut self) {
        let len = self.controller.len();
        if len == 0 {
            self.list_state.select(None);
        } else if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        } else if let Some(selected) = self.list_state.selected() {
            if selected >= len {
                self.list_state.select(Some(len - 1));
            }
        }
    }
}
