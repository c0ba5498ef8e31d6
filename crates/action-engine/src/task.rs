/*
[INPUT]:  Trimmed user text and controller-assigned ids
[OUTPUT]: Task records, TaskId newtype, and the TaskStatus state machine
[POS]:    Domain layer - the only entity tracked by the engine
[UPDATE]: When adding task fields or status transitions
*/

use std::fmt;

/// Session-unique task identifier, assigned monotonically starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub const FIRST: TaskId = TaskId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle stage of a task.
///
/// `Pending -> Executing -> Completed`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Pending,
    Executing,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Executing => "executing",
            TaskStatus::Completed => "completed",
        }
    }

    /// Upper-cased label shown inside the status badge.
    pub fn badge(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Executing => "EXECUTING",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Badge color as RGB: gray, amber, green.
    pub fn badge_rgb(self) -> (u8, u8, u8) {
        match self {
            TaskStatus::Pending => (0x6b, 0x72, 0x80),
            TaskStatus::Executing => (0xf5, 0x9e, 0x0b),
            TaskStatus::Completed => (0x10, 0xb9, 0x81),
        }
    }

    pub fn can_execute(self) -> bool {
        matches!(self, TaskStatus::Pending)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// `Pending -> Executing`; any other state has no start transition.
    pub fn start(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::Executing),
            TaskStatus::Executing | TaskStatus::Completed => None,
        }
    }

    /// `Executing -> Completed`; any other state has no finish transition.
    pub fn finish(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Executing => Some(TaskStatus::Completed),
            TaskStatus::Pending | TaskStatus::Completed => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user-entered unit of work. Text is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    text: String,
    status: TaskStatus,
}

impl Task {
    pub(crate) fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            status: TaskStatus::Pending,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transitions_only_move_forward() {
        assert_eq!(TaskStatus::Pending.start(), Some(TaskStatus::Executing));
        assert_eq!(TaskStatus::Executing.start(), None);
        assert_eq!(TaskStatus::Completed.start(), None);

        assert_eq!(TaskStatus::Executing.finish(), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::Pending.finish(), None);
        assert_eq!(TaskStatus::Completed.finish(), None);
    }

    #[test]
    fn only_pending_can_execute() {
        assert!(TaskStatus::Pending.can_execute());
        assert!(!TaskStatus::Executing.can_execute());
        assert!(!TaskStatus::Completed.can_execute());
        assert!(TaskStatus::Completed.is_terminal());
    }

    #[test]
    fn badge_colors_match_gray_amber_green() {
        assert_eq!(TaskStatus::Pending.badge_rgb(), (0x6b, 0x72, 0x80));
        assert_eq!(TaskStatus::Executing.badge_rgb(), (0xf5, 0x9e, 0x0b));
        assert_eq!(TaskStatus::Completed.badge_rgb(), (0x10, 0xb9, 0x81));
        assert_eq!(TaskStatus::Executing.badge(), "EXECUTING");
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn new_task_starts_pending() {
        let task = Task::new(TaskId::FIRST, "Write report".to_string());
        assert_eq!(task.id().get(), 1);
        assert_eq!(task.text(), "Write report");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(TaskId::FIRST.successor(), TaskId::new(2));
    }
}
