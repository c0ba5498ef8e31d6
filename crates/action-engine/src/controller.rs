/*
[INPUT]:  add/execute/delete requests from the UI loop, fired completion timers
[OUTPUT]: Ordered task list, published as whole snapshots through a watch channel
[POS]:    State layer - sole owner and mutator of the task collection
[UPDATE]: When changing lifecycle transitions or timer cancellation semantics
*/

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::task::{Task, TaskId, TaskStatus};

pub const DEFAULT_EXECUTION_DELAY: Duration = Duration::from_millis(2000);

/// Immutable view of the task list at one point in time.
pub type TaskListSnapshot = Arc<[Task]>;

/// View-model owning the task collection, the id counter, the input buffer,
/// and one completion timer per executing task.
///
/// All mutation goes through `&mut self`, so callers serialize it on a single
/// task. Completion timers run on the Tokio runtime and report back through
/// an internal channel; the owner feeds them in with [`apply_completion`].
///
/// [`apply_completion`]: TaskListController::apply_completion
#[derive(Debug)]
pub struct TaskListController {
    tasks: Vec<Task>,
    next_id: TaskId,
    input: String,
    execution_delay: Duration,
    timers: HashMap<TaskId, CancellationToken>,
    completion_tx: mpsc::UnboundedSender<TaskId>,
    completion_rx: mpsc::UnboundedReceiver<TaskId>,
    snapshot_tx: watch::Sender<TaskListSnapshot>,
    shutdown: CancellationToken,
}

impl TaskListController {
    pub fn new() -> Self {
        Self::with_execution_delay(DEFAULT_EXECUTION_DELAY)
    }

    pub fn with_execution_delay(execution_delay: Duration) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(TaskListSnapshot::from(Vec::new()));
        Self {
            tasks: Vec::new(),
            next_id: TaskId::FIRST,
            input: String::new(),
            execution_delay,
            timers: HashMap::new(),
            completion_tx,
            completion_rx,
            snapshot_tx,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next accepted task will receive.
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn execution_delay(&self) -> Duration {
        self.execution_delay
    }

    /// Number of completion timers that have not been applied or cancelled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Receiver that always holds the latest full task list.
    pub fn subscribe(&self) -> watch::Receiver<TaskListSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_input(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn pop_input(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Add the current input buffer as a task.
    pub fn submit_input(&mut self) -> Option<TaskId> {
        let raw = std::mem::take(&mut self.input);
        let added = self.add_task(&raw);
        if added.is_none() {
            self.input = raw;
        }
        added
    }

    /// Append a pending task with the trimmed text.
    ///
    /// Empty or whitespace-only text is ignored and returns `None`. On success
    /// the input buffer is cleared.
    pub fn add_task(&mut self, raw_text: &str) -> Option<TaskId> {
        let text = raw_text.trim();
        if text.is_empty() {
            tracing::trace!("ignoring empty task text");
            return None;
        }

        let id = self.next_id;
        self.tasks.push(Task::new(id, text.to_string()));
        self.next_id = id.successor();
        self.input.clear();
        tracing::debug!(task_id = %id, text = %text, "task added");
        self.publish();
        Some(id)
    }

    /// Move a pending task to `executing` and schedule its completion.
    ///
    /// Returns `false` without side effects when the id is unknown, the task
    /// is not pending, or the controller has been shut down.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, since the completion timer
    /// is spawned onto it.
    pub fn execute_task(&mut self, id: TaskId) -> bool {
        if self.shutdown.is_cancelled() {
            tracing::trace!(task_id = %id, "execute ignored: controller shut down");
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            tracing::trace!(task_id = %id, "execute ignored: unknown task");
            return false;
        };
        let Some(next) = task.status().start() else {
            tracing::trace!(task_id = %id, status = %task.status(), "execute ignored: not pending");
            return false;
        };

        task.set_status(next);
        self.spawn_completion_timer(id);
        tracing::debug!(
            task_id = %id,
            delay_ms = self.execution_delay.as_millis() as u64,
            "task executing"
        );
        self.publish();
        true
    }

    /// Remove a task in any state and cancel its completion timer.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            tracing::trace!(task_id = %id, "delete ignored: unknown task");
            return false;
        };

        let removed = self.tasks.remove(index);
        if let Some(timer) = self.timers.remove(&id) {
            timer.cancel();
        }
        tracing::debug!(task_id = %id, status = %removed.status(), "task deleted");
        self.publish();
        true
    }

    /// Apply a fired completion: `executing -> completed`.
    ///
    /// A completion for a task that no longer exists, or is not executing,
    /// changes nothing.
    pub fn apply_completion(&mut self, id: TaskId) -> bool {
        if let Some(timer) = self.timers.remove(&id) {
            timer.cancel();
        }

        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            tracing::trace!(task_id = %id, "completion dropped: task deleted");
            return false;
        };
        let Some(next) = task.status().finish() else {
            tracing::trace!(task_id = %id, status = %task.status(), "completion dropped: not executing");
            return false;
        };

        task.set_status(next);
        tracing::debug!(task_id = %id, "task completed");
        self.publish();
        true
    }

    /// Wait for the next fired completion timer.
    ///
    /// Pends forever while no timer is outstanding, which makes it safe to
    /// use as a `select!` branch.
    pub async fn next_completion(&mut self) -> Option<TaskId> {
        self.completion_rx.recv().await
    }

    /// Non-blocking variant of [`next_completion`](Self::next_completion).
    pub fn try_next_completion(&mut self) -> Option<TaskId> {
        self.completion_rx.try_recv().ok()
    }

    /// Apply every completion that has already fired. Returns how many tasks
    /// changed to `completed`.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(id) = self.try_next_completion() {
            if self.apply_completion(id) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until every outstanding timer has fired and been applied.
    pub async fn run_until_idle(&mut self) {
        while !self.timers.is_empty() {
            match self.next_completion().await {
                Some(id) => {
                    self.apply_completion(id);
                }
                None => break,
            }
        }
    }

    /// Cancel every outstanding completion timer.
    ///
    /// Tasks left in `executing` stay there.
    pub fn shutdown(&mut self) {
        self.shutdown.cancel();
        self.timers.clear();
    }

    fn spawn_completion_timer(&mut self, id: TaskId) {
        let cancel = self.shutdown.child_token();
        let token = cancel.clone();
        let completion_tx = self.completion_tx.clone();
        let delay = self.execution_delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = completion_tx.send(id);
                }
            }
        });

        if let Some(previous) = self.timers.insert(id, cancel) {
            previous.cancel();
        }
    }

    fn publish(&self) {
        self.snapshot_tx
            .send_replace(TaskListSnapshot::from(self.tasks.clone()));
    }
}

impl Default for TaskListController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskListController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use tokio::time::{Instant, timeout};

    fn statuses(controller: &TaskListController) -> Vec<(u64, TaskStatus)> {
        controller
            .tasks()
            .iter()
            .map(|task| (task.id().get(), task.status()))
            .collect()
    }

    #[test]
    fn add_assigns_increasing_ids_without_gaps() {
        let mut controller = TaskListController::new();
        let ids: Vec<u64> = ["a", "b", "c"]
            .into_iter()
            .filter_map(|text| controller.add_task(text))
            .map(TaskId::get)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(controller.len(), 3);
        assert_eq!(controller.next_id(), TaskId::new(4));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_text_is_ignored(#[case] raw: &str) {
        let mut controller = TaskListController::new();
        controller.set_input(raw);

        assert_eq!(controller.add_task(raw), None);
        assert!(controller.is_empty());
        assert_eq!(controller.next_id(), TaskId::FIRST);
        assert_eq!(controller.input(), raw);
    }

    #[test]
    fn add_trims_text_and_clears_input() {
        let mut controller = TaskListController::new();
        controller.set_input("  Write report  ");

        let id = controller.submit_input().expect("task added");

        let task = controller.get(id).expect("task exists");
        assert_eq!(task.text(), "Write report");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(controller.input(), "");
    }

    #[test]
    fn rejected_submit_keeps_input() {
        let mut controller = TaskListController::new();
        controller.push_input(' ');
        controller.push_input(' ');

        assert_eq!(controller.submit_input(), None);
        assert_eq!(controller.input(), "  ");
        assert_eq!(controller.pop_input(), Some(' '));
    }

    #[test]
    fn rejected_ids_are_not_consumed() {
        let mut controller = TaskListController::new();
        controller.add_task("first");
        controller.add_task("   ");
        let id = controller.add_task("second").expect("task added");
        assert_eq!(id.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn execute_sets_executing_then_completed_after_delay() {
        let mut controller = TaskListController::new();
        let id = controller.add_task("Write report").expect("task added");
        let started = Instant::now();

        assert!(controller.execute_task(id));
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Executing));

        let early = timeout(
            DEFAULT_EXECUTION_DELAY - Duration::from_millis(1),
            controller.next_completion(),
        )
        .await;
        assert!(early.is_err(), "completion fired before the delay");
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Executing));

        let fired = controller.next_completion().await;
        assert_eq!(fired, Some(id));
        let elapsed = started.elapsed();
        assert!(elapsed >= DEFAULT_EXECUTION_DELAY);
        assert!(elapsed < DEFAULT_EXECUTION_DELAY + Duration::from_millis(5));

        assert!(controller.apply_completion(id));
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Completed));
        assert_eq!(controller.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn execute_on_non_pending_task_is_noop() {
        let mut controller = TaskListController::new();
        let id = controller.add_task("task").expect("task added");

        assert!(controller.execute_task(id));
        assert!(!controller.execute_task(id));
        assert_eq!(controller.pending_timers(), 1);

        controller.run_until_idle().await;
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Completed));

        assert!(!controller.execute_task(id));
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Completed));
        assert_eq!(controller.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn execute_unknown_id_is_noop() {
        let mut controller = TaskListController::new();
        controller.add_task("task");

        assert!(!controller.execute_task(TaskId::new(42)));
        assert_eq!(controller.pending_timers(), 0);
        assert_eq!(statuses(&controller), vec![(1, TaskStatus::Pending)]);
    }

    #[tokio::test(start_paused = true)]
    async fn delete_mid_execution_suppresses_completion() {
        let mut controller = TaskListController::new();
        let a = controller.add_task("A").expect("task added");
        let b = controller.add_task("B").expect("task added");

        controller.execute_task(a);
        assert!(controller.delete_task(a));
        assert_eq!(controller.pending_timers(), 0);

        tokio::time::sleep(DEFAULT_EXECUTION_DELAY * 2).await;
        assert_eq!(controller.drain_completions(), 0);
        assert_eq!(statuses(&controller), vec![(b.get(), TaskStatus::Pending)]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_completion_for_deleted_task_is_ignored() {
        let mut controller = TaskListController::new();
        let id = controller.add_task("A").expect("task added");
        controller.execute_task(id);

        let fired = controller.next_completion().await.expect("timer fired");
        controller.delete_task(fired);

        assert!(!controller.apply_completion(fired));
        assert!(controller.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_executions_complete_independently() {
        let mut controller = TaskListController::new();
        let a = controller.add_task("A").expect("task added");
        let b = controller.add_task("B").expect("task added");
        let c = controller.add_task("C").expect("task added");

        controller.execute_task(a);
        tokio::time::sleep(Duration::from_millis(500)).await;
        controller.execute_task(b);
        assert_eq!(controller.pending_timers(), 2);

        let first = controller.next_completion().await;
        assert_eq!(first, Some(a));
        controller.apply_completion(a);
        assert_eq!(
            statuses(&controller),
            vec![
                (a.get(), TaskStatus::Completed),
                (b.get(), TaskStatus::Executing),
                (c.get(), TaskStatus::Pending),
            ]
        );

        controller.run_until_idle().await;
        assert_eq!(controller.get(b).map(Task::status), Some(TaskStatus::Completed));
        assert_eq!(controller.get(c).map(Task::status), Some(TaskStatus::Pending));
    }

    #[test]
    fn delete_removes_exactly_one_task() {
        let mut controller = TaskListController::new();
        controller.add_task("A");
        let b = controller.add_task("B").expect("task added");
        controller.add_task("C");

        assert!(controller.delete_task(b));
        assert!(!controller.delete_task(b));
        assert_eq!(
            statuses(&controller),
            vec![(1, TaskStatus::Pending), (3, TaskStatus::Pending)]
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut controller = TaskListController::new();
        let a = controller.add_task("A").expect("task added");
        controller.delete_task(a);
        let b = controller.add_task("B").expect("task added");
        assert_eq!(b.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn every_mutation_publishes_a_full_snapshot() {
        let mut controller = TaskListController::new();
        let mut rx = controller.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        let id = controller.add_task("A").expect("task added");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(rx.borrow_and_update().len(), 1);

        controller.add_task("   ");
        assert!(!rx.has_changed().expect("sender alive"));

        controller.execute_task(id);
        assert_eq!(rx.borrow_and_update()[0].status(), TaskStatus::Executing);

        controller.run_until_idle().await;
        assert_eq!(rx.borrow_and_update()[0].status(), TaskStatus::Completed);

        controller.delete_task(id);
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_outstanding_timers() {
        let mut controller = TaskListController::with_execution_delay(Duration::from_millis(100));
        let id = controller.add_task("A").expect("task added");
        controller.execute_task(id);

        controller.shutdown();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(controller.drain_completions(), 0);
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Executing));
    }

    #[tokio::test(start_paused = true)]
    async fn execute_after_shutdown_leaves_task_pending() {
        let mut controller = TaskListController::with_execution_delay(Duration::from_millis(100));
        let id = controller.add_task("A").expect("task added");

        controller.shutdown();
        assert!(!controller.execute_task(id));
        assert_eq!(controller.get(id).map(Task::status), Some(TaskStatus::Pending));
        assert_eq!(controller.pending_timers(), 0);
    }
}
