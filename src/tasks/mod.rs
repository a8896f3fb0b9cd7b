//! Background tasks
//!
//! Network work runs inside tasks dispatched onto the [`TaskRunner`] worker
//! pool. Each task reports back over its own event channel: any number of
//! [`TaskEvent::Progress`] events followed by exactly one terminal event,
//! either [`TaskEvent::Completed`] or [`TaskEvent::Failed`].

use std::fmt;

use async_trait::async_trait;
use log::trace;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::Result;

pub mod delete;
pub mod fetch;
pub mod runner;

pub use delete::{BulkDeleteTask, DeleteResult};
pub use fetch::{FetchResult, FetchTask};
pub use runner::{TaskHandle, TaskRunner};

/// Kinds of task; at most one of each kind is outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Connect & sync: populations plus all users
    Fetch,
    /// Bulk user deletion
    Delete,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Fetch => f.write_str("fetch"),
            TaskKind::Delete => f.write_str("delete"),
        }
    }
}

/// Event emitted by a running task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent<T> {
    /// `current` of `total` items processed
    Progress { current: usize, total: usize },
    /// The task finished with a result
    Completed(T),
    /// The task failed; the message is user-facing
    Failed(String),
}

impl<T> TaskEvent<T> {
    /// Whether this event ends the task's event stream
    #[cfg(test)]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskEvent::Progress { .. })
    }
}

/// Sending half handed to a task body for progress updates.
pub struct ProgressReporter<T> {
    tx: UnboundedSender<TaskEvent<T>>,
}

impl<T> ProgressReporter<T> {
    pub(crate) fn new(tx: UnboundedSender<TaskEvent<T>>) -> Self {
        Self { tx }
    }

    /// Report that `current` of `total` items have been attempted
    pub fn report(&self, current: usize, total: usize) {
        // The consumer may have stopped listening; the task carries on regardless.
        if self.tx.send(TaskEvent::Progress { current, total }).is_err() {
            trace!("Progress {}/{} dropped: no listener", current, total);
        }
    }
}

/// A unit of background work.
///
/// `run` executes on a worker; its return value becomes the task's single
/// terminal event.
#[async_trait]
pub trait Task: Send + 'static {
    /// Payload of the completion event
    type Output: Send + 'static;

    /// Kind used for single-flight bookkeeping
    fn kind(&self) -> TaskKind;

    /// Task body
    async fn run(self, progress: ProgressReporter<Self::Output>) -> Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_terminal_events() {
        assert!(!TaskEvent::<()>::Progress { current: 1, total: 2 }.is_terminal());
        assert!(TaskEvent::Completed(()).is_terminal());
        assert!(TaskEvent::<()>::Failed("x".to_string()).is_terminal());
    }

    #[test]
    fn test_progress_reporter_survives_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel::<TaskEvent<()>>();
        drop(rx);

        // Must not panic
        ProgressReporter::new(tx).report(1, 1);
    }

    #[test]
    fn test_task_kind_display() {
        assert_eq!(TaskKind::Fetch.to_string(), "fetch");
        assert_eq!(TaskKind::Delete.to_string(), "delete");
    }
}
