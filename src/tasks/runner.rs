//! Task runner
//!
//! A fixed-size worker pool for [`Task`]s. Task bodies run on tokio worker
//! threads; their events travel back over a channel and are handled wherever
//! the [`TaskHandle`] is drained, which keeps all presentation state on the
//! consumer side.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::sync::{Semaphore, mpsc};

use super::{ProgressReporter, Task, TaskEvent, TaskKind};
use crate::error::{Result, TaskError};

/// Default number of concurrently running tasks
pub const DEFAULT_WORKERS: usize = 4;

/// Bounded worker pool with single-flight dispatch per [`TaskKind`]
#[derive(Clone)]
pub struct TaskRunner {
    permits: Arc<Semaphore>,
    in_flight: Arc<Mutex<HashSet<TaskKind>>>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl TaskRunner {
    /// Create a runner with `workers` slots (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether a task of `kind` is queued or running
    #[cfg(test)]
    pub fn is_busy(&self, kind: TaskKind) -> bool {
        self.lock_in_flight().contains(&kind)
    }

    /// Queue `task` for execution.
    ///
    /// Fails with [`TaskError::Busy`] if a task of the same kind has not yet
    /// delivered its terminal event. Must be called within a tokio runtime.
    pub fn dispatch<T: Task>(&self, task: T) -> Result<TaskHandle<T::Output>> {
        let kind = task.kind();
        if !self.lock_in_flight().insert(kind) {
            return Err(TaskError::Busy(kind).into());
        }

        let guard = InFlightGuard {
            kind,
            in_flight: self.in_flight.clone(),
        };
        let permits = self.permits.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        debug!("Dispatching {} task", kind);
        tokio::spawn(async move {
            // The semaphore is never closed
            let _permit = permits.acquire_owned().await;
            let outcome = task.run(ProgressReporter::new(tx.clone())).await;

            // Free the slot first so a handler reacting to the terminal event can re-dispatch.
            drop(guard);

            let event = match outcome {
                Ok(output) => TaskEvent::Completed(output),
                Err(e) => {
                    warn!("{} task failed: {}", kind, e);
                    TaskEvent::Failed(e.to_string())
                }
            };
            if tx.send(event).is_err() {
                debug!("{} task finished with no listener", kind);
            }
        });

        Ok(TaskHandle { kind, events: rx })
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<TaskKind>> {
        // Poisoning only happens if a holder panicked; the set itself stays valid.
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Removes a kind from the in-flight set when dropped, including on panic.
struct InFlightGuard {
    kind: TaskKind,
    in_flight: Arc<Mutex<HashSet<TaskKind>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        set.remove(&self.kind);
    }
}

/// Receiving side of a dispatched task
pub struct TaskHandle<T> {
    kind: TaskKind,
    events: mpsc::UnboundedReceiver<TaskEvent<T>>,
}

impl<T> TaskHandle<T> {
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Next event, or `None` once the terminal event has been consumed
    pub async fn next_event(&mut self) -> Option<TaskEvent<T>> {
        self.events.recv().await
    }

    /// Drain the handle, feeding progress to `on_progress`, and return the
    /// terminal outcome.
    pub async fn wait_with<F>(mut self, mut on_progress: F) -> std::result::Result<T, String>
    where
        F: FnMut(usize, usize),
    {
        while let Some(event) = self.next_event().await {
            match event {
                TaskEvent::Progress { current, total } => on_progress(current, total),
                TaskEvent::Completed(output) => return Ok(output),
                TaskEvent::Failed(message) => return Err(message),
            }
        }
        // The worker died without a terminal event (panic inside the task body)
        Err(format!("{} task ended unexpectedly", self.kind))
    }

    /// Wait for the terminal outcome, ignoring progress
    pub async fn wait(self) -> std::result::Result<T, String> {
        self.wait_with(|_, _| {}).await
    }
}
