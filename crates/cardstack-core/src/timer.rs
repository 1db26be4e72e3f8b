//! Deferred-task collaborator.
//!
//! The controller never sleeps. It asks a [`Timer`] to deliver a [`TaskId`]
//! after a delay and the host calls
//! [`StackController::on_timer`](crate::StackController::on_timer) when it is due.
//! Tasks scheduled with the same delay carry no ordering guarantee among
//! themselves.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

pub trait Timer {
    /// Deliver `task` no earlier than `delay` from now.
    fn schedule(&mut self, delay: Duration, task: TaskId);

    /// The controller no longer needs `task`. Delivering it anyway is harmless.
    fn cancel(&mut self, _task: TaskId) {}
}

/// Timer that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTimer;

impl Timer for NoopTimer {
    fn schedule(&mut self, _delay: Duration, _task: TaskId) {}
}

/// Timer that queues requests for a host (or test) to deliver.
#[derive(Debug, Default)]
pub struct QueuedTimer {
    scheduled: Vec<(TaskId, Duration)>,
    cancelled: Vec<TaskId>,
}

impl QueuedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> &[(TaskId, Duration)] {
        &self.scheduled
    }

    /// Take all scheduled tasks.
    pub fn drain(&mut self) -> Vec<(TaskId, Duration)> {
        std::mem::take(&mut self.scheduled)
    }

    /// Take all cancellations.
    pub fn drain_cancelled(&mut self) -> Vec<TaskId> {
        std::mem::take(&mut self.cancelled)
    }
}

impl Timer for QueuedTimer {
    fn schedule(&mut self, delay: Duration, task: TaskId) {
        self.scheduled.push((task, delay));
    }

    fn cancel(&mut self, task: TaskId) {
        self.scheduled.retain(|(id, _)| *id != task);
        self.cancelled.push(task);
    }
}
