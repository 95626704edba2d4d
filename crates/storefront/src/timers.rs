//! Cancellable scheduled tasks.
//!
//! The widget never sleeps. It records a pending task, asks the host
//! [`Page`](crate::page::Page) to call back after a delay, and runs the task
//! when the host fires the timer. Cancelling drops the task so a late firing
//! does nothing, and tells the host to release its timer.

use std::collections::BTreeMap;
use std::fmt;

use crate::page::ElementRef;

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Work to run when a timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Remove the acknowledgment highlight from an add control.
    ClearHighlight { element: ElementRef, class: String },
}

/// Pending tasks keyed by timer.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    pending: BTreeMap<TimerId, Task>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task and return its handle.
    pub fn schedule(&mut self, task: Task) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert(id, task);
        id
    }

    /// Take the task for a fired timer. `None` if it was cancelled or already ran.
    pub fn fire(&mut self, id: TimerId) -> Option<Task> {
        self.pending.remove(&id)
    }

    /// Drop a pending task.
    pub fn cancel(&mut self, id: TimerId) -> Option<Task> {
        self.pending.remove(&id)
    }

    /// Timer of the pending highlight reset on `element`, if one exists.
    #[must_use]
    pub fn highlight_for(&self, element: ElementRef) -> Option<TimerId> {
        self.pending.iter().find_map(|(id, task)| match task {
            Task::ClearHighlight { element: e, .. } if *e == element => Some(*id),
            Task::ClearHighlight { .. } => None,
        })
    }

    /// Remove and return every pending task.
    pub fn drain(&mut self) -> Vec<(TimerId, Task)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
