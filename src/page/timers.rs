//! # Timer Queue
//!
//! Fixed-delay transitions (notice dismissal, modal fade, staggered reveals)
//! scheduled against the runtime clock. Each controller owns its own queue and
//! drains it when the runtime advances time.

use std::time::Duration;

/// Identifier of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// Pending tasks ordered by due time, then by scheduling order
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `task` to fire once `due` is reached
    pub fn schedule(&mut self, due: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Stable insert keeps equal deadlines in scheduling order
        let index = self.pending.partition_point(|entry| entry.due <= due);
        self.pending.insert(index, Scheduled { id, due, task });
        id
    }

    /// Drop a pending task; returns false when it already fired or never existed
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        before != self.pending.len()
    }

    /// Remove and return every task due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let split = self.pending.partition_point(|entry| entry.due <= now);
        self.pending.drain(..split).map(|entry| entry.task).collect()
    }

    /// Remove the earliest task due at or before `now`, with its deadline
    ///
    /// Lets a task that schedules a follow-up still inside the window see the
    /// follow-up fire in the same pass.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        if self.pending.first()?.due > now {
            return None;
        }
        let entry = self.pending.remove(0);
        Some((entry.due, entry.task))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|entry| entry.due)
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
