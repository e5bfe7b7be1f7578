// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred continuations on a virtual clock.
//!
//! The engine never blocks. A delay is a task due at a later time; the host moves time forward
//! with [`Littlefoot::advance`](crate::Littlefoot::advance) and due tasks run in order.

use std::collections::BTreeMap;
use std::time::Duration;

/// Identifies one scheduled task.
///
/// Tokens are never reused. A task whose token is no longer the one its owner expects is stale
/// and must be ignored when it runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TaskToken(u64);

/// A single-threaded timer queue.
#[derive(Clone, Debug)]
pub(crate) struct Scheduler<T> {
    now: Duration,
    next: u64,
    queue: BTreeMap<(Duration, TaskToken), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Current virtual time.
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed.
    pub(crate) fn schedule(&mut self, delay: Duration, task: T) -> TaskToken {
        let token = TaskToken(self.next);
        self.next += 1;
        self.queue.insert((self.now.saturating_add(delay), token), task);
        token
    }

    /// Drop a task. Returns false if it already ran or was cancelled.
    pub(crate) fn cancel(&mut self, token: TaskToken) -> bool {
        let Some(key) = self.queue.keys().find(|(_, t)| *t == token).copied() else {
            return false;
        };
        self.queue.remove(&key).is_some()
    }

    /// Remove the earliest task due at or before `until`, moving the clock to its due time.
    ///
    /// Ties run in scheduling order.
    pub(crate) fn pop_due(&mut self, until: Duration) -> Option<(TaskToken, T)> {
        let entry = self.queue.first_entry()?;
        let (due, token) = *entry.key();
        if due > until {
            return None;
        }
        let task = entry.remove();
        self.now = self.now.max(due);
        Some((token, task))
    }

    /// Move the clock forward to `to` after the due tasks ran.
    pub(crate) fn settle(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}
