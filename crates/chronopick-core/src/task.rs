//! Deferred task queue.
//!
//! Items posted here run after the current event-dispatch cycle, when the
//! host drains the queue. This is the microtask boundary used by the focus
//! coordinator's blur check. Items are plain data rather than closures so the
//! owner can process them with full `&mut` access to itself.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// Internal task data.
#[derive(Debug)]
struct TaskData<T> {
    id: TaskId,
    item: T,
}

/// A FIFO of deferred work items.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    tasks: VecDeque<TaskData<T>>,
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post an item to run after the current dispatch cycle.
    ///
    /// Returns the task ID that can be used to cancel the item.
    pub fn post(&mut self, item: T) -> TaskId {
        let id = next_task_id();
        tracing::trace!(target: targets::TASK, task = id.as_u64(), "posted deferred task");
        self.tasks.push_back(TaskData { id, item });
        id
    }

    /// Cancel a pending item.
    ///
    /// Returns `true` if the item was found and cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            tracing::trace!(target: targets::TASK, task = id.as_u64(), "cancelled deferred task");
            true
        } else {
            false
        }
    }

    /// Check if there are any pending items.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending items.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Take every pending item, oldest first.
    pub fn drain(&mut self) -> Vec<(TaskId, T)> {
        self.tasks.drain(..).map(|t| (t.id, t.item)).collect()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_drain_in_order() {
        let mut queue = DeferredQueue::new();
        queue.post("a");
        queue.post("b");
        assert_eq!(queue.pending_count(), 2);

        let items: Vec<_> = queue.drain().into_iter().map(|(_, item)| item).collect();
        assert_eq!(items, vec!["a", "b"]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeferredQueue::new();
        let first = queue.post(1);
        let second = queue.post(2);
        assert_ne!(first, second);

        assert!(queue.cancel(first));
        assert!(!queue.cancel(first));

        let remaining = queue.drain();
        assert_eq!(remaining, vec![(second, 2)]);
    }
}
