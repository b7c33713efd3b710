//! Lock-guarded LIFO stack.

use std::collections::HashMap;
use std::thread::ThreadId;
use std::time::Duration;

use crate::instrument::BusyTime;
use crate::sync::Guarded;

/// A `Vec`-backed stack behind one readers-writer lock.
///
/// ## Example
///
/// ```
/// use rank_avl::sync::LockedStack;
///
/// let stack = LockedStack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.top(), Some(2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug)]
pub struct LockedStack<T> {
    data: Guarded<Vec<T>>,
}

impl<T> Default for LockedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LockedStack<T> {
    pub fn new() -> Self {
        Self {
            data: Guarded::new(Vec::new()),
        }
    }

    pub fn push(&self, value: T) {
        self.data.write(|v| v.push(value));
    }

    /// Pop the top value. No-op returning None on an empty stack.
    pub fn pop(&self) -> Option<T> {
        self.data.write(|v| v.pop())
    }

    /// Overwrite the top value. Returns false on an empty stack.
    pub fn set_top(&self, value: T) -> bool {
        self.data.write(|v| match v.last_mut() {
            Some(top) => {
                *top = value;
                true
            }
            None => false,
        })
    }

    pub fn len(&self) -> usize {
        self.data.read(|v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.data.read(|v| v.is_empty())
    }
}

impl<T: Clone> LockedStack<T> {
    /// Copy of the top value
    pub fn top(&self) -> Option<T> {
        self.data.read(|v| v.last().cloned())
    }
}

impl<T> BusyTime for LockedStack<T> {
    fn work_by_thread(&self) -> HashMap<ThreadId, Duration> {
        self.data.work_by_thread()
    }

    fn reset_work(&self) {
        self.data.reset_work();
    }
}
