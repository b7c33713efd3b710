//! Lock-guarded FIFO queue.

use std::collections::{HashMap, VecDeque};
use std::thread::ThreadId;
use std::time::Duration;

use crate::instrument::BusyTime;
use crate::sync::Guarded;

/// A `VecDeque`-backed queue behind one readers-writer lock.
///
/// `push` appends at the back, `pop` removes from the front.
#[derive(Debug)]
pub struct LockedQueue<T> {
    data: Guarded<VecDeque<T>>,
}

impl<T> Default for LockedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LockedQueue<T> {
    pub fn new() -> Self {
        Self {
            data: Guarded::new(VecDeque::new()),
        }
    }

    pub fn push(&self, value: T) {
        self.data.write(|q| q.push_back(value));
    }

    /// Remove the front value. No-op returning None on an empty queue.
    pub fn pop(&self) -> Option<T> {
        self.data.write(|q| q.pop_front())
    }

    /// Overwrite the front value. Returns false on an empty queue.
    pub fn set_front(&self, value: T) -> bool {
        self.data.write(|q| match q.front_mut() {
            Some(front) => {
                *front = value;
                true
            }
            None => false,
        })
    }

    /// Overwrite the back value. Returns false on an empty queue.
    pub fn set_back(&self, value: T) -> bool {
        self.data.write(|q| match q.back_mut() {
            Some(back) => {
                *back = value;
                true
            }
            None => false,
        })
    }

    pub fn len(&self) -> usize {
        self.data.read(|q| q.len())
    }

    pub fn is_empty(&self) -> bool {
        self.data.read(|q| q.is_empty())
    }
}

impl<T: Clone> LockedQueue<T> {
    pub fn front(&self) -> Option<T> {
        self.data.read(|q| q.front().cloned())
    }

    pub fn back(&self) -> Option<T> {
        self.data.read(|q| q.back().cloned())
    }
}

impl<T> BusyTime for LockedQueue<T> {
    fn work_by_thread(&self) -> HashMap<ThreadId, Duration> {
        self.data.work_by_thread()
    }

    fn reset_work(&self) {
        self.data.reset_work();
    }
}
