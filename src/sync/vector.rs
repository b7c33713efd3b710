//! Lock-guarded growable vector.

use std::collections::HashMap;
use std::thread::ThreadId;
use std::time::Duration;

use crate::instrument::BusyTime;
use crate::sync::Guarded;

/// A `Vec` behind one readers-writer lock.
///
/// Positional access is bounds-checked: out-of-range reads return None and
/// out-of-range writes return false.
#[derive(Debug)]
pub struct LockedVector<T> {
    data: Guarded<Vec<T>>,
}

impl<T> Default for LockedVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LockedVector<T> {
    pub fn new() -> Self {
        Self {
            data: Guarded::new(Vec::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Guarded::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn push_back(&self, value: T) {
        self.data.write(|v| v.push(value));
    }

    pub fn pop_back(&self) -> Option<T> {
        self.data.write(|v| v.pop())
    }

    /// Overwrite the value at `index`
    pub fn set(&self, index: usize, value: T) -> bool {
        self.data.write(|v| match v.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        })
    }

    /// Overwrite the first value; false when empty
    pub fn set_front(&self, value: T) -> bool {
        self.data.write(|v| match v.first_mut() {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        })
    }

    /// Overwrite the last value; false when empty
    pub fn set_back(&self, value: T) -> bool {
        self.data.write(|v| match v.last_mut() {
            Some(slot) => {
                *slot = value;
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

    pub fn capacity(&self) -> usize {
        self.data.read(|v| v.capacity())
    }

    pub fn reserve(&self, additional: usize) {
        self.data.write(|v| v.reserve(additional));
    }

    pub fn shrink_to_fit(&self) {
        self.data.write(|v| v.shrink_to_fit());
    }

    pub fn clear(&self) {
        self.data.write(|v| v.clear());
    }
}

impl<T: Clone> LockedVector<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.read(|v| v.get(index).cloned())
    }

    pub fn front(&self) -> Option<T> {
        self.data.read(|v| v.first().cloned())
    }

    pub fn back(&self) -> Option<T> {
        self.data.read(|v| v.last().cloned())
    }

    /// Grow with copies of `fill` or truncate to `len`
    pub fn resize(&self, len: usize, fill: T) {
        self.data.write(|v| v.resize(len, fill));
    }

    /// Copy of the whole vector
    pub fn to_vec(&self) -> Vec<T> {
        self.data.read(|v| v.clone())
    }
}

impl<T> BusyTime for LockedVector<T> {
    fn work_by_thread(&self) -> HashMap<ThreadId, Duration> {
        self.data.work_by_thread()
    }

    fn reset_work(&self) {
        self.data.reset_work();
    }
}
