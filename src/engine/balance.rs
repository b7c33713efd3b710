//! Rank-augmented AVL balancing over a slab arena.
//!
//! ## Ownership
//!
//! Every recursive helper takes the slab key of a subtree root and returns
//! the slab key of the (possibly different) root after the operation. The
//! caller stores that key back into the slot it read from, so each node is
//! owned by exactly one parent slot at all times.
//!
//! ## Rank Bookkeeping
//!
//! `rank` is adjusted on the way down (insert/remove into a left subtree
//! changes the size of that subtree by one) and by rotations on the way up.
//! Rotations fix rank in O(1) from the pre-rotation ranks:
//!
//! ```text
//!        P                Q
//!       / \              / \
//!      Q   c    ==>     a   P
//!     / \                  / \
//!    a   b                b   c
//!
//!  rotate_right:  P.rank -= Q.rank   (a and Q leave P's left side)
//!  rotate_left:   Q.rank += P.rank   (P and its left side join Q's)
//! ```

use std::cmp::Ordering;

use slab::Slab;

use crate::error::InvariantError;
use crate::tree::Node;

/// Single-threaded rank-augmented AVL tree.
///
/// Insert never fails and accepts duplicates (multiset semantics; equal keys
/// descend right). Removal of an absent key is a no-op.
///
/// ## Example
///
/// ```
/// use rank_avl::engine::BalanceEngine;
///
/// let mut engine = BalanceEngine::new();
/// for key in [5, 10, 1, 7] {
///     engine.insert(key);
/// }
///
/// assert_eq!(engine.select(1), Some(&1));
/// assert_eq!(engine.select(3), Some(&7));
/// assert_eq!(engine.select(5), None);
///
/// assert!(engine.remove(&5));
/// assert!(!engine.remove(&5));
/// assert_eq!(engine.select(2), Some(&7));
/// ```
#[derive(Debug, Clone)]
pub struct BalanceEngine<K> {
    /// Node arena
    nodes: Slab<Node<K>>,

    /// Slab key of the root node
    root: Option<usize>,
}

impl<K> Default for BalanceEngine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> BalanceEngine<K> {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    /// Create an engine with `capacity` pre-allocated node slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of pre-allocated node slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of keys stored, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree, 0 when empty
    #[inline]
    pub fn height(&self) -> u8 {
        self.height_of(self.root)
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Smallest key
    pub fn min(&self) -> Option<&K> {
        self.root.map(|root| &self.nodes[self.find_min(root)].key)
    }

    /// Largest key
    pub fn max(&self) -> Option<&K> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        Some(&self.nodes[current].key)
    }

    /// The `k`-th smallest key, 1-based.
    ///
    /// Returns `None` when `k` is outside `1..=len()`.
    pub fn select(&self, k: usize) -> Option<&K> {
        let mut current = self.root;
        let mut k = k;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            match k.cmp(&node.rank) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    k -= node.rank;
                    current = node.right;
                }
            }
        }
        None
    }

    /// In-order iterator over the keys
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::with_capacity(usize::from(self.height())),
            remaining: self.nodes.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    // ========================================================================
    // Structural Helpers
    // ========================================================================

    #[inline]
    fn height_of(&self, node: Option<usize>) -> u8 {
        node.map_or(0, |idx| self.nodes[idx].height)
    }

    /// height(right) - height(left)
    #[inline]
    fn balance_factor(&self, idx: usize) -> i32 {
        let node = &self.nodes[idx];
        i32::from(self.height_of(node.right)) - i32::from(self.height_of(node.left))
    }

    #[inline]
    fn fix_height(&mut self, idx: usize) {
        let node = &self.nodes[idx];
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.nodes[idx].height = height;
    }

    /// Rotate right around `p`, promoting its left child.
    fn rotate_right(&mut self, p: usize) -> usize {
        let q = self.nodes[p]
            .left
            .expect("rotate_right requires a left child");
        self.nodes[p].left = self.nodes[q].right;
        self.nodes[q].right = Some(p);
        self.fix_height(p);
        self.fix_height(q);
        self.nodes[p].rank -= self.nodes[q].rank;
        q
    }

    /// Rotate left around `p`, promoting its right child.
    fn rotate_left(&mut self, p: usize) -> usize {
        let q = self.nodes[p]
            .right
            .expect("rotate_left requires a right child");
        self.nodes[p].right = self.nodes[q].left;
        self.nodes[q].left = Some(p);
        self.fix_height(p);
        self.fix_height(q);
        self.nodes[q].rank += self.nodes[p].rank;
        q
    }

    /// Restore the AVL invariant at `p`, returning the new subtree root.
    fn rebalance(&mut self, p: usize) -> usize {
        self.fix_height(p);
        match self.balance_factor(p) {
            2 => {
                if let Some(right) = self.nodes[p].right {
                    if self.balance_factor(right) < 0 {
                        let promoted = self.rotate_right(right);
                        self.nodes[p].right = Some(promoted);
                    }
                }
                self.rotate_left(p)
            }
            -2 => {
                if let Some(left) = self.nodes[p].left {
                    if self.balance_factor(left) > 0 {
                        let promoted = self.rotate_left(left);
                        self.nodes[p].left = Some(promoted);
                    }
                }
                self.rotate_right(p)
            }
            _ => p,
        }
    }

    /// Leftmost node of the subtree rooted at `idx`
    fn find_min(&self, mut idx: usize) -> usize {
        while let Some(left) = self.nodes[idx].left {
            idx = left;
        }
        idx
    }

    /// Detach the leftmost node of the subtree rooted at `p`.
    ///
    /// The detached node stays allocated; the caller re-links or frees it.
    fn remove_min(&mut self, p: usize) -> Option<usize> {
        let Some(left) = self.nodes[p].left else {
            return self.nodes[p].right;
        };
        self.nodes[p].rank -= 1;
        self.nodes[p].left = self.remove_min(left);
        Some(self.rebalance(p))
    }
}

impl<K: Ord> BalanceEngine<K> {
    /// Insert one occurrence of `key`
    pub fn insert(&mut self, key: K) {
        let root = self.root;
        self.root = Some(self.insert_at(root, key));
    }

    /// Remove one occurrence of `key`.
    ///
    /// Returns `false` and leaves the tree untouched if `key` is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        if !self.contains(key) {
            return false;
        }
        let root = self.root;
        self.root = self.remove_at(root, key);
        true
    }

    /// Binary search by key
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        false
    }

    fn insert_at(&mut self, root: Option<usize>, key: K) -> usize {
        let Some(p) = root else {
            return self.nodes.insert(Node::new(key));
        };
        if key < self.nodes[p].key {
            self.nodes[p].rank += 1;
            let left = self.nodes[p].left;
            self.nodes[p].left = Some(self.insert_at(left, key));
        } else {
            let right = self.nodes[p].right;
            self.nodes[p].right = Some(self.insert_at(right, key));
        }
        self.rebalance(p)
    }

    /// Caller guarantees `key` is reachable along this descent; otherwise
    /// the rank decrements on the way down would be wrong.
    fn remove_at(&mut self, root: Option<usize>, key: &K) -> Option<usize> {
        let p = root?;
        match key.cmp(&self.nodes[p].key) {
            Ordering::Less => {
                self.nodes[p].rank -= 1;
                let left = self.nodes[p].left;
                self.nodes[p].left = self.remove_at(left, key);
            }
            Ordering::Greater => {
                let right = self.nodes[p].right;
                self.nodes[p].right = self.remove_at(right, key);
            }
            Ordering::Equal => {
                let removed = self.nodes.remove(p);
                let Some(right) = removed.right else {
                    return removed.left;
                };
                let successor = self.find_min(right);
                let rest = self.remove_min(right);
                let node = &mut self.nodes[successor];
                node.right = rest;
                node.left = removed.left;
                node.rank = removed.rank;
                return Some(self.rebalance(successor));
            }
        }
        Some(self.rebalance(p))
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check every structural invariant: balance, heights, ranks, key order
    /// and that no slab slot is orphaned.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let reachable = match self.root {
            Some(root) => self.validate_subtree(root, None, None)?.0,
            None => 0,
        };
        if reachable != self.nodes.len() {
            return Err(InvariantError::Unreachable {
                reachable,
                allocated: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Returns `(size, height)` of the subtree at `idx`.
    fn validate_subtree(
        &self,
        idx: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(usize, u8), InvariantError> {
        let node = &self.nodes[idx];
        let below_lower = lower.is_some_and(|lo| node.key < *lo);
        let above_upper = upper.is_some_and(|hi| node.key > *hi);
        if below_lower || above_upper {
            return Err(InvariantError::OutOfOrder { node: idx });
        }

        let (left_size, left_height) = match node.left {
            Some(left) => self.validate_subtree(left, lower, Some(&node.key))?,
            None => (0, 0),
        };
        let (right_size, right_height) = match node.right {
            Some(right) => self.validate_subtree(right, Some(&node.key), upper)?,
            None => (0, 0),
        };

        let balance = i32::from(right_height) - i32::from(left_height);
        if balance.abs() > 1 {
            return Err(InvariantError::Unbalanced { node: idx, balance });
        }
        let actual = left_height.max(right_height) + 1;
        if node.height != actual {
            return Err(InvariantError::StaleHeight {
                node: idx,
                stored: node.height,
                actual,
            });
        }
        if node.rank != left_size + 1 {
            return Err(InvariantError::StaleRank {
                node: idx,
                stored: node.rank,
                expected: left_size + 1,
            });
        }
        Ok((left_size + right_size + 1, actual))
    }
}

// ============================================================================
// In-order Iterator
// ============================================================================

/// In-order iterator returned by [`BalanceEngine::iter`].
pub struct Iter<'a, K> {
    nodes: &'a Slab<Node<K>>,
    stack: Vec<usize>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut current: Option<usize>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.nodes[idx].left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.nodes[idx];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K> IntoIterator for &'a BalanceEngine<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
