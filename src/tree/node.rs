//! Tree node for slab-based storage.
//!
//! ## Design
//!
//! `Node` holds one key plus the two pieces of derived metadata the
//! balancing algorithm maintains on every mutation: the AVL `height` and the
//! order-statistic `rank`.
//!
//! ## Slab Integration
//!
//! A node's position is the `usize` the engine's slab handed out when the
//! key was inserted. Removing a key frees that slot, and a later insert may
//! reuse it, so a position is only meaningful until the next mutation.
//!
//! Children are slab keys, not boxes. A node is owned by exactly one parent
//! slot (or by the root slot of the engine); rotations move keys between
//! those slots and never duplicate a node.

/// Tree node stored in the slab.
///
/// ## Memory Layout
///
/// ```text
/// Node<K> {
///     key: K
///     rank: usize           (1 + size of left subtree)
///     height: u8            (leaf = 1)
///     left: Option<usize>   (slab key)
///     right: Option<usize>  (slab key)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Node<K> {
    /// The indexed key
    pub key: K,

    /// 1-based position of this node among the keys of its own subtree,
    /// i.e. one more than the size of the left subtree
    pub rank: usize,

    /// AVL height, 1 for a leaf. 255 levels cover any tree that fits in memory.
    pub height: u8,

    /// Left child (slab key)
    pub left: Option<usize>,

    /// Right child (slab key)
    pub right: Option<usize>,
}

impl<K> Node<K> {
    /// Create a detached leaf.
    ///
    /// # Example
    ///
    /// ```
    /// use rank_avl::tree::Node;
    ///
    /// let node = Node::new(42);
    ///
    /// assert_eq!(node.rank, 1);
    /// assert_eq!(node.height, 1);
    /// assert!(node.is_leaf());
    /// ```
    #[inline]
    pub fn new(key: K) -> Self {
        Self {
            key,
            rank: 1,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Check if this node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of keys in the left subtree, derived from the rank
    #[inline]
    pub fn left_size(&self) -> usize {
        self.rank - 1
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
