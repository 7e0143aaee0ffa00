//! Tree node for slab-based storage.
//!
//! ## Design
//!
//! `TreeNode` holds one stored key plus the three structural links of a
//! red-black tree: `left`, `right`, and `parent`. The links are slab keys
//! (`usize`), not references, so the cyclic parent/child graph never fights
//! the borrow checker: the tree owns every node through its slab and rewrites
//! indices during rotations and splices.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! ## Sentinel
//!
//! Slot 0 is the shared sentinel (`NIL`). The tree constructor seeds it as
//! the first insertion into an empty slab and it is never removed, so every
//! leaf edge and the root's parent can point at slot 0 instead of an
//! option-typed link. The sentinel's `key` is `None`, which makes a sentinel
//! key read unrepresentable rather than merely forbidden; its color is black
//! and stays black.

use crate::types::Color;

/// Slab key of the shared sentinel slot.
///
/// The constructor inserts the sentinel into a fresh (or freshly cleared)
/// slab before anything else, and slab assigns the first insertion key 0.
pub(crate) const NIL: usize = 0;

// ============================================================================
// NodeRef handle
// ============================================================================

/// Opaque handle to a stored node.
///
/// Returned by [`search`](crate::tree::OrderedTree::search) so external
/// collaborators (a renderer highlighting a located node, for instance) can
/// re-resolve the node later via [`node`](crate::tree::OrderedTree::node)
/// without holding a borrow of the tree.
///
/// A handle is only as durable as the slab slot it names: removing the key
/// frees the slot, and slab may reuse freed slots for later insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) usize);

/// Read-only view of a stored node: the key and its current color.
///
/// This is the entire per-node surface offered to external collaborators;
/// structural links stay private to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a, K> {
    /// The stored key
    pub key: &'a K,
    /// Current node color
    pub color: Color,
}

// ============================================================================
// TreeNode
// ============================================================================

/// Tree node stored in the slab.
///
/// `key` is `Some` for every real node and `None` only for the sentinel
/// slot. The link fields are slab keys; `NIL` (slot 0) stands for "no node".
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<K> {
    /// Stored key; `None` marks the sentinel slot
    pub key: Option<K>,

    /// Node color
    pub color: Color,

    /// Left child (slab key, `NIL` if none)
    pub left: usize,

    /// Right child (slab key, `NIL` if none)
    pub right: usize,

    /// Parent (slab key, `NIL` for the root)
    pub parent: usize,
}

impl<K> TreeNode<K> {
    /// Create a new unlinked node holding `key`.
    ///
    /// New nodes enter the tree red with both children at `NIL`; the caller
    /// links the node and runs the insertion fixup.
    #[inline]
    pub fn new(key: K) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    /// Create the sentinel slot value: black, keyless, self-terminating links.
    #[inline]
    pub fn sentinel() -> Self {
        Self {
            key: None,
            color: Color::Black,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
