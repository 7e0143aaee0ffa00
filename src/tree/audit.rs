//! Invariant audit for the ordered tree.
//!
//! ## Design
//!
//! `audit()` re-derives every red-black invariant from the stored structure
//! and reports the first violation as a typed error. In correct operation it
//! never fires; it exists for tests, for stress harnesses that interleave
//! thousands of mutations, and as a diagnostic embedders can run after a
//! suspect sequence.
//!
//! ## Checked invariants
//!
//! 1. Binary-search order over every subtree (full bounds, not just
//!    parent/child pairs)
//! 2. Root's parent link is the sentinel; the sentinel is black; the root is
//!    black; child parent back-links point at their parent
//! 3. No red node has a red child
//! 4. Equal black-height along every path to a sentinel
//! 5. The recorded length equals the traversal count

use thiserror::Error;

use crate::tree::node::NIL;
use crate::tree::ordered::OrderedTree;

// ============================================================================
// AuditError
// ============================================================================

/// A red-black invariant violation found by [`OrderedTree::audit`].
///
/// Slots are reported as raw slab keys; they are diagnostic context, not
/// handles to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuditError {
    /// The sentinel slot is not black
    #[error("sentinel slot is not black")]
    SentinelNotBlack,

    /// The root's parent link does not terminate at the sentinel
    #[error("root slot {slot} has a non-sentinel parent link")]
    RootParentCorrupt { slot: usize },

    /// The root is not black
    #[error("root slot {slot} is not black")]
    RootNotBlack { slot: usize },

    /// A key falls outside the bounds its ancestors impose
    #[error("search order violated at slot {slot}")]
    OrderViolation { slot: usize },

    /// A child's parent link does not point back at its parent
    #[error("slot {slot} is not the recorded parent of child slot {child}")]
    ParentLinkCorrupt { slot: usize, child: usize },

    /// A red node has a red child
    #[error("red-red adjacency at slot {slot}")]
    RedRedViolation { slot: usize },

    /// Two paths below one node cross different black-node counts
    #[error("black-height mismatch below slot {slot}: left {left}, right {right}")]
    BlackHeightMismatch {
        slot: usize,
        left: usize,
        right: usize,
    },

    /// The maintained length disagrees with the traversal count
    #[error("recorded len {recorded} but traversal counted {counted} nodes")]
    LenMismatch { recorded: usize, counted: usize },
}

// ============================================================================
// Audit traversal
// ============================================================================

impl<K: Ord> OrderedTree<K> {
    /// Verify every red-black invariant by explicit traversal.
    ///
    /// O(n); recursion depth is bounded by the tree height.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for key in [5u64, 3, 9, 1, 4] {
    ///     tree.insert(key);
    /// }
    /// assert!(tree.audit().is_ok());
    /// ```
    pub fn audit(&self) -> Result<(), AuditError> {
        if !self.color(NIL).is_black() {
            return Err(AuditError::SentinelNotBlack);
        }

        let root = self.root();
        if root != NIL {
            if self.parent(root) != NIL {
                return Err(AuditError::RootParentCorrupt { slot: root });
            }
            if !self.color(root).is_black() {
                return Err(AuditError::RootNotBlack { slot: root });
            }
        }

        let mut counted = 0;
        self.audit_subtree(root, None, None, &mut counted)?;

        if counted != self.len() {
            return Err(AuditError::LenMismatch {
                recorded: self.len(),
                counted,
            });
        }

        Ok(())
    }

    /// Check one subtree against its ancestor key bounds; returns the
    /// subtree's black-height (sentinels count zero).
    fn audit_subtree(
        &self,
        id: usize,
        low: Option<&K>,
        high: Option<&K>,
        counted: &mut usize,
    ) -> Result<usize, AuditError> {
        if id == NIL {
            return Ok(0);
        }
        *counted += 1;

        let key = self.key(id);
        if let Some(low) = low {
            if key <= low {
                return Err(AuditError::OrderViolation { slot: id });
            }
        }
        if let Some(high) = high {
            if key >= high {
                return Err(AuditError::OrderViolation { slot: id });
            }
        }

        let left = self.left(id);
        let right = self.right(id);

        for child in [left, right] {
            if child != NIL && self.parent(child) != id {
                return Err(AuditError::ParentLinkCorrupt { slot: id, child });
            }
        }

        if self.color(id).is_red()
            && (self.color(left).is_red() || self.color(right).is_red())
        {
            return Err(AuditError::RedRedViolation { slot: id });
        }

        let left_height = self.audit_subtree(left, low, Some(key), counted)?;
        let right_height = self.audit_subtree(right, Some(key), high, counted)?;

        if left_height != right_height {
            return Err(AuditError::BlackHeightMismatch {
                slot: id,
                left: left_height,
                right: right_height,
            });
        }

        Ok(left_height + usize::from(self.color(id).is_black()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
// Corruption-path tests live next to the tree internals in `ordered.rs`;
// here we cover the clean paths and the error messages.
