//! # Ordered Tree
//!
//! Self-balancing ordered key index: a red-black tree with slab-based node
//! storage.
//!
//! ## Architecture
//!
//! - **Types**: node color ([`Color`])
//! - **Tree**: the [`OrderedTree`] structure, its sentinel-terminated node
//!   arena, and the invariant audit
//!
//! ## Design Principles
//!
//! 1. **Balanced by invariant**: five red-black properties are restored
//!    before every mutating call returns, bounding the height at
//!    `2*log2(n+1)` and every operation at O(log n)
//! 2. **Arena links**: nodes reference each other by slab key; the tree is
//!    the sole owner of node storage, so the cyclic parent/child graph needs
//!    no shared-ownership pointers
//! 3. **Total operations**: duplicate insert and absent remove are boolean
//!    no-op outcomes, not errors; no operation panics in normal use
//! 4. **Synchronous execution**: single-threaded, no suspension points;
//!    share behind external locking or not at all
//!
//! ## Example
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::with_capacity(1000);
//!
//! for key in [31u64, 8, 57, 19, 42] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.len(), 5);
//! assert!(tree.contains(&19));
//! assert!(tree.remove(&8));
//! assert!(!tree.remove(&8));
//! assert_eq!(tree.len(), 4);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: node color
pub mod types;

/// Ordered tree: slab-backed red-black tree with invariant audit
pub mod tree;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use tree::{AuditError, NodeRef, NodeView, OrderedTree};
pub use types::Color;
