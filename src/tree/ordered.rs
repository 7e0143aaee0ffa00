//! Self-balancing ordered tree implementation.
//!
//! ## Architecture
//!
//! `OrderedTree` is a red-black tree over slab storage:
//!
//! - **Slab**: pre-allocated node storage; all structural links are slab keys
//! - **Sentinel**: slot 0 terminates every leaf edge and the root's parent,
//!   so color queries resolve uniformly with no "absent node" branching
//! - **Fixups**: insertion and deletion each run a color/rotation repair pass
//!   that restores the red-black properties before the operation returns
//!
//! ## Invariants
//!
//! After every public operation returns:
//!
//! 1. Left subtree keys compare less, right subtree keys compare greater
//! 2. The root's parent link is the sentinel; the sentinel is black
//! 3. No red node has a red child
//! 4. Every path from a node down to a sentinel crosses the same number of
//!    black nodes
//! 5. `len()` equals the number of stored keys
//!
//! Properties 3 and 4 bound the height at `2*log2(n+1)`, which is what makes
//! every operation O(log n) in the worst case.
//!
//! ## Example
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::with_capacity(100);
//!
//! assert!(tree.insert(20u64));
//! assert!(tree.insert(10));
//! assert!(tree.insert(30));
//! assert!(!tree.insert(20)); // duplicate keys are rejected
//!
//! assert_eq!(tree.len(), 3);
//! assert!(tree.contains(&10));
//! assert!(!tree.contains(&15));
//! ```

use std::cmp::Ordering;
use std::fmt::{Display, Write as _};

use slab::Slab;

use crate::tree::node::{NodeRef, NodeView, TreeNode, NIL};
use crate::types::Color;

/// Ordered key store with red-black rebalancing.
///
/// Owns all node storage through a slab; the sentinel occupies slot 0 for
/// the lifetime of the tree. Single-threaded and synchronous: callers that
/// share a tree across threads must serialize access externally.
#[derive(Debug)]
pub struct OrderedTree<K> {
    /// Pre-allocated node storage; slot 0 is the sentinel
    nodes: Slab<TreeNode<K>>,

    /// Slab key of the root node (`NIL` when the tree is empty)
    root: usize,

    /// Number of stored keys (real nodes; the sentinel is not counted)
    len: usize,
}

impl<K: Ord> Default for OrderedTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> OrderedTree<K> {
    /// Create a new empty tree
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let nil = nodes.insert(TreeNode::sentinel());
        debug_assert_eq!(nil, NIL);

        Self {
            nodes,
            root: NIL,
            len: 0,
        }
    }

    /// Create a tree with pre-allocated capacity
    ///
    /// # Arguments
    ///
    /// * `key_capacity` - Number of keys to pre-allocate slots for (one extra
    ///   slot is reserved for the sentinel)
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree = OrderedTree::<u64>::with_capacity(100);
    /// assert!(tree.capacity() >= 101);
    /// assert!(tree.is_empty());
    /// ```
    pub fn with_capacity(key_capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(key_capacity + 1);
        let nil = nodes.insert(TreeNode::sentinel());
        debug_assert_eq!(nil, NIL);

        Self {
            nodes,
            root: NIL,
            len: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the current capacity (pre-allocated slots, sentinel included)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of stored keys. O(1): maintained by insert/remove, never
    /// recomputed by traversal.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every stored key and reset to the empty state.
    ///
    /// Keeps the slab's allocation; the sentinel is re-seeded at slot 0.
    pub fn clear(&mut self) {
        self.nodes.clear();
        let nil = self.nodes.insert(TreeNode::sentinel());
        debug_assert_eq!(nil, NIL);
        self.root = NIL;
        self.len = 0;
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find a key by binary descent from the root.
    ///
    /// # Returns
    ///
    /// A handle to the node holding `key`, or `None` on a leaf-edge miss.
    /// O(log n) worst case.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(7u64);
    ///
    /// let found = tree.search(&7).unwrap();
    /// assert_eq!(*tree.node(found).unwrap().key, 7);
    /// assert!(tree.search(&8).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef> {
        let mut current = self.root;

        while current != NIL {
            match key.cmp(self.key(current)) {
                Ordering::Equal => return Some(NodeRef(current)),
                Ordering::Less => current = self.left(current),
                Ordering::Greater => current = self.right(current),
            }
        }

        None
    }

    /// Check whether `key` is stored in the tree
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Resolve a handle to a read-only view of its node.
    ///
    /// # Returns
    ///
    /// The key and color at the handle's slot, or `None` if the slot is
    /// vacant (the node was removed). The sentinel never resolves.
    pub fn node(&self, handle: NodeRef) -> Option<NodeView<'_, K>> {
        let node = self.nodes.get(handle.0)?;
        let key = node.key.as_ref()?;
        Some(NodeView {
            key,
            color: node.color,
        })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a key.
    ///
    /// Standard BST descent to a leaf edge; the new node enters red with both
    /// children at the sentinel, then the insertion fixup restores the
    /// red-black properties.
    ///
    /// # Returns
    ///
    /// `true` if the key was added, `false` if it was already present (the
    /// tree is left exactly as it was).
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.insert(5u64));
    /// assert!(!tree.insert(5));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        // Descend to the attachment point, bailing out on a duplicate before
        // any allocation so the no-op leaves the slab untouched.
        let mut parent = NIL;
        let mut current = self.root;

        while current != NIL {
            parent = current;
            match key.cmp(self.key(current)) {
                Ordering::Equal => return false,
                Ordering::Less => current = self.left(current),
                Ordering::Greater => current = self.right(current),
            }
        }

        let z = self.nodes.insert(TreeNode::new(key));
        self.nodes[z].parent = parent;

        if parent == NIL {
            self.root = z;
        } else if self.key(z) < self.key(parent) {
            self.nodes[parent].left = z;
        } else {
            self.nodes[parent].right = z;
        }

        self.insert_fixup(z);
        self.len += 1;
        true
    }

    /// Remove a key.
    ///
    /// The splice candidate is the located node itself when it has at most
    /// one real child, otherwise the largest key in its left subtree. In the
    /// two-child case the candidate's key payload moves into the located
    /// node's slot and the candidate's own slot is the one unlinked and
    /// freed, so a held [`NodeRef`] stays consistent about which slot was
    /// logically destroyed. If the spliced slot was black, the deletion
    /// fixup repairs the black-height deficit.
    ///
    /// # Returns
    ///
    /// `true` if the key was removed, `false` if it was absent (the tree is
    /// left exactly as it was).
    pub fn remove(&mut self, key: &K) -> bool {
        let z = match self.search(key) {
            Some(handle) => handle.0,
            None => return false,
        };

        let y; // slot spliced out of the structure
        let x; // replacement child, carries the potential black deficit
        let spliced_color;

        if self.left(z) == NIL {
            y = z;
            x = self.right(z);
            spliced_color = self.color(z);
            self.transplant(z, x);
        } else if self.right(z) == NIL {
            y = z;
            x = self.left(z);
            spliced_color = self.color(z);
            self.transplant(z, x);
        } else {
            // Two real children: unlink the predecessor slot and move its
            // key into z. z keeps its own color and links, so the colors
            // along z's path are unchanged; the deficit sits where the
            // predecessor used to be.
            y = self.subtree_max(self.left(z));
            x = self.left(y);
            spliced_color = self.color(y);
            self.transplant(y, x);
            let moved = self.nodes[y].key.take();
            self.nodes[z].key = moved;
        }

        self.nodes.remove(y);

        if spliced_color.is_black() {
            self.remove_fixup(x);
        }

        self.len -= 1;
        true
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Walk the tree in pre-order (node, then left, then right), calling
    /// `visit` with each key, its color, and its depth below the root.
    ///
    /// Read-only: this is the diagnostic display hook. Recursion depth is
    /// bounded by the tree height, O(log n).
    pub fn for_each_preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&K, Color, usize),
    {
        self.preorder(self.root, 0, &mut visit);
    }

    fn preorder<F>(&self, id: usize, depth: usize, visit: &mut F)
    where
        F: FnMut(&K, Color, usize),
    {
        if id == NIL {
            return;
        }
        visit(self.key(id), self.color(id), depth);
        self.preorder(self.left(id), depth + 1, visit);
        self.preorder(self.right(id), depth + 1, visit);
    }

    /// Render the tree as an indented pre-order dump, one node per line,
    /// two spaces of indent per level: `"{key}, R"` or `"{key}, B"`.
    ///
    /// An empty tree renders as the empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(10u64);
    /// tree.insert(20);
    /// tree.insert(30);
    ///
    /// // The classic single-rotation rebalance: 20 takes the root
    /// assert_eq!(tree.render(), "20, B\n  10, R\n  30, R\n");
    /// ```
    pub fn render(&self) -> String
    where
        K: Display,
    {
        let mut out = String::new();
        self.for_each_preorder(|key, color, depth| {
            let _ = writeln!(out, "{:width$}{}, {}", "", key, color, width = depth * 2);
        });
        out
    }

    // ========================================================================
    // Internal link accessors
    // ========================================================================
    // Reads go through these so the fixup code stays close to its case
    // analysis; writes hit the slab slots directly. pub(crate) where the
    // audit module needs to traverse.

    #[inline]
    pub(crate) fn root(&self) -> usize {
        self.root
    }

    #[inline]
    pub(crate) fn color(&self, id: usize) -> Color {
        self.nodes[id].color
    }

    #[inline]
    pub(crate) fn left(&self, id: usize) -> usize {
        self.nodes[id].left
    }

    #[inline]
    pub(crate) fn right(&self, id: usize) -> usize {
        self.nodes[id].right
    }

    #[inline]
    pub(crate) fn parent(&self, id: usize) -> usize {
        self.nodes[id].parent
    }

    /// Key of a real node. The sentinel holds no key; asking for it is a
    /// structural bug in the caller, not a recoverable condition.
    #[inline]
    pub(crate) fn key(&self, id: usize) -> &K {
        self.nodes[id].key.as_ref().expect("sentinel key read")
    }

    // ========================================================================
    // Rotations
    // ========================================================================

    /// Left rotation at `x`: `x`'s right child `y` takes `x`'s position,
    /// `x` becomes `y`'s left child, `y`'s old left subtree moves under `x`.
    ///
    /// Re-points the three parent links and updates `root` when `x` was the
    /// root. The sentinel's fields are never written here: the only child
    /// reparent is guarded, and `y` is a real node whenever rotation is
    /// called on a structurally valid position.
    fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        let y_left = self.left(y);

        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }

        let x_parent = self.parent(x);
        self.nodes[y].parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.left(x_parent) {
            self.nodes[x_parent].left = y;
        } else {
            self.nodes[x_parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    /// Right rotation at `x`: mirror image of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        let y_right = self.right(y);

        self.nodes[x].left = y_right;
        if y_right != NIL {
            self.nodes[y_right].parent = x;
        }

        let x_parent = self.parent(x);
        self.nodes[y].parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.right(x_parent) {
            self.nodes[x_parent].right = y;
        } else {
            self.nodes[x_parent].left = y;
        }

        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    // ========================================================================
    // Fixups
    // ========================================================================

    /// Restore the red-black properties after inserting the red node `z`.
    ///
    /// Walks upward while `z`'s parent is red. Each round resolves into one
    /// of three cases (mirrored left/right):
    ///
    /// - red uncle: recolor parent, uncle, grandparent; ascend two levels
    /// - black uncle, `z` an inner child: rotate at the parent into the
    ///   outer case
    /// - black uncle, `z` an outer child: recolor and rotate at the
    ///   grandparent; this terminates the loop
    ///
    /// The root is recolored black unconditionally afterwards.
    fn insert_fixup(&mut self, mut z: usize) {
        while self.color(self.parent(z)).is_red() {
            let parent = self.parent(z);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);

                if self.color(uncle).is_red() {
                    // Red uncle: push the violation two levels up
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        // Inner child: rotate into the outer case
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                // Mirror: parent is the right child
                let uncle = self.left(grandparent);

                if self.color(uncle).is_red() {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.nodes[root].color = Color::Black;
    }

    /// Restore equal black-heights after splicing out a black slot, given the
    /// replacement child `x` carrying the deficit.
    ///
    /// Walks upward while `x` is black and not the root. Each round resolves
    /// the sibling into one of four cases (mirrored left/right):
    ///
    /// 1. red sibling: recolor and rotate at the parent, recompute sibling
    /// 2. both nephews black: recolor the sibling red, move the deficit up
    /// 3. far nephew black, near nephew red: recolor and rotate at the
    ///    sibling, recompute
    /// 4. far nephew red: recolor sibling/parent/far nephew, rotate at the
    ///    parent, done (jump to root)
    ///
    /// `x` is recolored black unconditionally afterwards (a no-op when `x`
    /// is the sentinel or already black-rooted).
    fn remove_fixup(&mut self, mut x: usize) {
        while x != self.root && self.color(x).is_black() {
            let parent = self.parent(x);

            if x == self.left(parent) {
                let mut sibling = self.right(parent);

                if self.color(sibling).is_red() {
                    // Case 1: red sibling
                    self.nodes[sibling].color = Color::Black;
                    self.nodes[parent].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }

                if self.color(self.left(sibling)).is_black()
                    && self.color(self.right(sibling)).is_black()
                {
                    // Case 2: both nephews black, move the deficit up
                    self.nodes[sibling].color = Color::Red;
                    x = parent;
                } else {
                    if self.color(self.right(sibling)).is_black() {
                        // Case 3: far nephew black, near nephew red
                        let near = self.left(sibling);
                        self.nodes[near].color = Color::Black;
                        self.nodes[sibling].color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.right(parent);
                    }
                    // Case 4: far nephew red
                    self.nodes[sibling].color = self.color(parent);
                    self.nodes[parent].color = Color::Black;
                    let far = self.right(sibling);
                    self.nodes[far].color = Color::Black;
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                // Mirror: x is the right child
                let mut sibling = self.left(parent);

                if self.color(sibling).is_red() {
                    self.nodes[sibling].color = Color::Black;
                    self.nodes[parent].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }

                if self.color(self.right(sibling)).is_black()
                    && self.color(self.left(sibling)).is_black()
                {
                    self.nodes[sibling].color = Color::Red;
                    x = parent;
                } else {
                    if self.color(self.left(sibling)).is_black() {
                        let near = self.right(sibling);
                        self.nodes[near].color = Color::Black;
                        self.nodes[sibling].color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.left(parent);
                    }
                    self.nodes[sibling].color = self.color(parent);
                    self.nodes[parent].color = Color::Black;
                    let far = self.left(sibling);
                    self.nodes[far].color = Color::Black;
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }

        self.nodes[x].color = Color::Black;
    }

    // ========================================================================
    // Splice helpers
    // ========================================================================

    /// Replace the subtree rooted at `u` with the subtree rooted at `v` in
    /// `u`'s parent.
    ///
    /// Writes `v`'s parent link unconditionally, even when `v` is the
    /// sentinel: the deletion fixup needs a path upward from an empty
    /// replacement child. That sentinel write is scratch state with no
    /// meaning once `remove` returns.
    fn transplant(&mut self, u: usize, v: usize) {
        let u_parent = self.parent(u);

        if u_parent == NIL {
            self.root = v;
        } else if u == self.left(u_parent) {
            self.nodes[u_parent].left = v;
        } else {
            self.nodes[u_parent].right = v;
        }

        self.nodes[v].parent = u_parent;
    }

    /// Slot holding the largest key in the subtree rooted at `current`
    fn subtree_max(&self, mut current: usize) -> usize {
        while self.right(current) != NIL {
            current = self.right(current);
        }
        current
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
