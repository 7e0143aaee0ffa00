//! Node color for red-black rebalancing.
//!
//! Every slot in the tree, the sentinel included, answers a color query.
//! This keeps the fixup procedures free of "absent node" branching: the
//! sentinel is permanently black, so a missing child simply reads as a
//! black node.

use std::fmt;

// ============================================================================
// Color enum
// ============================================================================

/// Node color.
///
/// Freshly inserted nodes start `Red` so that insertion never changes any
/// path's black-height; the insertion fixup then repairs red-red adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Red node. Never the sentinel, never the root after a fixup returns.
    #[default]
    Red,
    /// Black node. Contributes to the black-height of every path through it.
    Black,
}

impl Color {
    /// True for `Color::Red`
    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// True for `Color::Black`
    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

/// Single-letter form used by the diagnostic tree dump: `R` or `B`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "R"),
            Color::Black => write!(f, "B"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
