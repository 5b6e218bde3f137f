//! Member identifiers and set sides.
//!
//! Members of both sets are identified by positive integers. Each side is
//! numbered independently (usually `1..=n`); which set an identifier belongs
//! to is decided by the store it appears in, never by its value.

/// Identifier of a member of set A or set B.
pub type MemberId = u64;

/// Reserved identifier meaning "no member". Never a real member.
pub const UNASSIGNED: MemberId = 0;

// ============================================================================
// Side enum
// ============================================================================

/// Which of the two sets a member belongs to.
///
/// By convention proposals flow from A to B, and pairings are keyed by B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Proposing side
    #[default]
    A,
    /// Receiving side
    B,
}

impl Side {
    /// True for the proposing side
    pub fn is_a(self) -> bool {
        self == Side::A
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => f.write_str("set A"),
            Side::B => f.write_str("set B"),
        }
    }
}

/// Check that an identifier is usable as a real member.
#[inline]
pub fn is_valid_member(id: MemberId) -> bool {
    id != UNASSIGNED
}

// ============================================================================
// Unit Tests
// ============================================================================
