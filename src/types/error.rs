//! Error types shared by the matching engine and the stability verifier.
//!
//! Every fatal condition is returned to the caller; nothing is retried. These
//! are pure computations, so the fix for an error is always different input.
//!
//! An unstable pairing is *not* an error: the verifier reports it as
//! [`Stability::Unstable`](crate::engine::Stability::Unstable).

use thiserror::Error;

use crate::types::{MemberId, Side};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;

/// What is wrong with a single ranking, as found by up-front validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RankingIssue {
    /// Identifier 0 used as a member key or ranking entry
    #[error("identifier 0 is reserved")]
    ReservedIdentifier,

    /// Ranking does not cover the whole opposite set
    #[error("ranking has {actual} entries, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    /// The same member appears twice
    #[error("identifier {0} appears more than once")]
    Duplicate(MemberId),

    /// Entry is not a member of the opposite set
    #[error("identifier {0} is not a member of the opposite set")]
    Unknown(MemberId),
}

/// Errors raised by matching, verification and fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The two stores differ in size, so no perfect matching exists
    #[error("sets A and B do not form a bijection (|A| = {a}, |B| = {b})")]
    SizeMismatch { a: usize, b: usize },

    /// A ranking references an identifier that the opposite store lacks
    #[error("{missing} was not found in {side} but is referenced by {referenced_by}")]
    MissingMember {
        missing: MemberId,
        side: Side,
        referenced_by: MemberId,
    },

    /// A member of A ran through its whole ranking without being held
    #[error("set A identifier {member} exhausted its ranking without a partner")]
    RankingExhausted { member: MemberId },

    /// Up-front validation rejected a ranking
    #[error("{side} identifier {member} has a malformed ranking: {issue}")]
    InvalidRanking {
        side: Side,
        member: MemberId,
        issue: RankingIssue,
    },

    /// The proposal loop hit its round cap
    #[error("matching did not converge within {rounds} rounds")]
    DidNotConverge { rounds: usize },

    /// A member has no partner in the pairing under verification
    #[error("{side} identifier {member} is not paired with a member of the other set")]
    NotPaired { side: Side, member: MemberId },

    /// The pairing maps two B members onto the same A member
    #[error("set A identifier {a} is paired with both {first_b} and {second_b}")]
    DuplicatePartner {
        a: MemberId,
        first_b: MemberId,
        second_b: MemberId,
    },

    /// SSZ encoding failed while fingerprinting a pairing
    #[error("failed to encode pairing: {0}")]
    Encoding(String),
}

// ============================================================================
// Unit Tests
// ============================================================================
