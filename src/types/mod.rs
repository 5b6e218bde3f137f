//! Core data types for stable matching
//!
//! ## Types
//!
//! - [`MemberId`]: Identifier of a member of either set (0 is reserved)
//! - [`Side`]: Set A (proposers) or set B (receivers)
//! - [`Pairing`]: B -> A mapping produced by the engine or supplied for audit
//! - [`MatchedPair`]: One pair in its SSZ layout
//! - [`MatchError`]: Everything that can go wrong

mod member;
mod error;
mod matched_pair;
pub mod pairing;

// Re-export all types at module level
pub use member::{is_valid_member, MemberId, Side, UNASSIGNED};
pub use error::{MatchError, RankingIssue, Result};
pub use matched_pair::MatchedPair;
pub use pairing::Pairing;
