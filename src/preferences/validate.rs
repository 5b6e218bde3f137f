//! Opt-in validation of preference stores.
//!
//! The engine and the verifier assume every ranking is a permutation of the
//! whole opposite set. This pass checks that assumption up front and reports
//! the first offending ranking, scanning A before B and members in
//! ascending order.

use std::collections::HashSet;

use crate::preferences::PreferenceStore;
use crate::types::{is_valid_member, MatchError, MemberId, RankingIssue, Result, Side};

/// Check that both stores form a well-formed instance.
///
/// Fails with [`MatchError::SizeMismatch`] if the sizes differ, or with
/// [`MatchError::InvalidRanking`] for the first ranking that uses the
/// reserved id, has the wrong length, repeats a member or names a member
/// outside the opposite set.
pub fn validate_stores(set_a: &PreferenceStore, set_b: &PreferenceStore) -> Result<()> {
    if set_a.size() != set_b.size() {
        return Err(MatchError::SizeMismatch {
            a: set_a.size(),
            b: set_b.size(),
        });
    }
    validate_side(Side::A, set_a, set_b)?;
    validate_side(Side::B, set_b, set_a)
}

fn validate_side(side: Side, own: &PreferenceStore, opposite: &PreferenceStore) -> Result<()> {
    let mut seen = HashSet::with_capacity(opposite.size());
    for (member, ranking) in own.iter() {
        check_ranking(member, ranking, opposite, &mut seen).map_err(|issue| {
            MatchError::InvalidRanking {
                side,
                member,
                issue,
            }
        })?;
    }
    Ok(())
}

fn check_ranking(
    member: MemberId,
    ranking: &[MemberId],
    opposite: &PreferenceStore,
    seen: &mut HashSet<MemberId>,
) -> std::result::Result<(), RankingIssue> {
    if !is_valid_member(member) {
        return Err(RankingIssue::ReservedIdentifier);
    }

    seen.clear();
    for &candidate in ranking {
        if !is_valid_member(candidate) {
            return Err(RankingIssue::ReservedIdentifier);
        }
        if !opposite.contains(candidate) {
            return Err(RankingIssue::Unknown(candidate));
        }
        if !seen.insert(candidate) {
            return Err(RankingIssue::Duplicate(candidate));
        }
    }

    if ranking.len() != opposite.size() {
        return Err(RankingIssue::WrongLength {
            expected: opposite.size(),
            actual: ranking.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
