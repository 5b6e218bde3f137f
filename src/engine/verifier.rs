//! Stability verification.
//!
//! A pairing is stable when no blocking pair exists: no B member `b` held
//! by `a` ranks some `v` ahead of `a` while `v` ranks `b` ahead of its own
//! partner. For each pair `(b, a)` the verifier walks `b`'s ranking up to
//! `a` and, for each `v` met on the way, looks up `v`'s partner through the
//! inverse pairing. That is O(n^2) on well-formed input.
//!
//! Before scanning, the pairing must cover both stores one-to-one; a
//! partial pairing is an error, not a verdict.
//!
//! Pairs are visited in ascending B order, so the reported blocking pair is
//! the same on every call.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::preferences::{prefers, PreferenceStore};
use crate::types::{MatchError, MemberId, Pairing, Result, Side};

/// A triple witnessing instability: `v` and `b` prefer each other over
/// their partners, so `a` should have been displaced by `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockingPair {
    /// Member of B
    pub b: MemberId,
    /// Current partner of `b`
    pub a: MemberId,
    /// Member of A that `b` ranks above `a` and that would rather have `b`
    pub v: MemberId,
}

impl fmt::Display for BlockingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "set B identifier {} paired with set A identifier {} is more stable with set A identifier {}",
            self.b, self.a, self.v
        )
    }
}

/// Verdict of [`is_stable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    /// No blocking pair exists
    Stable,
    /// The first blocking pair found
    Unstable(BlockingPair),
}

impl Stability {
    /// True for [`Stability::Stable`]
    #[inline]
    pub fn is_stable(&self) -> bool {
        matches!(self, Stability::Stable)
    }

    /// The blocking pair, if unstable
    pub fn blocking_pair(&self) -> Option<&BlockingPair> {
        match self {
            Stability::Stable => None,
            Stability::Unstable(pair) => Some(pair),
        }
    }
}

/// Check whether `pairing` is stable under `set_a` and `set_b`.
///
/// # Errors
///
/// - [`MatchError::DuplicatePartner`] if the pairing is not one-to-one
/// - [`MatchError::MissingMember`] if a pair names a member absent from its
///   store, or a B ranking names a member absent from `set_a`
/// - [`MatchError::NotPaired`] if a member of either store has no partner;
///   a partial pairing is never reported stable
///
/// # Example
///
/// ```
/// use stable_match::engine::{is_stable, BlockingPair, Stability};
/// use stable_match::preferences::PreferenceStore;
/// use stable_match::types::Pairing;
///
/// let set_a: PreferenceStore =
///     [(1, vec![1, 2, 3]), (2, vec![3, 2, 1]), (3, vec![3, 1, 2])].into_iter().collect();
/// let set_b: PreferenceStore =
///     [(1, vec![2, 3, 1]), (2, vec![1, 2, 3]), (3, vec![3, 2, 1])].into_iter().collect();
///
/// let good: Pairing = [(1, 2), (2, 1), (3, 3)].into_iter().collect();
/// assert!(is_stable(&set_a, &set_b, &good).unwrap().is_stable());
///
/// let bad: Pairing = [(1, 3), (2, 2), (3, 1)].into_iter().collect();
/// assert_eq!(
///     is_stable(&set_a, &set_b, &bad).unwrap(),
///     Stability::Unstable(BlockingPair { b: 2, a: 2, v: 1 })
/// );
/// ```
pub fn is_stable(
    set_a: &PreferenceStore,
    set_b: &PreferenceStore,
    pairing: &Pairing,
) -> Result<Stability> {
    let partners = pairing.inverse()?;
    check_coverage(set_a, set_b, pairing, &partners)?;

    for (b, a) in pairing.iter() {
        let b_ranking = set_b.ranking(b).ok_or(MatchError::MissingMember {
            missing: b,
            side: Side::B,
            referenced_by: a,
        })?;

        for &v in b_ranking {
            if v == a {
                break;
            }
            let v_ranking = set_a.ranking(v).ok_or(MatchError::MissingMember {
                missing: v,
                side: Side::A,
                referenced_by: b,
            })?;
            let current_b = *partners.get(&v).ok_or(MatchError::NotPaired {
                side: Side::A,
                member: v,
            })?;

            if prefers(v_ranking, b, current_b) {
                let blocking = BlockingPair { b, a, v };
                warn!("Unstable pairing: {}", blocking);
                return Ok(Stability::Unstable(blocking));
            }
        }
    }

    debug!("Pairing of {} members is stable", pairing.len());
    Ok(Stability::Stable)
}

/// Every pair must join members of the two stores, and every member of
/// both stores must appear in exactly one pair.
fn check_coverage(
    set_a: &PreferenceStore,
    set_b: &PreferenceStore,
    pairing: &Pairing,
    partners: &BTreeMap<MemberId, MemberId>,
) -> Result<()> {
    for (b, a) in pairing.iter() {
        if !set_b.contains(b) {
            return Err(MatchError::MissingMember {
                missing: b,
                side: Side::B,
                referenced_by: a,
            });
        }
        if !set_a.contains(a) {
            return Err(MatchError::MissingMember {
                missing: a,
                side: Side::A,
                referenced_by: b,
            });
        }
    }

    if let Some(member) = set_a.members().find(|a| !partners.contains_key(a)) {
        return Err(MatchError::NotPaired {
            side: Side::A,
            member,
        });
    }
    if let Some(member) = set_b.members().find(|&b| !pairing.contains_b(b)) {
        return Err(MatchError::NotPaired {
            side: Side::B,
            member,
        });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: &[(MemberId, &[MemberId])]) -> PreferenceStore {
        entries.iter().map(|(id, r)| (*id, r.to_vec())).collect()
    }

    fn pairing(pairs: &[(MemberId, MemberId)]) -> Pairing {
        pairs.iter().copied().collect()
    }

    fn crossed_instance() -> (PreferenceStore, PreferenceStore) {
        let set_a = store(&[(1, &[1, 2, 3]), (2, &[3, 2, 1]), (3, &[3, 1, 2])]);
        let set_b = store(&[(1, &[2, 3, 1]), (2, &[1, 2, 3]), (3, &[3, 2, 1])]);
        (set_a, set_b)
    }

    #[test]
    fn test_simple_is_stable() {
        let set_a = store(&[(1, &[4, 5, 6]), (2, &[6, 5, 4]), (3, &[5, 6, 4])]);
        let set_b = store(&[(4, &[1, 2, 3]), (5, &[1, 2, 3]), (6, &[1, 2, 3])]);

        let result = is_stable(&set_a, &set_b, &pairing(&[(4, 1), (5, 3), (6, 2)])).unwrap();
        assert!(result.is_stable());
        assert!(result.blocking_pair().is_none());
    }

    #[test]
    fn test_b_optimal_pairing_is_stable() {
        let (set_a, set_b) = crossed_instance();
        let result = is_stable(&set_a, &set_b, &pairing(&[(1, 2), (2, 1), (3, 3)])).unwrap();
        assert_eq!(result, Stability::Stable);
    }

    #[test]
    fn test_a_optimal_pairing_is_stable() {
        // Every A member except 2 holds its first choice; 2's first choice
        // B 3 prefers its own partner
        let (set_a, set_b) = crossed_instance();
        let result = is_stable(&set_a, &set_b, &pairing(&[(1, 1), (2, 2), (3, 3)])).unwrap();
        assert_eq!(result, Stability::Stable);
    }

    #[test]
    fn test_detects_blocking_pair() {
        let (set_a, set_b) = crossed_instance();
        let result = is_stable(&set_a, &set_b, &pairing(&[(1, 3), (2, 2), (3, 1)])).unwrap();

        let blocking = BlockingPair { b: 2, a: 2, v: 1 };
        assert_eq!(result, Stability::Unstable(blocking));
        assert_eq!(result.blocking_pair(), Some(&blocking));
        assert!(!result.is_stable());
    }

    #[test]
    fn test_blocking_pair_display() {
        let blocking = BlockingPair { b: 2, a: 2, v: 1 };
        assert_eq!(
            blocking.to_string(),
            "set B identifier 2 paired with set A identifier 2 is more stable with set A identifier 1"
        );
    }

    #[test]
    fn test_verification_is_repeatable() {
        let (set_a, set_b) = crossed_instance();
        let bad = pairing(&[(1, 3), (2, 2), (3, 1)]);

        let first = is_stable(&set_a, &set_b, &bad);
        let second = is_stable(&set_a, &set_b, &bad);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_instance_is_stable() {
        let result = is_stable(&PreferenceStore::new(), &PreferenceStore::new(), &Pairing::new());
        assert_eq!(result, Ok(Stability::Stable));
    }

    #[test]
    fn test_missing_b_ranking() {
        let (set_a, set_b) = crossed_instance();
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 2), (2, 1), (7, 3)])),
            Err(MatchError::MissingMember {
                missing: 7,
                side: Side::B,
                referenced_by: 3,
            })
        );
    }

    #[test]
    fn test_pair_with_unknown_a_member() {
        let set_a = store(&[(1, &[1, 2]), (3, &[2, 1])]);
        let set_b = store(&[(1, &[2, 1]), (2, &[1, 2])]);
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 1), (2, 2)])),
            Err(MatchError::MissingMember {
                missing: 2,
                side: Side::A,
                referenced_by: 2,
            })
        );
    }

    #[test]
    fn test_b_ranking_names_unknown_a_member() {
        let set_a = store(&[(1, &[1, 2]), (2, &[2, 1])]);
        let set_b = store(&[(1, &[9, 1]), (2, &[1, 2])]);
        // B 1 ranks A 9 ahead of its partner, but set A has no member 9
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 1), (2, 2)])),
            Err(MatchError::MissingMember {
                missing: 9,
                side: Side::A,
                referenced_by: 1,
            })
        );
    }

    #[test]
    fn test_unpaired_a_member() {
        let (set_a, set_b) = crossed_instance();
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 1), (3, 3)])),
            Err(MatchError::NotPaired {
                side: Side::A,
                member: 2,
            })
        );
    }

    #[test]
    fn test_partial_pairing_is_not_stable() {
        // A 2 and B 2 rank each other first and are both left out
        let set_a = store(&[(1, &[1, 2]), (2, &[2, 1])]);
        let set_b = store(&[(1, &[1, 2]), (2, &[2, 1])]);
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 1)])),
            Err(MatchError::NotPaired {
                side: Side::A,
                member: 2,
            })
        );
    }

    #[test]
    fn test_empty_pairing_on_populated_stores() {
        let set_a = store(&[(1, &[1, 2]), (2, &[2, 1])]);
        let set_b = store(&[(1, &[1, 2]), (2, &[2, 1])]);
        assert_eq!(
            is_stable(&set_a, &set_b, &Pairing::new()),
            Err(MatchError::NotPaired {
                side: Side::A,
                member: 1,
            })
        );
    }

    #[test]
    fn test_unpaired_b_member() {
        let set_a = store(&[(1, &[1, 2, 3]), (2, &[2, 1, 3])]);
        let set_b = store(&[(1, &[1, 2]), (2, &[2, 1]), (3, &[1, 2])]);
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 1), (2, 2)])),
            Err(MatchError::NotPaired {
                side: Side::B,
                member: 3,
            })
        );
    }

    #[test]
    fn test_duplicate_partner() {
        let (set_a, set_b) = crossed_instance();
        assert_eq!(
            is_stable(&set_a, &set_b, &pairing(&[(1, 1), (2, 1), (3, 3)])),
            Err(MatchError::DuplicatePartner {
                a: 1,
                first_b: 1,
                second_b: 2,
            })
        );
    }
}
