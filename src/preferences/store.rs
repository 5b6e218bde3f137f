//! Preference store for one side of a matching instance.
//!
//! ## Layout
//!
//! - **BTreeMap**: member id -> ranking, iterated in ascending id order so
//!   every consumer sees the same proposal order on every run
//! - **Vec**: ranking over the opposite set, best first
//!
//! ## Precondition
//!
//! Rankings are expected to be permutations of the whole opposite set. The
//! store does not enforce this; see [`validate_stores`](crate::preferences::validate_stores)
//! for an opt-in check.

use std::collections::BTreeMap;

use crate::types::MemberId;

/// Rankings of every member of one set over the opposite set.
///
/// Built once, then only read by the engine and the verifier.
///
/// ## Example
///
/// ```
/// use stable_match::preferences::PreferenceStore;
///
/// let store: PreferenceStore = [
///     (1, vec![4, 5, 6]),
///     (2, vec![6, 5, 4]),
///     (3, vec![5, 6, 4]),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(store.size(), 3);
/// assert_eq!(store.ranking(2), Some(&[6, 5, 4][..]));
/// assert_eq!(store.rank_of(3, 6), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceStore {
    rankings: BTreeMap<MemberId, Vec<MemberId>>,
}

impl PreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rankings: BTreeMap::new(),
        }
    }

    /// Set the ranking of `member`, returning any ranking it replaces
    pub fn insert(&mut self, member: MemberId, ranking: Vec<MemberId>) -> Option<Vec<MemberId>> {
        self.rankings.insert(member, ranking)
    }

    /// Number of members
    #[inline]
    pub fn size(&self) -> usize {
        self.rankings.len()
    }

    /// Alias for [`size`](Self::size)
    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Check if the store has no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// Ranking of `member`, best first
    #[inline]
    pub fn ranking(&self, member: MemberId) -> Option<&[MemberId]> {
        self.rankings.get(&member).map(Vec::as_slice)
    }

    /// Check if `member` belongs to this set
    #[inline]
    pub fn contains(&self, member: MemberId) -> bool {
        self.rankings.contains_key(&member)
    }

    /// Member ids in ascending order
    pub fn members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.rankings.keys().copied()
    }

    /// `(member, ranking)` in ascending member order
    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &[MemberId])> + '_ {
        self.rankings.iter().map(|(&id, ranking)| (id, ranking.as_slice()))
    }

    /// Zero-based position of `candidate` in `member`'s ranking
    pub fn rank_of(&self, member: MemberId, candidate: MemberId) -> Option<usize> {
        self.ranking(member)?.iter().position(|&v| v == candidate)
    }
}

impl FromIterator<(MemberId, Vec<MemberId>)> for PreferenceStore {
    fn from_iter<I: IntoIterator<Item = (MemberId, Vec<MemberId>)>>(iter: I) -> Self {
        Self {
            rankings: iter.into_iter().collect(),
        }
    }
}

/// Does `ranking` put `candidate` ahead of `incumbent`?
///
/// Scans from the best entry. Returns `true` when `candidate` is met first,
/// `false` when `incumbent` is met first, and `true` when neither appears.
/// When `candidate == incumbent` the answer is `true`.
pub fn prefers(ranking: &[MemberId], candidate: MemberId, incumbent: MemberId) -> bool {
    for &v in ranking {
        if v == candidate {
            return true;
        }
        if v == incumbent {
            return false;
        }
    }
    true
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> PreferenceStore {
        [(2, vec![6, 5, 4]), (1, vec![4, 5, 6]), (3, vec![5, 6, 4])]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_store_new() {
        let store = PreferenceStore::new();

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert!(store.ranking(1).is_none());
    }

    #[test]
    fn test_store_members_ascending() {
        let store = sample_store();
        let members: Vec<_> = store.members().collect();
        assert_eq!(members, vec![1, 2, 3]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_store_insert_replaces() {
        let mut store = PreferenceStore::new();
        assert!(store.insert(1, vec![1, 2]).is_none());
        assert_eq!(store.insert(1, vec![2, 1]), Some(vec![1, 2]));
        assert_eq!(store.ranking(1), Some(&[2, 1][..]));
        assert!(store.contains(1));
        assert!(!store.contains(2));
    }

    #[test]
    fn test_store_rank_of() {
        let store = sample_store();
        assert_eq!(store.rank_of(1, 4), Some(0));
        assert_eq!(store.rank_of(1, 6), Some(2));
        assert_eq!(store.rank_of(1, 9), None);
        assert_eq!(store.rank_of(9, 4), None);
    }

    #[test]
    fn test_prefers_earlier_entry() {
        let ranking = [3, 1, 2];
        assert!(prefers(&ranking, 3, 1));
        assert!(!prefers(&ranking, 2, 1));
        assert!(prefers(&ranking, 1, 2));
    }

    #[test]
    fn test_prefers_missing_entries() {
        let ranking = [3, 1];
        // Only the incumbent is ranked
        assert!(!prefers(&ranking, 9, 1));
        // Only the candidate is ranked
        assert!(prefers(&ranking, 1, 9));
        // Neither is ranked
        assert!(prefers(&ranking, 8, 9));
        assert!(prefers(&[], 1, 2));
    }

    #[test]
    fn test_prefers_same_member() {
        assert!(prefers(&[1, 2], 2, 2));
    }
}
