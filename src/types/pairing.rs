//! Pairings between set B and set A.
//!
//! A [`Pairing`] is keyed by B identifier because proposals flow from A to B.
//! On a successful match every B member is a key exactly once and every A
//! member is a value exactly once.
//!
//! ## Fingerprint
//!
//! Pairings can be reduced to a 32-byte SHA-256 fingerprint: the pair count
//! as a little-endian u64, followed by the SSZ encoding of each
//! [`MatchedPair`] in ascending B order. Two runs over identical input must
//! produce identical fingerprints.

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::types::{MatchError, MatchedPair, MemberId, Result};

/// Mapping from B identifier to A identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pairing {
    pairs: BTreeMap<MemberId, MemberId>,
}

impl Pairing {
    /// Create an empty pairing
    pub fn new() -> Self {
        Self {
            pairs: BTreeMap::new(),
        }
    }

    /// Number of pairs
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if nothing is paired
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Partner of B member `b`, if any
    #[inline]
    pub fn get(&self, b: MemberId) -> Option<MemberId> {
        self.pairs.get(&b).copied()
    }

    /// Check if B member `b` holds a partner
    #[inline]
    pub fn contains_b(&self, b: MemberId) -> bool {
        self.pairs.contains_key(&b)
    }

    /// Pair `b` with `a`, replacing any current partner
    pub(crate) fn assign(&mut self, b: MemberId, a: MemberId) {
        self.pairs.insert(b, a);
    }

    /// Iterate `(b, a)` in ascending B order
    pub fn iter(&self) -> impl Iterator<Item = (MemberId, MemberId)> + '_ {
        self.pairs.iter().map(|(&b, &a)| (b, a))
    }

    /// Build the inverse mapping A -> B.
    ///
    /// Fails with [`MatchError::DuplicatePartner`] if two B members claim the
    /// same A member.
    pub fn inverse(&self) -> Result<BTreeMap<MemberId, MemberId>> {
        let mut inverse = BTreeMap::new();
        for (b, a) in self.iter() {
            match inverse.entry(a) {
                Entry::Vacant(slot) => {
                    slot.insert(b);
                }
                Entry::Occupied(slot) => {
                    return Err(MatchError::DuplicatePartner {
                        a,
                        first_b: *slot.get(),
                        second_b: b,
                    });
                }
            }
        }
        Ok(inverse)
    }

    /// Pairs in ascending B order
    pub fn to_pairs(&self) -> Vec<MatchedPair> {
        self.iter().map(|(b, a)| MatchedPair::new(b, a)).collect()
    }

    /// SHA-256 fingerprint of the pairing.
    ///
    /// The digest input is not a single SSZ value: it is the pair count as
    /// an 8-byte little-endian prefix, then the 16-byte SSZ encoding of each
    /// pair in ascending B order.
    pub fn fingerprint(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        hasher.update((self.len() as u64).to_le_bytes());
        for pair in self.to_pairs() {
            let bytes = ssz_rs::serialize(&pair)
                .map_err(|e| MatchError::Encoding(format!("{:?}", e)))?;
            hasher.update(&bytes);
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Ok(hash)
    }

    /// Fingerprint as a hex string
    pub fn fingerprint_hex(&self) -> Result<String> {
        self.fingerprint().map(hex::encode)
    }
}

impl FromIterator<(MemberId, MemberId)> for Pairing {
    fn from_iter<I: IntoIterator<Item = (MemberId, MemberId)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pairing {
    type Item = (&'a MemberId, &'a MemberId);
    type IntoIter = btree_map::Iter<'a, MemberId, MemberId>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_from_iter() {
        let pairing: Pairing = [(4, 1), (5, 3), (6, 2)].into_iter().collect();

        assert_eq!(pairing.len(), 3);
        assert_eq!(pairing.get(5), Some(3));
        assert!(pairing.contains_b(6));
        assert!(!pairing.contains_b(1));
        assert_eq!(pairing.get(1), None);
    }

    #[test]
    fn test_pairing_assign_replaces() {
        let mut pairing = Pairing::new();
        assert!(pairing.is_empty());

        pairing.assign(4, 1);
        pairing.assign(4, 2);
        assert_eq!(pairing.get(4), Some(2));
        assert_eq!(pairing.len(), 1);
    }

    #[test]
    fn test_pairing_iter_ascending() {
        let pairing: Pairing = [(6, 2), (4, 1), (5, 3)].into_iter().collect();
        let keys: Vec<_> = pairing.iter().map(|(b, _)| b).collect();
        assert_eq!(keys, vec![4, 5, 6]);
    }

    #[test]
    fn test_pairing_inverse() {
        let pairing: Pairing = [(4, 1), (5, 3), (6, 2)].into_iter().collect();
        let inverse = pairing.inverse().unwrap();

        assert_eq!(inverse.get(&1), Some(&4));
        assert_eq!(inverse.get(&2), Some(&6));
        assert_eq!(inverse.get(&3), Some(&5));
    }

    #[test]
    fn test_pairing_inverse_duplicate() {
        let pairing: Pairing = [(1, 1), (2, 1), (3, 3)].into_iter().collect();

        assert_eq!(
            pairing.inverse(),
            Err(MatchError::DuplicatePartner {
                a: 1,
                first_b: 1,
                second_b: 2,
            })
        );
    }

    #[test]
    fn test_fingerprint_layout() {
        let pairing: Pairing = [(5, 3), (4, 1)].into_iter().collect();

        let mut hasher = Sha256::new();
        hasher.update(2u64.to_le_bytes());
        for (b, a) in [(4u64, 1u64), (5, 3)] {
            hasher.update(b.to_le_bytes());
            hasher.update(a.to_le_bytes());
        }
        let mut expected = [0u8; 32];
        expected.copy_from_slice(&hasher.finalize());

        assert_eq!(pairing.fingerprint().unwrap(), expected);
    }

    #[test]
    fn test_fingerprint_empty_pairing() {
        let mut expected = [0u8; 32];
        expected.copy_from_slice(&Sha256::digest(0u64.to_le_bytes()));
        assert_eq!(Pairing::new().fingerprint().unwrap(), expected);
    }

    #[test]
    fn test_fingerprint_determinism() {
        let first: Pairing = [(4, 1), (5, 3), (6, 2)].into_iter().collect();
        let second: Pairing = [(6, 2), (5, 3), (4, 1)].into_iter().collect();
        let other: Pairing = [(4, 1), (5, 2), (6, 3)].into_iter().collect();

        assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
        assert_ne!(first.fingerprint().unwrap(), other.fingerprint().unwrap());
    }

    #[test]
    fn test_fingerprint_hex() {
        let pairing: Pairing = [(1, 1)].into_iter().collect();
        let hex = pairing.fingerprint_hex().unwrap();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
