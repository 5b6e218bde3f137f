//! One matched couple in its fixed-size SSZ layout.
//!
//! ## SSZ Layout
//!
//! Fixed-size container of two little-endian u64 fields (16 bytes):
//! `b` then `a`.

use ssz_rs::prelude::*;

use crate::types::MemberId;

/// One matched couple, as encoded for pairing fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct MatchedPair {
    /// Member of set B
    pub b: u64,

    /// Member of set A held by `b`
    pub a: u64,
}

impl MatchedPair {
    /// Create a new pair
    pub fn new(b: MemberId, a: MemberId) -> Self {
        Self { b, a }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
