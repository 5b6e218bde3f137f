//! Deferred acceptance (Gale-Shapley), A proposes to B.
//!
//! ## Rounds
//!
//! Each round, every unpaired A member in ascending id order proposes down
//! its ranking, resuming where it stopped last time:
//!
//! - an unheld B member accepts
//! - a held B member swaps if it prefers the proposer, freeing its partner
//!   for the next round
//! - otherwise the proposer moves on to its next choice
//!
//! Every A member proposes to each ranking entry at most once, so a run
//! ends after at most `sum(ranking lengths)` proposals. On well-formed input
//! it ends with a perfect matching that is A-optimal and B-pessimal.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::preferences::{prefers, validate_stores, PreferenceStore};
use crate::types::{MatchError, MemberId, Pairing, Result, Side};

/// Engine behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Run [`validate_stores`] before the first proposal
    pub validate_rankings: bool,

    /// Round cap; `None` derives `n * n + 1` from the instance size
    pub max_rounds: Option<usize>,
}

impl EngineConfig {
    /// Enable or disable up-front ranking validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_rankings = validate;
        self
    }

    /// Cap the number of proposal rounds
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    fn round_limit(&self, size: usize) -> usize {
        self.max_rounds
            .unwrap_or_else(|| size.saturating_mul(size).saturating_add(1))
    }
}

/// Counters accumulated over every run of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// Completed runs, successful or not
    pub runs: u64,
    /// Runs that returned an error
    pub failures: u64,
    /// Proposals made
    pub proposals: u64,
    /// Proposals turned down by a held B member
    pub rejections: u64,
    /// Held B members that swapped to a better proposer
    pub displacements: u64,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Perfect matching keyed by B
    pub pairing: Pairing,
    /// Proposal rounds used
    pub rounds: usize,
    /// Proposals made
    pub proposals: usize,
}

/// Deferred-acceptance matching engine.
///
/// The engine only reads the preference stores; the pairing it builds is
/// owned by the call and handed to the caller on success. Nothing partial is
/// returned on failure.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    config: EngineConfig,
    stats: EngineStats,
}

#[derive(Default)]
struct RunCounters {
    proposals: usize,
    rejections: usize,
    displacements: usize,
}

impl MatchingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            stats: EngineStats::default(),
        }
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters since creation or the last reset
    #[inline]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Zero the counters
    pub fn reset_stats(&mut self) {
        self.stats = EngineStats::default();
    }

    /// Compute the A-optimal stable matching of `set_a` and `set_b`.
    ///
    /// # Errors
    ///
    /// - [`MatchError::SizeMismatch`] if the stores differ in size
    /// - [`MatchError::MissingMember`] if an A ranking names an id absent from B
    /// - [`MatchError::RankingExhausted`] if an A ranking runs out
    /// - [`MatchError::DidNotConverge`] if the round cap is reached
    /// - [`MatchError::InvalidRanking`] if validation is enabled and fails
    ///
    /// # Example
    ///
    /// ```
    /// use stable_match::engine::MatchingEngine;
    /// use stable_match::preferences::PreferenceStore;
    ///
    /// let set_a: PreferenceStore =
    ///     [(1, vec![4, 5, 6]), (2, vec![6, 5, 4]), (3, vec![5, 6, 4])].into_iter().collect();
    /// let set_b: PreferenceStore =
    ///     [(4, vec![1, 2, 3]), (5, vec![1, 2, 3]), (6, vec![1, 2, 3])].into_iter().collect();
    ///
    /// let mut engine = MatchingEngine::new();
    /// let outcome = engine.run(&set_a, &set_b).unwrap();
    ///
    /// assert_eq!(outcome.pairing.get(4), Some(1));
    /// assert_eq!(outcome.pairing.get(5), Some(3));
    /// assert_eq!(outcome.pairing.get(6), Some(2));
    /// ```
    pub fn run(&mut self, set_a: &PreferenceStore, set_b: &PreferenceStore) -> Result<MatchOutcome> {
        let mut counters = RunCounters::default();
        let result = self.deferred_acceptance(set_a, set_b, &mut counters);

        self.stats.runs += 1;
        self.stats.proposals += counters.proposals as u64;
        self.stats.rejections += counters.rejections as u64;
        self.stats.displacements += counters.displacements as u64;
        if let Err(err) = &result {
            self.stats.failures += 1;
            warn!("Matching failed after {} proposals: {}", counters.proposals, err);
        }
        result
    }

    /// Same as [`run`](Self::run), returning only the pairing
    pub fn stable_marriage(
        &mut self,
        set_a: &PreferenceStore,
        set_b: &PreferenceStore,
    ) -> Result<Pairing> {
        self.run(set_a, set_b).map(|outcome| outcome.pairing)
    }

    fn deferred_acceptance(
        &self,
        set_a: &PreferenceStore,
        set_b: &PreferenceStore,
        counters: &mut RunCounters,
    ) -> Result<MatchOutcome> {
        if set_a.size() != set_b.size() {
            return Err(MatchError::SizeMismatch {
                a: set_a.size(),
                b: set_b.size(),
            });
        }
        if self.config.validate_rankings {
            validate_stores(set_a, set_b)?;
        }

        let size = set_b.size();
        let round_limit = self.config.round_limit(size);
        debug!("Starting deferred acceptance: {} members per side, round limit {}", size, round_limit);

        let mut pairing = Pairing::new();
        // Next ranking index each A member will propose to
        let mut cursors: BTreeMap<MemberId, usize> = BTreeMap::new();
        let mut free: Vec<MemberId> = set_a.members().collect();
        let mut rounds = 0;

        while !free.is_empty() {
            if rounds >= round_limit {
                return Err(MatchError::DidNotConverge { rounds });
            }
            rounds += 1;

            let mut displaced = Vec::new();
            for a in free {
                let ranking = set_a.ranking(a).unwrap_or_default();
                let cursor = cursors.entry(a).or_insert(0);

                loop {
                    let Some(&b) = ranking.get(*cursor) else {
                        return Err(MatchError::RankingExhausted { member: a });
                    };
                    *cursor += 1;
                    counters.proposals += 1;

                    let b_ranking = set_b.ranking(b).ok_or(MatchError::MissingMember {
                        missing: b,
                        side: Side::B,
                        referenced_by: a,
                    })?;

                    match pairing.get(b) {
                        None => {
                            pairing.assign(b, a);
                            break;
                        }
                        Some(current) if prefers(b_ranking, a, current) => {
                            trace!("{} drops {} for {}", b, current, a);
                            pairing.assign(b, a);
                            displaced.push(current);
                            counters.displacements += 1;
                            break;
                        }
                        Some(_) => counters.rejections += 1,
                    }
                }
            }

            displaced.sort_unstable();
            free = displaced;
        }

        debug_assert_eq!(pairing.len(), size);
        debug!(
            "Deferred acceptance finished: {} pairs in {} rounds, {} proposals",
            pairing.len(),
            rounds,
            counters.proposals
        );

        Ok(MatchOutcome {
            pairing,
            rounds,
            proposals: counters.proposals,
        })
    }
}

/// Stable matching with a default-configured engine.
///
/// Proposals flow from `set_a` to `set_b`; the pairing is keyed by B.
///
/// Rankings must be permutations of the whole opposite set. Malformed
/// rankings end in an error or, for duplicates that still cover the set, in
/// an unspecified pairing; enable [`EngineConfig::validate_rankings`] to
/// reject them up front.
pub fn stable_marriage(set_a: &PreferenceStore, set_b: &PreferenceStore) -> Result<Pairing> {
    MatchingEngine::new().stable_marriage(set_a, set_b)
}

// ============================================================================
// Unit Tests
// ============================================================================
