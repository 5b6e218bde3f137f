//! # Stable Match
//!
//! Stable matching between two equal-size sets whose members rank each
//! other, plus an independent stability check.
//!
//! ## Architecture
//!
//! - **Types**: Member ids, pairings and errors
//! - **Preferences**: Per-side ranking stores, generation and validation
//! - **Engine**: Deferred acceptance (Gale-Shapley) and the stability verifier
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Members are visited in ascending id order; randomness
//!    only enters through an explicitly seeded generator
//! 2. **No hidden state**: No global RNG, no interior mutability
//! 3. **Synchronous Execution**: Pure computations, safe to run on many
//!    threads over shared read-only stores
//!
//! ## Preconditions
//!
//! Every ranking must be a permutation of the whole opposite set. The engine
//! does not check this unless asked to
//! ([`EngineConfig::validate_rankings`](engine::EngineConfig::validate_rankings)).

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: MemberId, Side, Pairing, MatchError
pub mod types;

/// Preference stores: rankings, generation, validation
pub mod preferences;

/// Matching engine and stability verifier
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{MatchError, MatchedPair, MemberId, Pairing, RankingIssue, Result, Side};
pub use preferences::{init_stores, PreferenceGenerator, PreferenceStore, UniformRandom};
pub use engine::{
    is_stable, stable_marriage, BlockingPair, EngineConfig, MatchOutcome, MatchingEngine,
    Stability,
};
