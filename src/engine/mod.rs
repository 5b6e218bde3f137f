//! Matching engine and stability verifier.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same stores always produce the same pairing
//! 2. **Read-only inputs**: Preference stores are never mutated
//! 3. **Synchronous Execution**: No async, no shared mutable state
//! 4. **Explicit failure**: Malformed input is an error, never a partial pairing
//!
//! ## Matching Rules
//!
//! - A members propose to B members in ranking order
//! - A held B member keeps whichever proposer it ranks higher
//! - The result is the A-optimal stable matching
//!
//! ## Example
//!
//! ```
//! use stable_match::engine::{is_stable, stable_marriage};
//! use stable_match::preferences::{init_stores, UniformRandom};
//!
//! let mut generator = UniformRandom::seeded(42);
//! let (set_a, set_b) = init_stores(50, &mut generator);
//!
//! let pairing = stable_marriage(&set_a, &set_b).unwrap();
//! assert_eq!(pairing.len(), 50);
//! assert!(is_stable(&set_a, &set_b, &pairing).unwrap().is_stable());
//! ```

pub mod matcher;
pub mod verifier;

pub use matcher::{stable_marriage, EngineConfig, EngineStats, MatchOutcome, MatchingEngine};
pub use verifier::{is_stable, BlockingPair, Stability};
