//! Preference generation.
//!
//! Generation is pluggable: anything implementing [`PreferenceGenerator`]
//! (including plain closures) can fill both stores through [`init_stores`].
//!
//! [`UniformRandom`] is the reference strategy. It draws each ranking as a
//! uniformly random permutation of `1..=size` by sampling without
//! replacement from a shrinking candidate pool. The random source is an
//! explicit handle owned by the generator; there is no process-wide RNG.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::preferences::PreferenceStore;
use crate::types::{MemberId, Side};

/// Produces the ranking of one member.
///
/// Called once per member per side. Implementations receive member keys in
/// `1..=size` and should return a ranking of length `size` over the opposite
/// set, also numbered `1..=size`.
pub trait PreferenceGenerator {
    /// Ranking for `member` of `side`, best first
    fn generate(&mut self, side: Side, member: MemberId, size: usize) -> Vec<MemberId>;
}

impl<F> PreferenceGenerator for F
where
    F: FnMut(Side, MemberId, usize) -> Vec<MemberId>,
{
    fn generate(&mut self, side: Side, member: MemberId, size: usize) -> Vec<MemberId> {
        self(side, member, size)
    }
}

/// Uniformly random permutations drawn from an injected RNG.
///
/// ## Example
///
/// ```
/// use stable_match::preferences::{init_stores, UniformRandom};
///
/// let mut generator = UniformRandom::seeded(42);
/// let (set_a, set_b) = init_stores(5, &mut generator);
///
/// assert_eq!(set_a.size(), 5);
/// assert_eq!(set_b.size(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct UniformRandom<R> {
    rng: R,
}

impl<R: Rng> UniformRandom<R> {
    /// Wrap an existing random source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give the random source back
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Draw a uniformly random permutation of `1..=size`.
    pub fn permutation(&mut self, size: usize) -> Vec<MemberId> {
        let mut pool: Vec<MemberId> = (1..=size as MemberId).collect();
        let mut ranking = Vec::with_capacity(size);
        while !pool.is_empty() {
            let idx = self.rng.gen_range(0..pool.len());
            ranking.push(pool.swap_remove(idx));
        }
        ranking
    }
}

impl UniformRandom<ChaCha8Rng> {
    /// Reproducible generator: same seed, same rankings
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PreferenceGenerator for UniformRandom<R> {
    fn generate(&mut self, _side: Side, _member: MemberId, size: usize) -> Vec<MemberId> {
        self.permutation(size)
    }
}

/// Build stores for A and B, each with members `1..=size`.
///
/// Members are generated in ascending order, alternating A then B for each
/// key, so a seeded generator always yields the same instance.
pub fn init_stores<G>(size: usize, generator: &mut G) -> (PreferenceStore, PreferenceStore)
where
    G: PreferenceGenerator + ?Sized,
{
    let mut set_a = PreferenceStore::new();
    let mut set_b = PreferenceStore::new();
    for member in 1..=size as MemberId {
        set_a.insert(member, generator.generate(Side::A, member, size));
        set_b.insert(member, generator.generate(Side::B, member, size));
    }
    (set_a, set_b)
}

// ============================================================================
// Unit Tests
// ============================================================================
