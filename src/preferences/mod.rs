//! Preference stores and how to fill them.
//!
//! ## Components
//!
//! - [`PreferenceStore`]: rankings of one set over the other, best first
//! - [`prefers`]: ranking comparison shared by the engine and the verifier
//! - [`PreferenceGenerator`] / [`UniformRandom`] / [`init_stores`]: pluggable generation
//! - [`validate_stores`]: opt-in permutation check
//!
//! ## Example
//!
//! ```
//! use stable_match::preferences::{init_stores, validate_stores, UniformRandom};
//!
//! let mut generator = UniformRandom::seeded(9);
//! let (set_a, set_b) = init_stores(10, &mut generator);
//!
//! assert!(validate_stores(&set_a, &set_b).is_ok());
//! ```

pub mod store;
pub mod generator;
pub mod validate;

pub use store::{prefers, PreferenceStore};
pub use generator::{init_stores, PreferenceGenerator, UniformRandom};
pub use validate::validate_stores;
