//! # Adaga Common
//!
//! Shared errors, constants, and the randomness service for the Adaga
//! adaptive genetic algorithm engine.
//!
//! ## Core Types
//!
//! - [`AdagaError`]: unified error type for engine construction and configuration
//! - [`RandomSource`]: uniform `[0, 1)` generator shared across worker threads

pub mod error;
pub mod random;

// Re-export commonly used types at crate root
pub use error::{AdagaError, ConfigError, PopulationError, Result};
pub use random::RandomSource;

/// Adaga version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest population that can supply two parents
pub const MIN_POPULATION: usize = 2;

/// Standard deviation used when the population has no measurable spread
pub const DEGENERATE_STD: f64 = 1.0;

/// Direct mutation law gain (K)
pub const DIRECT_MUTATION_GAIN: f64 = 10.0;

/// Smoothed mutation law: initial probability
pub const SMOOTHED_MUTATION_INITIAL: f64 = 0.1;

/// Smoothed mutation law: exponent gain (K')
pub const SMOOTHED_MUTATION_GAIN: f64 = 5.0;

/// Smoothed mutation law: weight of the diversity term
pub const SMOOTHED_MUTATION_BOOST: f64 = 0.2;

/// Smoothed mutation law: retained share of the previous probability
pub const SMOOTHED_MUTATION_RETENTION: f64 = 0.9;

/// Smoothed mutation law: lower clamp
pub const SMOOTHED_MUTATION_FLOOR: f64 = 1e-4;

/// Smoothed mutation law: upper clamp
pub const SMOOTHED_MUTATION_CEILING: f64 = 0.1;
