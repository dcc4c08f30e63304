//! Capability contract for candidate solutions
//!
//! The engine never looks inside an entity. It only needs a fitness score
//! and the two genetic operators, all of which are pure: they return new
//! entities and leave the receiver untouched.

/// A candidate solution in the search space
pub trait Entity: Clone + Send + Sync {
    /// Quality score; higher is better, any sign allowed
    fn fitness(&self) -> f64;

    /// Derive a mutated copy of this entity
    fn mutate(&self) -> Self;

    /// Combine this entity with `other`
    fn crossover(&self, other: &Self) -> Self;

    /// Combine this entity with `other`, biased by `weight`
    ///
    /// `weight` is the receiver's relative share of the pair's selection
    /// weight, in `[0, 1]`: `1.0` means the offspring should come entirely
    /// from `self`, `0.0` entirely from `other`. The default ignores it.
    fn crossover_weighted(&self, other: &Self, weight: f64) -> Self {
        let _ = weight;
        self.crossover(other)
    }
}
