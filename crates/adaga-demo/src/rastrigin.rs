//! Real-vector entity scored by the negated Rastrigin function
//!
//! ```text
//! f(x) = −(A·d + Σ (xᵢ² − A·cos(2π xᵢ)))
//! ```
//!
//! The global optimum is 0 at the origin, surrounded by a grid of local
//! optima that punish a GA once its diversity collapses.

use std::f64::consts::PI;

use adaga_engine::Entity;
use rand::Rng;
use serde::Serialize;

const A: f64 = 10.0;

/// Search box half-width per dimension
pub const BOUND: f64 = 5.12;

/// Largest per-gene perturbation applied by a mutation
const STEP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealVector {
    genes: Vec<f64>,
}

impl RealVector {
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Uniformly random point in the search box
    pub fn random(dimensions: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self::new((0..dimensions).map(|_| rng.gen_range(-BOUND..BOUND)).collect())
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }
}

impl Entity for RealVector {
    fn fitness(&self) -> f64 {
        let sum: f64 = self
            .genes
            .iter()
            .map(|x| x * x - A * (2.0 * PI * x).cos())
            .sum();
        -(A * self.genes.len() as f64 + sum)
    }

    fn mutate(&self) -> Self {
        let mut rng = rand::thread_rng();
        let mut genes = self.genes.clone();
        if !genes.is_empty() {
            let i = rng.gen_range(0..genes.len());
            genes[i] = (genes[i] + rng.gen_range(-STEP..STEP)).clamp(-BOUND, BOUND);
        }
        Self::new(genes)
    }

    fn crossover(&self, other: &Self) -> Self {
        self.crossover_weighted(other, 0.5)
    }

    /// Arithmetic blend; `weight` is this parent's share
    fn crossover_weighted(&self, other: &Self, weight: f64) -> Self {
        Self::new(
            self.genes
                .iter()
                .zip(&other.genes)
                .map(|(a, b)| weight * a + (1.0 - weight) * b)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimum_at_origin() {
        let origin = RealVector::new(vec![0.0; 4]);
        assert!(origin.fitness().abs() < 1e-12);
        assert!(RealVector::new(vec![1.0, 0.0, 0.0, 0.0]).fitness() < origin.fitness());
    }

    #[test]
    fn test_weighted_crossover_blends_toward_first_parent() {
        let a = RealVector::new(vec![1.0, 2.0]);
        let b = RealVector::new(vec![3.0, 6.0]);
        assert_eq!(a.crossover_weighted(&b, 1.0), a);
        assert_eq!(a.crossover_weighted(&b, 0.75).genes(), &[1.5, 3.0]);
        assert_eq!(a.crossover(&b).genes(), &[2.0, 4.0]);
    }

    #[test]
    fn test_mutation_stays_in_bounds_and_changes_one_gene() {
        let parent = RealVector::new(vec![BOUND; 6]);
        for _ in 0..100 {
            let child = parent.mutate();
            assert!(child.genes().iter().all(|g| (-BOUND..=BOUND).contains(g)));
            let changed = child
                .genes()
                .iter()
                .zip(parent.genes())
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
        }
        assert_eq!(parent.genes(), &[BOUND; 6]);
    }

    #[test]
    fn test_random_in_box() {
        let v = RealVector::random(32);
        assert_eq!(v.genes().len(), 32);
        assert!(v.genes().iter().all(|g| (-BOUND..BOUND).contains(g)));
    }
}
