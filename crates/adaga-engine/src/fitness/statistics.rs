//! Population fitness statistics
//!
//! One parallel pass evaluates every entity and accumulates per-worker sums,
//! extremes and first maxima. The variance is then taken around the mean
//! from the cached values:
//!
//! ```text
//! mean = Σf / n
//! var  = Σ(f − mean)² / n
//! std  = √var, or 1 when every value is equal
//! ```

use adaga_common::DEGENERATE_STD;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity::Entity;
use crate::pool::{interleave, WorkerPool};

/// Summary of one population's raw fitness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessStatistics {
    /// Population mean
    pub mean: f64,
    /// Population (not sample) standard deviation
    pub std: f64,
    /// Index and fitness of the first strict maximum, if any value beat −∞
    pub best: Option<(usize, f64)>,
    /// Set when `std` fell back to 1
    pub degenerate: bool,
}

impl FitnessStatistics {
    /// Reduce raw fitness values without a pool
    pub fn from_values(values: &[f64]) -> Self {
        let mut moments = Moments::default();
        for (i, &f) in values.iter().enumerate() {
            moments.observe(i, f);
        }
        moments.finish(values.iter().copied())
    }
}

/// Per-worker running sums
#[derive(Debug, Clone, Copy)]
struct Moments {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    best: Option<(usize, f64)>,
}

impl Default for Moments {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            best: None,
        }
    }
}

impl Moments {
    fn observe(&mut self, index: usize, f: f64) {
        self.count += 1;
        self.sum += f;
        self.min = self.min.min(f);
        self.max = self.max.max(f);
        // Strict comparison keeps the first maximum seen
        if f > self.best.map_or(f64::NEG_INFINITY, |(_, b)| b) {
            self.best = Some((index, f));
        }
    }

    /// Combine with a later partition; on ties the earlier one wins
    fn merge(self, later: Self) -> Self {
        let best = match (self.best, later.best) {
            (Some(a), Some(b)) if b.1 > a.1 => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        };
        Self {
            count: self.count + later.count,
            sum: self.sum + later.sum,
            min: self.min.min(later.min),
            max: self.max.max(later.max),
            best,
        }
    }

    /// Close the reduction over the same values that were observed
    fn finish(self, values: impl Iterator<Item = f64>) -> FitnessStatistics {
        let n = self.count.max(1) as f64;
        let mean = self.sum / n;

        let spread = self.count > 0 && self.max > self.min;
        let variance = if spread {
            values.map(|f| (f - mean) * (f - mean)).sum::<f64>() / n
        } else {
            0.0
        };

        let (std, degenerate) = if variance.is_finite() && variance > 0.0 {
            (variance.sqrt(), false)
        } else {
            (DEGENERATE_STD, true)
        };

        FitnessStatistics {
            mean,
            std,
            best: self.best,
            degenerate,
        }
    }
}

/// Evaluate every entity on the pool
///
/// Returns the raw fitness values in population order and their statistics.
pub fn evaluate<E: Entity>(pool: &WorkerPool, population: &[E]) -> (Vec<f64>, FitnessStatistics) {
    let parts = pool.partition(population.len(), |stride| {
        let mut moments = Moments::default();
        let values: Vec<f64> = stride
            .indices()
            .map(|i| {
                let f = population[i].fitness();
                moments.observe(i, f);
                f
            })
            .collect();
        (values, moments)
    });

    let mut columns = Vec::with_capacity(parts.len());
    let mut total = Moments::default();
    for (values, moments) in parts {
        total = total.merge(moments);
        columns.push(values);
    }

    let stats = total.finish(columns.iter().flatten().copied());
    trace!(mean = stats.mean, std = stats.std, degenerate = stats.degenerate, "Population evaluated");
    (interleave(columns, population.len()), stats)
}
