//! Logistic rescale of raw fitness into selection weights
//!
//! ```text
//! w = 1 / (1 + exp((mean − f) / std))
//! ```
//!
//! Raw fitness may be negative or span many orders of magnitude; the
//! logistic keeps every weight inside (0, 1) and centres selection pressure
//! on the population mean.

use serde::Serialize;

use super::statistics::FitnessStatistics;
use crate::pool::{interleave, WorkerPool};

/// Smallest weight handed to the selector
pub const WEIGHT_FLOOR: f64 = f64::MIN_POSITIVE;

/// Largest weight handed to the selector (largest f64 below 1)
pub const WEIGHT_CEILING: f64 = 1.0 - f64::EPSILON / 2.0;

/// Logistic weight of a single fitness value
pub fn logistic(fitness: f64, mean: f64, std: f64) -> f64 {
    let w = 1.0 / (1.0 + ((mean - fitness) / std).exp());
    w.clamp(WEIGHT_FLOOR, WEIGHT_CEILING)
}

/// Selection weights of the current population and their sum
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionWeights {
    values: Vec<f64>,
    sum: f64,
}

impl SelectionWeights {
    /// Rescale raw fitness on the pool; the raw values are consumed
    pub fn rescale(pool: &WorkerPool, raw: Vec<f64>, stats: &FitnessStatistics) -> Self {
        let (mean, std) = (stats.mean, stats.std);
        let parts = pool.partition(raw.len(), |stride| {
            let mut sum = 0.0;
            let values: Vec<f64> = stride
                .indices()
                .map(|i| {
                    let w = logistic(raw[i], mean, std);
                    sum += w;
                    w
                })
                .collect();
            (values, sum)
        });

        let mut sum = 0.0;
        let mut columns = Vec::with_capacity(parts.len());
        for (values, partial) in parts {
            sum += partial;
            columns.push(values);
        }

        Self {
            values: interleave(columns, raw.len()),
            sum,
        }
    }

    /// Build directly from weights already in (0, 1)
    pub fn from_weights(values: Vec<f64>) -> Self {
        let sum: f64 = values.iter().sum();
        Self { values, sum }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(values: Vec<f64>, sum: f64) -> Self {
        Self { values, sum }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
