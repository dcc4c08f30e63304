//! Mutation probability driven by fitness diversity
//!
//! The controller compares the current fitness spread `std` with the spread
//! of the initial random population `std0`. A collapsing spread raises the
//! mutation probability to push the search back out; a wide spread lowers
//! it and leaves the work to selection and crossover.
//!
//! ```text
//! direct:    pm = exp(−K · std / std0)
//! smoothed:  pm ← clamp(pm · (boost · exp(−K' · std / std0) + retention), floor, ceiling)
//! ```

use adaga_common::{
    ConfigError, DIRECT_MUTATION_GAIN, SMOOTHED_MUTATION_BOOST, SMOOTHED_MUTATION_CEILING,
    SMOOTHED_MUTATION_FLOOR, SMOOTHED_MUTATION_GAIN, SMOOTHED_MUTATION_INITIAL,
    SMOOTHED_MUTATION_RETENTION,
};
use serde::{Deserialize, Serialize};

/// Control law mapping diversity to mutation probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum MutationLaw {
    /// Recomputed from scratch every generation
    Direct { gain: f64 },
    /// Persistent probability nudged each generation and clamped
    Smoothed {
        initial: f64,
        gain: f64,
        boost: f64,
        retention: f64,
        floor: f64,
        ceiling: f64,
    },
}

impl Default for MutationLaw {
    fn default() -> Self {
        Self::smoothed()
    }
}

impl MutationLaw {
    pub fn direct() -> Self {
        Self::Direct {
            gain: DIRECT_MUTATION_GAIN,
        }
    }

    pub fn smoothed() -> Self {
        Self::Smoothed {
            initial: SMOOTHED_MUTATION_INITIAL,
            gain: SMOOTHED_MUTATION_GAIN,
            boost: SMOOTHED_MUTATION_BOOST,
            retention: SMOOTHED_MUTATION_RETENTION,
            floor: SMOOTHED_MUTATION_FLOOR,
            ceiling: SMOOTHED_MUTATION_CEILING,
        }
    }

    /// Same law with a different exponent gain
    pub fn with_gain(self, gain: f64) -> Self {
        match self {
            Self::Direct { .. } => Self::Direct { gain },
            Self::Smoothed {
                initial,
                boost,
                retention,
                floor,
                ceiling,
                ..
            } => Self::Smoothed {
                initial,
                gain,
                boost,
                retention,
                floor,
                ceiling,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::MutationParameter { name, value })
            }
        }

        match *self {
            Self::Direct { gain } => positive("gain", gain),
            Self::Smoothed {
                initial,
                gain,
                boost,
                retention,
                floor,
                ceiling,
            } => {
                positive("gain", gain)?;
                positive("boost", boost)?;
                positive("retention", retention)?;
                positive("floor", floor)?;
                positive("ceiling", ceiling)?;
                if ceiling > 1.0 {
                    return Err(ConfigError::MutationParameter {
                        name: "ceiling",
                        value: ceiling,
                    });
                }
                if floor > ceiling {
                    return Err(ConfigError::MutationBounds { floor, ceiling });
                }
                if !(floor..=ceiling).contains(&initial) {
                    return Err(ConfigError::MutationParameter {
                        name: "initial",
                        value: initial,
                    });
                }
                Ok(())
            }
        }
    }
}

/// Tracks the mutation probability across generations
#[derive(Debug, Clone)]
pub struct MutationController {
    law: MutationLaw,
    baseline: f64,
    probability: f64,
}

impl MutationController {
    /// Start from the diversity of the initial population
    pub fn new(law: MutationLaw, baseline: f64) -> Self {
        let probability = match law {
            MutationLaw::Direct { gain } => direct(gain, 1.0),
            MutationLaw::Smoothed { initial, .. } => initial,
        };
        Self {
            law,
            baseline,
            probability,
        }
    }

    pub fn law(&self) -> MutationLaw {
        self.law
    }

    /// Diversity of the initial population (`std0`)
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Probability applied to the next generation
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Feed the diversity of a new generation and return the updated probability
    pub fn update(&mut self, std: f64) -> f64 {
        let ratio = std / self.baseline;
        self.probability = match self.law {
            MutationLaw::Direct { gain } => direct(gain, ratio),
            MutationLaw::Smoothed {
                gain,
                boost,
                retention,
                floor,
                ceiling,
                ..
            } => {
                let factor = boost * (-gain * ratio).exp() + retention;
                let next = self.probability * factor;
                // NaN from a pathological ratio keeps the previous value
                if next.is_nan() {
                    self.probability
                } else {
                    next.clamp(floor, ceiling)
                }
            }
        };
        self.probability
    }
}

fn direct(gain: f64, ratio: f64) -> f64 {
    let pm = (-gain * ratio).exp();
    if pm.is_nan() {
        1.0
    } else {
        pm.clamp(f64::MIN_POSITIVE, 1.0)
    }
}
