//! Demo run settings

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Problem and stopping parameters for one demo run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Number of entities
    pub population: usize,
    /// Dimensions of the Rastrigin vector
    pub dimensions: usize,
    /// Generations without elite improvement before stopping
    pub stagnation: usize,
    /// Hard generation cap
    pub max_generations: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            population: 200,
            dimensions: 8,
            stagnation: 50,
            max_generations: 2_000,
        }
    }
}

impl RunSettings {
    /// Load settings from environment and `.env`
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("ADAGA_POPULATION") {
            if let Ok(v) = val.parse() {
                cfg.population = v;
            }
        }
        if let Ok(val) = std::env::var("ADAGA_DIMENSIONS") {
            if let Ok(v) = val.parse() {
                cfg.dimensions = v;
            }
        }
        if let Ok(val) = std::env::var("ADAGA_STAGNATION") {
            if let Ok(v) = val.parse() {
                cfg.stagnation = v;
            }
        }
        if let Ok(val) = std::env::var("ADAGA_MAX_GENERATIONS") {
            if let Ok(v) = val.parse() {
                cfg.max_generations = v;
            }
        }

        ensure!(cfg.dimensions > 0, "ADAGA_DIMENSIONS must be positive");
        Ok(cfg)
    }
}
