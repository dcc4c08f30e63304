//! Engine configuration

use adaga_common::{ConfigError, Result};
use serde::{Deserialize, Serialize};

use crate::controller::MutationLaw;

/// Engine configuration
///
/// Fixed for the lifetime of the engine built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Worker pool width
    pub workers: usize,
    /// Random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Mutation probability control law
    pub mutation: MutationLaw,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            seed: None,
            mutation: MutationLaw::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment and an optional `.env` file
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("ADAGA_WORKERS") {
            if let Ok(v) = val.parse() {
                cfg.workers = v;
            }
        }
        if let Ok(val) = std::env::var("ADAGA_SEED") {
            if let Ok(v) = val.parse() {
                cfg.seed = Some(v);
            }
        }

        // Mutation law
        if let Ok(val) = std::env::var("ADAGA_MUTATION_LAW") {
            match val.to_ascii_lowercase().as_str() {
                "direct" => cfg.mutation = MutationLaw::direct(),
                "smoothed" => cfg.mutation = MutationLaw::smoothed(),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("ADAGA_MUTATION_K") {
            if let Ok(v) = val.parse() {
                cfg.mutation = cfg.mutation.with_gain(v);
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mutation(mut self, mutation: MutationLaw) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers.into());
        }
        self.mutation.validate()?;
        Ok(())
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
