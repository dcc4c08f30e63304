//! # Adaga Engine
//!
//! Adaptive genetic algorithm engine. Entities supply fitness, mutation and
//! crossover; the engine runs selection, breeding and mutation control.
//!
//! ## Selection Weight
//!
//! ```text
//! w = 1 / (1 + exp((μ − f) / σ))
//! ```
//!
//! Where:
//! - f: raw fitness of an entity (any sign)
//! - μ: population mean fitness
//! - σ: population standard deviation (1 when the population is flat)
//!
//! ## Mutation Control
//!
//! The mutation probability rises as σ shrinks relative to the spread of
//! the initial population, and falls while the population stays diverse.
//!
//! ## Example
//!
//! ```
//! use adaga_engine::{Engine, EngineConfig, Entity};
//!
//! #[derive(Clone)]
//! struct Guess(f64);
//!
//! impl Entity for Guess {
//!     fn fitness(&self) -> f64 {
//!         -(self.0 - 3.0).abs()
//!     }
//!     fn mutate(&self) -> Self {
//!         Guess(self.0 + 0.5)
//!     }
//!     fn crossover(&self, other: &Self) -> Self {
//!         Guess((self.0 + other.0) / 2.0)
//!     }
//! }
//!
//! let config = EngineConfig::default().with_workers(2).with_seed(1);
//! let mut engine = Engine::with_config(16, config, || Guess(0.0)).unwrap();
//! let run = engine.evolve(10, 200);
//! assert!(run.fitness <= 0.0);
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod entity;
pub mod fitness;
pub mod pool;
pub mod selection;
pub mod telemetry;

pub use adaga_common::{AdagaError, Result};
pub use config::EngineConfig;
pub use controller::{MutationController, MutationLaw};
pub use engine::{Engine, EngineStatistics, Evolution};
pub use entity::Entity;
pub use fitness::{FitnessStatistics, SelectionWeights};
pub use pool::WorkerPool;
pub use selection::{DualRoulette, ParentPair};
pub use telemetry::EngineMetrics;

/// Adaga engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
