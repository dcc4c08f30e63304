//! Error types for the Adaga engine
//!
//! The engine is a pure in-memory numeric loop, so the taxonomy only covers
//! precondition violations detected while building an engine.

use thiserror::Error;

/// Result type alias using AdagaError
pub type Result<T> = std::result::Result<T, AdagaError>;

/// Unified error type for Adaga operations
#[derive(Debug, Error)]
pub enum AdagaError {
    // Population errors
    #[error("Population error: {0}")]
    Population(#[from] PopulationError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Population shape errors
#[derive(Debug, Error, PartialEq)]
pub enum PopulationError {
    #[error("Population too small: {size} < {minimum}")]
    TooSmall { size: usize, minimum: usize },
}

/// Engine configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Worker count must be positive")]
    NoWorkers,

    #[error("Invalid mutation parameter {name}: {value}")]
    MutationParameter { name: &'static str, value: f64 },

    #[error("Mutation floor {floor} exceeds ceiling {ceiling}")]
    MutationBounds { floor: f64, ceiling: f64 },
}
