//! Fitness aggregation and selection weighting
pub mod statistics;
pub mod weighting;

pub use self::statistics::FitnessStatistics;
pub use self::weighting::SelectionWeights;
