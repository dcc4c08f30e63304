//! Prometheus metrics for a running engine
//!
//! Each engine owns a private registry, so several engines can live in one
//! process without name clashes.

use adaga_common::{AdagaError, Result};
use prometheus::{Encoder, Registry, TextEncoder};

use crate::fitness::FitnessStatistics;

/// Per-engine metrics
pub struct EngineMetrics {
    registry: Registry,
    pub generations_total: prometheus::IntCounter,
    pub selection_fallbacks_total: prometheus::IntCounter,
    pub elite_fitness: prometheus::Gauge,
    pub mean_fitness: prometheus::Gauge,
    pub fitness_std: prometheus::Gauge,
    pub mutation_probability: prometheus::Gauge,
    pub generation_duration_seconds: prometheus::Histogram,
}

impl EngineMetrics {
    pub fn new() -> Result<Self> {
        let metrics = Self {
            registry: Registry::new(),
            generations_total: prometheus::IntCounter::new(
                "adaga_generations_total",
                "Generations produced",
            )
            .map_err(metric_error)?,
            selection_fallbacks_total: prometheus::IntCounter::new(
                "adaga_selection_fallbacks_total",
                "Parent pairs that fell back to first/last members",
            )
            .map_err(metric_error)?,
            elite_fitness: prometheus::Gauge::new("adaga_elite_fitness", "Fitness of the elite")
                .map_err(metric_error)?,
            mean_fitness: prometheus::Gauge::new(
                "adaga_mean_fitness",
                "Mean fitness of the current population",
            )
            .map_err(metric_error)?,
            fitness_std: prometheus::Gauge::new(
                "adaga_fitness_std",
                "Standard deviation of the current population's fitness",
            )
            .map_err(metric_error)?,
            mutation_probability: prometheus::Gauge::new(
                "adaga_mutation_probability",
                "Mutation probability for the next generation",
            )
            .map_err(metric_error)?,
            generation_duration_seconds: prometheus::Histogram::with_opts(
                prometheus::HistogramOpts::new(
                    "adaga_generation_duration_seconds",
                    "Wall time of one generation step",
                )
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            )
            .map_err(metric_error)?,
        };
        metrics.register()?;
        Ok(metrics)
    }

    fn register(&self) -> Result<()> {
        let registry = &self.registry;
        registry
            .register(Box::new(self.generations_total.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(self.selection_fallbacks_total.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(self.elite_fitness.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(self.mean_fitness.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(self.fitness_std.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(self.mutation_probability.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(self.generation_duration_seconds.clone()))
            .map_err(metric_error)?;
        Ok(())
    }

    /// Record the state of a freshly evaluated population
    pub fn observe_population(&self, stats: &FitnessStatistics, elite: f64, probability: f64) {
        self.elite_fitness.set(elite);
        self.mean_fitness.set(stats.mean);
        self.fitness_std.set(stats.std);
        self.mutation_probability.set(probability);
    }

    /// Record one completed generation step
    pub fn observe_generation(&self, seconds: f64, fallbacks: u64) {
        self.generations_total.inc();
        self.selection_fallbacks_total.inc_by(fallbacks);
        self.generation_duration_seconds.observe(seconds);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn gather_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metric_error)?;
        String::from_utf8(buffer).map_err(|e| AdagaError::Internal(e.to_string()))
    }
}

impl std::fmt::Debug for EngineMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineMetrics")
            .field("generations_total", &self.generations_total.get())
            .field("elite_fitness", &self.elite_fitness.get())
            .finish_non_exhaustive()
    }
}

fn metric_error(err: prometheus::Error) -> AdagaError {
    AdagaError::Internal(format!("metrics: {}", err))
}
