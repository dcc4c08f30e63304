//! Generation step and evolution driver

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use adaga_common::{PopulationError, RandomSource, Result, MIN_POPULATION};
use serde::Serialize;
use tracing::{debug, info, info_span, Span};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::controller::MutationController;
use crate::entity::Entity;
use crate::fitness::{statistics, FitnessStatistics, SelectionWeights};
use crate::pool::WorkerPool;
use crate::selection::DualRoulette;
use crate::telemetry::EngineMetrics;

/// Outcome of [`Engine::evolve`]
#[derive(Debug, Clone)]
pub struct Evolution<E> {
    /// Best entity observed
    pub elite: E,
    /// Its fitness
    pub fitness: f64,
    /// Generations run by this call
    pub generations: usize,
    /// True if the elite stagnated, false if the generation cap was hit
    pub converged: bool,
}

/// Snapshot of the engine between generations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineStatistics {
    pub generation: u64,
    pub mean: f64,
    pub std: f64,
    pub baseline_std: f64,
    pub weight_sum: f64,
    pub mutation_probability: f64,
    pub elite_fitness: f64,
}

/// Adaptive genetic algorithm engine
pub struct Engine<E: Entity> {
    id: Uuid,
    config: EngineConfig,
    pool: WorkerPool,
    random: RandomSource,
    population: Vec<E>,
    offspring: Vec<E>,
    weights: SelectionWeights,
    fitness_stats: FitnessStatistics,
    controller: MutationController,
    elite: E,
    elite_fitness: f64,
    generation: u64,
    metrics: EngineMetrics,
    span: Span,
}

impl<E: Entity> Engine<E> {
    /// Build an engine with the default configuration
    pub fn new<F>(size: usize, factory: F) -> Result<Self>
    where
        F: Fn() -> E + Sync,
    {
        Self::with_config(size, EngineConfig::default(), factory)
    }

    /// Build an engine of `size` entities produced by `factory`
    ///
    /// The initial population's fitness spread becomes the baseline for
    /// mutation control.
    pub fn with_config<F>(size: usize, config: EngineConfig, factory: F) -> Result<Self>
    where
        F: Fn() -> E + Sync,
    {
        if size < MIN_POPULATION {
            return Err(PopulationError::TooSmall {
                size,
                minimum: MIN_POPULATION,
            }
            .into());
        }
        config.validate()?;

        let id = Uuid::now_v7();
        let span = info_span!("adaga_engine", run_id = %id, population = size, workers = config.workers);
        let guard = span.enter();

        let pool = WorkerPool::new(config.workers)?;
        let random = RandomSource::new(config.seed);
        let metrics = EngineMetrics::new()?;

        let population = pool.map(size, |_| factory());
        let (raw, fitness_stats) = statistics::evaluate(&pool, &population);

        // Until something beats −∞ the first member stands in as elite
        let (elite, elite_fitness) = match fitness_stats.best {
            Some((index, fitness)) => (population[index].clone(), fitness),
            None => (population[0].clone(), f64::NEG_INFINITY),
        };

        let weights = SelectionWeights::rescale(&pool, raw, &fitness_stats);
        let controller = MutationController::new(config.mutation, fitness_stats.std);
        metrics.observe_population(&fitness_stats, elite_fitness, controller.probability());

        info!(
            elite_fitness,
            mean = fitness_stats.mean,
            baseline_std = fitness_stats.std,
            mutation_probability = controller.probability(),
            "Engine initialized"
        );

        drop(guard);
        Ok(Self {
            id,
            config,
            pool,
            random,
            offspring: Vec::with_capacity(size),
            population,
            weights,
            fitness_stats,
            controller,
            elite,
            elite_fitness,
            generation: 0,
            metrics,
            span,
        })
    }

    /// Run id recorded on this engine's tracing span
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.pool.width()
    }

    /// Best entity seen so far
    pub fn elite(&self) -> &E {
        &self.elite
    }

    /// Fitness of the elite
    pub fn fitness(&self) -> f64 {
        self.elite_fitness
    }

    /// Generations produced since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> &[E] {
        &self.population
    }

    pub fn weights(&self) -> &SelectionWeights {
        &self.weights
    }

    /// Probability applied to the next generation
    pub fn mutation_probability(&self) -> f64 {
        self.controller.probability()
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    pub fn statistics(&self) -> EngineStatistics {
        EngineStatistics {
            generation: self.generation,
            mean: self.fitness_stats.mean,
            std: self.fitness_stats.std,
            baseline_std: self.controller.baseline(),
            weight_sum: self.weights.sum(),
            mutation_probability: self.controller.probability(),
            elite_fitness: self.elite_fitness,
        }
    }

    /// Produce the next generation and return the elite and its fitness
    ///
    /// Every offspring is bred from the current generation only; the new
    /// population replaces it in one swap. A panic inside an entity
    /// operation propagates to the caller.
    pub fn next(&mut self) -> (&E, f64) {
        let span = self.span.clone();
        let _guard = span.enter();
        let started = Instant::now();

        let probability = self.controller.probability();
        let fallbacks = AtomicU64::new(0);
        {
            let population = &self.population;
            let weights = &self.weights;
            let random = &self.random;
            let fallbacks = &fallbacks;

            self.pool.map_into(&mut self.offspring, population.len(), |_| {
                let pair = DualRoulette::draw(weights, random);
                if pair.fallback {
                    fallbacks.fetch_add(1, Ordering::Relaxed);
                }
                let child = population[pair.x].crossover_weighted(&population[pair.y], pair.blend);
                if random.chance(probability) {
                    child.mutate()
                } else {
                    child
                }
            });
        }

        std::mem::swap(&mut self.population, &mut self.offspring);
        // Release the previous generation, keep the buffer
        self.offspring.clear();

        self.refresh();
        self.controller.update(self.fitness_stats.std);
        self.generation += 1;

        self.metrics.observe_population(
            &self.fitness_stats,
            self.elite_fitness,
            self.controller.probability(),
        );
        self.metrics.observe_generation(
            started.elapsed().as_secs_f64(),
            fallbacks.load(Ordering::Relaxed),
        );

        debug!(
            generation = self.generation,
            elite_fitness = self.elite_fitness,
            mean = self.fitness_stats.mean,
            std = self.fitness_stats.std,
            mutation_probability = self.controller.probability(),
            "Generation complete"
        );

        (&self.elite, self.elite_fitness)
    }

    /// Evolve until the elite has not improved for `stagnation_limit`
    /// generations, or `max_generations` have run
    ///
    /// The generation cap is checked first, so a limit that is never below
    /// the cap always ends unconverged after exactly `max_generations`.
    pub fn evolve(&mut self, stagnation_limit: usize, max_generations: usize) -> Evolution<E> {
        let span = self.span.clone();
        let _guard = span.enter();

        let mut best = self.elite_fitness;
        let mut stagnant = 0;
        let mut generations = 0;

        let converged = loop {
            if generations >= max_generations {
                break false;
            }
            if stagnant >= stagnation_limit {
                break true;
            }

            let (_, fitness) = self.next();
            generations += 1;
            if fitness > best {
                best = fitness;
                stagnant = 0;
            } else {
                stagnant += 1;
            }
        };

        info!(
            generations,
            converged,
            elite_fitness = self.elite_fitness,
            "Evolution finished"
        );

        Evolution {
            elite: self.elite.clone(),
            fitness: self.elite_fitness,
            generations,
            converged,
        }
    }

    /// Re-evaluate the live population, update the elite and the weights
    fn refresh(&mut self) {
        let (raw, stats) = statistics::evaluate(&self.pool, &self.population);
        if let Some((index, fitness)) = stats.best {
            if fitness > self.elite_fitness {
                self.elite = self.population[index].clone();
                self.elite_fitness = fitness;
            }
        }
        self.weights = SelectionWeights::rescale(&self.pool, raw, &stats);
        self.fitness_stats = stats;
    }
}

impl<E: Entity + std::fmt::Debug> std::fmt::Debug for Engine<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("population", &self.population.len())
            .field("elite", &self.elite)
            .field("elite_fitness", &self.elite_fitness)
            .finish_non_exhaustive()
    }
}
