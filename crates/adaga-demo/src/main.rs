//! Adaga demo binary
//!
//! Evolves a real vector toward the optimum of the Rastrigin function and
//! prints a JSON summary of the run.

mod rastrigin;
mod settings;

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adaga_engine::{Engine, EngineConfig, EngineStatistics};

use crate::rastrigin::RealVector;
use crate::settings::RunSettings;

#[derive(Serialize)]
struct Summary<'a> {
    run_id: String,
    settings: &'a RunSettings,
    config: &'a EngineConfig,
    converged: bool,
    generations: usize,
    fitness: f64,
    elite: &'a RealVector,
    statistics: EngineStatistics,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Adaga demo v{}", adaga_engine::VERSION);

    // Load configuration
    let config = EngineConfig::load()?;
    let settings = RunSettings::load()?;
    info!("Loaded configuration: {:?}", config);
    info!(
        "Run settings: population={}, dimensions={}, stagnation={}, max_generations={}",
        settings.population, settings.dimensions, settings.stagnation, settings.max_generations
    );

    let dimensions = settings.dimensions;
    let mut engine = Engine::with_config(settings.population, config.clone(), || {
        RealVector::random(dimensions)
    })?;

    let run = engine.evolve(settings.stagnation, settings.max_generations);
    info!(
        converged = run.converged,
        generations = run.generations,
        fitness = run.fitness,
        "Run complete"
    );

    let summary = Summary {
        run_id: engine.id().to_string(),
        settings: &settings,
        config: &config,
        converged: run.converged,
        generations: run.generations,
        fitness: run.fitness,
        elite: &run.elite,
        statistics: engine.statistics(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
