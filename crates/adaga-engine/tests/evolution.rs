//! End-to-end behaviour of the evolution engine

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use adaga_engine::{AdagaError, Engine, EngineConfig, Entity, MutationLaw};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator shared by a factory and every entity it produces
type SharedRng = Arc<Mutex<StdRng>>;

fn shared_rng(seed: u64) -> SharedRng {
    Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))
}

/// Fixed score; crossover keeps the fitter parent, mutation is identity
#[derive(Debug, Clone, PartialEq)]
struct Ladder(f64);

impl Entity for Ladder {
    fn fitness(&self) -> f64 {
        self.0
    }
    fn mutate(&self) -> Self {
        self.clone()
    }
    fn crossover(&self, other: &Self) -> Self {
        if other.0 > self.0 {
            other.clone()
        } else {
            self.clone()
        }
    }
}

/// Point on the real line, scored by closeness to 7
#[derive(Debug, Clone)]
struct Point {
    x: f64,
    rng: SharedRng,
}

impl Point {
    fn at(&self, x: f64) -> Self {
        Point {
            x,
            rng: Arc::clone(&self.rng),
        }
    }
}

impl Entity for Point {
    fn fitness(&self) -> f64 {
        -(self.x - 7.0).powi(2)
    }
    fn mutate(&self) -> Self {
        let step = self.rng.lock().gen_range(-1.0..1.0);
        self.at(self.x + step)
    }
    fn crossover(&self, other: &Self) -> Self {
        self.at((self.x + other.x) / 2.0)
    }
    fn crossover_weighted(&self, other: &Self, weight: f64) -> Self {
        self.at(weight * self.x + (1.0 - weight) * other.x)
    }
}

/// Records how many crossovers separate it from the initial population
#[derive(Debug, Clone)]
struct Tagged {
    lineage: u64,
    value: f64,
}

impl Entity for Tagged {
    fn fitness(&self) -> f64 {
        self.value
    }
    fn mutate(&self) -> Self {
        Tagged {
            lineage: self.lineage,
            value: self.value + 1.0,
        }
    }
    fn crossover(&self, other: &Self) -> Self {
        Tagged {
            lineage: self.lineage.max(other.lineage) + 1,
            value: (self.value + other.value) / 2.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Faulty(f64);

impl Entity for Faulty {
    fn fitness(&self) -> f64 {
        self.0
    }
    fn mutate(&self) -> Self {
        self.clone()
    }
    fn crossover(&self, _other: &Self) -> Self {
        panic!("crossover failed")
    }
}

fn ladder_factory(values: &'static [f64]) -> impl Fn() -> Ladder + Sync {
    let next = AtomicUsize::new(0);
    move || Ladder(values[next.fetch_add(1, Ordering::SeqCst) % values.len()])
}

fn random_points(seed: u64) -> impl Fn() -> Point + Sync {
    let rng = shared_rng(seed);
    move || Point {
        x: rng.lock().gen_range(-50.0..50.0),
        rng: Arc::clone(&rng),
    }
}

fn config(workers: usize) -> EngineConfig {
    EngineConfig::default().with_workers(workers).with_seed(2024)
}

#[test]
fn test_rejects_single_member_population() {
    let err = Engine::with_config(1, config(1), random_points(7)).unwrap_err();
    assert!(matches!(err, AdagaError::Population(_)));

    let err = Engine::with_config(0, config(1), random_points(7)).unwrap_err();
    assert!(matches!(err, AdagaError::Population(_)));
}

#[test]
fn test_rejects_invalid_configuration() {
    let err = Engine::with_config(8, config(0), random_points(7)).unwrap_err();
    assert!(matches!(err, AdagaError::Config(_)));

    let bad = config(2).with_mutation(MutationLaw::Direct { gain: -1.0 });
    let err = Engine::with_config(8, bad, random_points(7)).unwrap_err();
    assert!(matches!(err, AdagaError::Config(_)));
}

#[test]
fn test_elite_never_regresses() {
    for workers in [1, 4] {
        let mut engine = Engine::with_config(40, config(workers), random_points(7)).unwrap();
        let mut previous = engine.fitness();
        for _ in 0..60 {
            let (_, fitness) = engine.next();
            assert!(fitness >= previous);
            previous = fitness;
        }
    }
}

#[test]
fn test_weights_stay_in_open_unit_interval() {
    let mut engine = Engine::with_config(32, config(3), random_points(7)).unwrap();
    for _ in 0..20 {
        engine.next();
        let weights = engine.weights();
        assert!(weights.values().iter().all(|&w| w > 0.0 && w < 1.0));
        assert!(weights.sum() > 0.0);
    }
}

#[test]
fn test_mutation_probability_bounds_for_both_laws() {
    for law in [MutationLaw::direct(), MutationLaw::smoothed()] {
        let cfg = config(2).with_mutation(law);
        let mut engine = Engine::with_config(24, cfg, random_points(7)).unwrap();
        for _ in 0..50 {
            engine.next();
            let pm = engine.mutation_probability();
            assert!(pm > 0.0 && pm <= 1.0, "pm {} out of bounds", pm);
        }
    }
}

#[test]
fn test_cap_wins_when_limit_not_below_it() {
    for (limit, cap) in [(5, 5), (10, 4)] {
        let mut engine = Engine::with_config(6, config(2), || Ladder(1.0)).unwrap();
        let run = engine.evolve(limit, cap);
        assert!(!run.converged);
        assert_eq!(run.generations, cap);
        assert_eq!(engine.generation(), cap as u64);
    }
}

#[test]
fn test_flat_population_converges_at_limit() {
    let mut engine = Engine::with_config(8, config(2), || Ladder(3.0)).unwrap();
    let run = engine.evolve(4, 100);
    assert!(run.converged);
    assert_eq!(run.generations, 4);
    assert_eq!(run.fitness, 3.0);
    assert_eq!(engine.statistics().std, 1.0);
}

#[test]
fn test_ladder_scenario() {
    let mut engine = Engine::with_config(4, config(2), ladder_factory(&[1.0, 2.0, 3.0, 4.0])).unwrap();

    let (elite, fitness) = engine.next();
    assert_eq!(elite, &Ladder(4.0));
    assert_eq!(fitness, 4.0);

    let run = engine.evolve(2, 100);
    assert!(run.converged);
    assert!(run.generations < 100);
    assert_eq!(run.fitness, 4.0);
    assert_eq!(run.elite, Ladder(4.0));
}

#[test]
fn test_tied_negative_pair_scenario() {
    let mut engine = Engine::with_config(2, config(1), || Ladder(-5.0)).unwrap();
    assert_eq!(engine.fitness(), -5.0);
    assert!(engine.weights().sum() > 0.0);

    let run = engine.evolve(3, 10);
    assert_eq!(run.fitness, -5.0);
    assert!(engine.weights().sum() > 0.0);
}

#[test]
fn test_offspring_bred_from_previous_generation_only() {
    for workers in [1, 2, 5] {
        let rng = shared_rng(11);
        let mut engine = Engine::with_config(30, config(workers), || Tagged {
            lineage: 0,
            value: rng.lock().gen_range(0.0..10.0),
        })
        .unwrap();

        for generation in 1..=6 {
            engine.next();
            assert!(engine
                .population()
                .iter()
                .all(|entity| entity.lineage == generation));
        }
    }
}

#[test]
fn test_converges_toward_optimum() {
    // One worker keeps the draw order, so the run is fully determined by the seeds
    let mut engine = Engine::with_config(64, config(1), random_points(7)).unwrap();
    let start = engine.fitness();
    let run = engine.evolve(25, 500);
    assert!(run.fitness >= start);
    assert!(run.fitness > -1.0, "elite fitness {} too far from optimum", run.fitness);
}

#[test]
fn test_single_worker_runs_repeat_under_fixed_seeds() {
    let run = || {
        let mut engine = Engine::with_config(32, config(1), random_points(3)).unwrap();
        let run = engine.evolve(10, 120);
        (run.fitness, run.generations, run.elite.x)
    };
    assert_eq!(run(), run());
}

#[test]
#[should_panic(expected = "crossover failed")]
fn test_entity_failure_propagates() {
    let mut engine = Engine::with_config(4, config(2), || Faulty(1.0)).unwrap();
    engine.next();
}
