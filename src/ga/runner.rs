//! Generic population search loop.
//!
//! # Algorithm
//!
//! 1. Create `P` individuals.
//! 2. Each generation: evaluate all, rank by fitness (stable, descending),
//!    replace the best-ever on strict improvement. Stop once the best-ever
//!    reaches the problem's target fitness.
//! 3. Keep the top `max(1, P/2)`; refill by cloning a random survivor and
//!    mutating the clone.
//!
//! There is no crossover: offspring differ from their parent by mutation
//! only.

use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::cmp::Reverse;
use tracing::debug;

use super::GaConfig;
use crate::error::EngineError;

/// Anything carrying a fitness score. Higher is better.
pub trait Scored {
    fn fitness(&self) -> i64;
}

/// A problem the population search can optimize.
///
/// Evaluation must be pure: the runner may evaluate individuals from
/// several threads at once.
pub trait GaProblem: Sync {
    type Individual: Clone + Send + Sync;
    type Evaluation: Scored + Clone + Send;

    /// Creates a fresh random individual.
    fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual.
    fn evaluate(&self, individual: &Self::Individual) -> Self::Evaluation;

    /// Mutates an individual in place.
    fn mutate<R: Rng + ?Sized>(&self, individual: &mut Self::Individual, rng: &mut R);

    /// Fitness at which the search stops early.
    fn target_fitness(&self) -> Option<i64> {
        None
    }
}

/// Outcome of a search.
#[derive(Debug, Clone)]
pub struct GaResult<I, E> {
    /// Best individual seen in any generation.
    pub best: I,
    /// Its evaluation.
    pub evaluation: E,
    /// Generations evaluated.
    pub generations: usize,
    /// Best-ever fitness after each generation.
    pub history: Vec<i64>,
}

impl<I, E: Scored> GaResult<I, E> {
    pub fn best_fitness(&self) -> i64 {
        self.evaluation.fitness()
    }
}

/// Runs the population search.
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed`, or from the OS.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual, P::Evaluation>, EngineError> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    pub fn run_with_rng<P: GaProblem, R: Rng + ?Sized>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual, P::Evaluation>, EngineError> {
        config.validate()?;
        let size = config.population_size;
        let target = problem.target_fitness();

        let mut population: Vec<P::Individual> =
            (0..size).map(|_| problem.create_individual(rng)).collect();
        let mut best: Option<(P::Individual, P::Evaluation)> = None;
        let mut history = Vec::with_capacity(config.max_generations);
        let mut generations = 0;

        for generation in 0..config.max_generations {
            generations = generation + 1;

            let evaluations = evaluate_all(problem, &population, config.parallel);
            let mut ranked: Vec<(P::Individual, P::Evaluation)> =
                population.into_iter().zip(evaluations).collect();
            ranked.sort_by_key(|(_, e)| Reverse(e.fitness()));

            let (leader, leader_eval) = &ranked[0];
            let improved = match &best {
                Some((_, e)) => leader_eval.fitness() > e.fitness(),
                None => true,
            };
            if improved {
                debug!(generation, fitness = leader_eval.fitness(), "new best");
                best = Some((leader.clone(), leader_eval.clone()));
            }

            let best_fitness = best.as_ref().map_or(i64::MIN, |(_, e)| e.fitness());
            history.push(best_fitness);
            if target.is_some_and(|t| best_fitness >= t) {
                debug!(generation, best_fitness, "target fitness reached");
                break;
            }

            ranked.truncate(config.survivors());
            let parents: Vec<P::Individual> = ranked.into_iter().map(|(i, _)| i).collect();
            population = parents.clone();
            while population.len() < size {
                let Some(parent) = parents.choose(rng) else {
                    break;
                };
                let mut child = parent.clone();
                problem.mutate(&mut child, rng);
                population.push(child);
            }
        }

        let (best, evaluation) = best.ok_or_else(|| {
            EngineError::InvalidConfig("search produced no individuals".into())
        })?;
        Ok(GaResult {
            best,
            evaluation,
            generations,
            history,
        })
    }
}

fn evaluate_all<P: GaProblem>(
    problem: &P,
    population: &[P::Individual],
    parallel: bool,
) -> Vec<P::Evaluation> {
    if parallel {
        population.par_iter().map(|i| problem.evaluate(i)).collect()
    } else {
        population.iter().map(|i| problem.evaluate(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Maximize the sum of a small vector; mutation bumps one entry.
    struct Counting {
        target: Option<i64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Score(i64);

    impl Scored for Score {
        fn fitness(&self) -> i64 {
            self.0
        }
    }

    impl GaProblem for Counting {
        type Individual = Vec<i64>;
        type Evaluation = Score;

        fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<i64> {
            (0..4).map(|_| rng.random_range(0..3)).collect()
        }

        fn evaluate(&self, individual: &Vec<i64>) -> Score {
            Score(individual.iter().sum())
        }

        fn mutate<R: Rng + ?Sized>(&self, individual: &mut Vec<i64>, rng: &mut R) {
            let i = rng.random_range(0..individual.len());
            individual[i] += 1;
        }

        fn target_fitness(&self) -> Option<i64> {
            self.target
        }
    }

    #[test]
    fn test_runs_all_generations_without_target() {
        let problem = Counting { target: None };
        let config = GaConfig::quick().with_seed(42);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.generations, 20);
        assert_eq!(result.history.len(), 20);
        assert_eq!(result.best_fitness(), problem.evaluate(&result.best).0);
    }

    #[test]
    fn test_early_exit_on_target() {
        let problem = Counting { target: Some(0) };
        let config = GaConfig::quick().with_seed(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_best_never_regresses() {
        let problem = Counting { target: None };
        let config = GaConfig::quick().with_seed(3);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert!(result.history.windows(2).all(|w| w[0] <= w[1]));
        assert!(result.best_fitness() > *result.history.first().unwrap());
    }

    #[test]
    fn test_single_individual_population() {
        let problem = Counting { target: None };
        let config = GaConfig::quick().with_population_size(1).with_seed(5);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.generations, 20);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let problem = Counting { target: None };
        let config = GaConfig::quick().with_seed(9);
        let a = GaRunner::run(&problem, &config).unwrap();
        let b = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = Counting { target: None };
        let config = GaConfig::thorough().with_max_generations(10).with_seed(11);
        let seq = GaRunner::run(&problem, &config).unwrap();
        let par = GaRunner::run(&problem, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.history, par.history);
    }

    #[test]
    fn test_rejects_empty_config() {
        let problem = Counting { target: None };
        let config = GaConfig::quick().with_population_size(0);
        assert!(matches!(
            GaRunner::run(&problem, &config),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
