//! Timetable search problem.
//!
//! Bridges the slot assigner and the fitness evaluator to the generic
//! runner: individuals are whole candidates, built by the assigner and
//! perturbed by [`time_slot_mutation`].

use rand::Rng;

use super::operators::time_slot_mutation;
use super::runner::{GaProblem, Scored};
use crate::models::Candidate;
use crate::scheduler::{Evaluation, FitnessEvaluator, SlotAssigner};

impl Scored for Evaluation {
    fn fitness(&self) -> i64 {
        self.fitness
    }
}

/// Population search over candidate timetables.
///
/// # Example
/// ```no_run
/// use timetable_engine::ga::{GaConfig, GaRunner, TimetableProblem};
/// use timetable_engine::scheduler::{FitnessEvaluator, SlotAssigner};
/// # use timetable_engine::models::Constraints;
/// # use timetable_engine::normalize::NormalizedInput;
/// # let input = NormalizedInput::default();
/// # let constraints = Constraints::default();
///
/// let offerings = timetable_engine::courses::derive_offerings(&input);
/// let problem = TimetableProblem::new(
///     SlotAssigner::new(&input, &offerings),
///     FitnessEvaluator::new(&input.faculty, &input.rooms, &constraints),
/// );
/// let result = GaRunner::run(&problem, &GaConfig::quick().with_seed(42)).unwrap();
/// println!("best fitness: {}", result.best_fitness());
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem<'a> {
    assigner: SlotAssigner<'a>,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> TimetableProblem<'a> {
    pub fn new(assigner: SlotAssigner<'a>, evaluator: FitnessEvaluator<'a>) -> Self {
        Self {
            assigner,
            evaluator,
        }
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Individual = Candidate;
    type Evaluation = Evaluation;

    fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Candidate {
        self.assigner.assign(rng)
    }

    fn evaluate(&self, individual: &Candidate) -> Evaluation {
        self.evaluator.evaluate(individual)
    }

    fn mutate<R: Rng + ?Sized>(&self, individual: &mut Candidate, rng: &mut R) {
        time_slot_mutation(individual, rng);
    }

    fn target_fitness(&self) -> Option<i64> {
        Some(self.evaluator.target_fitness())
    }
}
