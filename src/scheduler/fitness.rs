//! Candidate scoring.
//!
//! Fitness starts from a baseline and loses points per violation:
//!
//! | Violation | Penalty | Recorded |
//! |-----------|---------|----------|
//! | Student / faculty / room clash | 100 | yes |
//! | Session taught by an overloaded faculty member | 50 | no |
//! | Session over room capacity (if enabled) | 25 | no |
//!
//! Clashes are detected per grid cell: each session is compared with the
//! earlier sessions in the same (day, time). Each clash type fires at most
//! once per session, and the record carries the later session. There is no
//! floor, so fitness may go negative.
//!
//! Evaluation is pure: it reads the candidate and borrowed entity data only.

use std::collections::{BTreeMap, HashMap};

use super::workload::{tally, WorkloadCounter};
use crate::models::{Assignment, Candidate, Cell, Conflict, Constraints, Faculty, Room};

/// Penalty weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyWeights {
    /// Fitness of a violation-free candidate.
    pub baseline: i64,
    /// Per recorded clash.
    pub clash: i64,
    /// Per session of an overloaded faculty member.
    pub overload: i64,
    /// Per session over room capacity.
    pub capacity: i64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            baseline: 1000,
            clash: 100,
            overload: 50,
            capacity: 25,
        }
    }
}

/// Score and conflicts of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub fitness: i64,
    pub conflicts: Vec<Conflict>,
}

impl Evaluation {
    /// Whether no clash was detected.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Scores candidates against the entity data and constraints of a run.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    faculty: &'a [Faculty],
    rooms: &'a [Room],
    constraints: &'a Constraints,
    weights: PenaltyWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with default weights.
    pub fn new(faculty: &'a [Faculty], rooms: &'a [Room], constraints: &'a Constraints) -> Self {
        Self {
            faculty,
            rooms,
            constraints,
            weights: PenaltyWeights::default(),
        }
    }

    /// Replaces the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The penalty weights in use.
    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Fitness of a violation-free candidate.
    pub fn target_fitness(&self) -> i64 {
        self.weights.baseline
    }

    /// Scores a candidate.
    pub fn evaluate(&self, candidate: &Candidate) -> Evaluation {
        let conflicts = detect_clashes(candidate);
        let mut fitness = self.weights.baseline - self.weights.clash * conflicts.len() as i64;

        let workload = self.workload(candidate);
        let overloaded = candidate
            .sessions()
            .filter_map(|a| a.faculty_id.as_ref())
            .filter(|id| workload.get(*id).is_some_and(|w| !w.is_balanced()))
            .count();
        fitness -= self.weights.overload * overloaded as i64;

        if self.constraints.ensure_room_capacity {
            let overfull = self.overfull_sessions(candidate);
            fitness -= self.weights.capacity * overfull as i64;
        }

        Evaluation { fitness, conflicts }
    }

    /// Per-faculty hours recomputed from the candidate.
    pub fn workload(&self, candidate: &Candidate) -> BTreeMap<String, WorkloadCounter> {
        tally(candidate, self.faculty)
    }

    fn overfull_sessions(&self, candidate: &Candidate) -> usize {
        let rooms: HashMap<&str, &Room> = self.rooms.iter().map(|r| (r.id.as_str(), r)).collect();
        candidate
            .sessions()
            .filter(|a| {
                a.room_id
                    .as_deref()
                    .and_then(|id| rooms.get(id))
                    .is_some_and(|room| room.overflows(a.student_count()))
            })
            .count()
    }
}

/// Clash records for every session that collides with an earlier one.
fn detect_clashes(candidate: &Candidate) -> Vec<Conflict> {
    let mut by_cell: HashMap<Cell, Vec<&Assignment>> = HashMap::new();
    let mut conflicts = Vec::new();

    for current in candidate.sessions() {
        let earlier = by_cell.entry((current.day, current.time)).or_default();

        let mut student = false;
        let mut faculty = false;
        let mut room = false;
        for other in earlier.iter() {
            let same_room = current.room_id == other.room_id;
            if same_room {
                room = true;
            } else {
                student |= current.shares_student(other);
                faculty |= current.faculty_id.is_some() && current.faculty_id == other.faculty_id;
            }
        }

        if student {
            conflicts.push(Conflict::student_clash(current));
        }
        if faculty {
            conflicts.push(Conflict::faculty_clash(current));
        }
        if room {
            conflicts.push(Conflict::room_clash(current));
        }
        earlier.push(current);
    }
    conflicts
}
