//! Population search over candidate timetables.
//!
//! A small generational search: a population of assigner-built candidates
//! is ranked by fitness, the better half survives, and mutated clones of
//! the survivors refill the population. The search stops at the generation
//! cap or as soon as a conflict-free, penalty-free candidate appears.
//!
//! # Submodules
//!
//! - [`operators`]: mutation operators
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Burke, Elliman & Weare (1994), "A Genetic Algorithm Based University
//!   Timetabling System"

mod config;
pub mod operators;
mod problem;
mod runner;

pub use config::GaConfig;
pub use operators::time_slot_mutation;
pub use problem::TimetableProblem;
pub use runner::{GaProblem, GaResult, GaRunner, Scored};
