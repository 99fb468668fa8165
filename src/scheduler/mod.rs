//! Candidate construction and scoring.
//!
//! [`SlotAssigner`] builds one candidate timetable from the derived offerings
//! under room, faculty-availability and workload rules; [`FitnessEvaluator`]
//! scores any candidate, including mutated ones the assigner never produced.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod assigner;
mod fitness;
pub mod workload;

pub use assigner::{Phase, SlotAssigner, DEFAULT_FILLER_RATIO, STUDY_ACTIVITIES, STUDY_GROUP_SIZE};
pub use fitness::{Evaluation, FitnessEvaluator, PenaltyWeights};
pub use workload::{tally, WorkloadCounter};
