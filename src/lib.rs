//! Weekly academic timetable generation.
//!
//! Takes loosely structured student, faculty and room records, derives the
//! courses to run, and searches for a weekly Monday–Friday grid in which no
//! student, teacher or room is double-booked.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Faculty`, `Room`, `Offering`,
//!   `Assignment`, `Candidate`, `Constraints`, `TimetableOutput`
//! - **`normalize`**: Raw record → canonical entity mapping
//! - **`courses`**: Offering derivation and prioritization
//! - **`scheduler`**: Slot assignment and fitness evaluation
//! - **`ga`**: Population search over candidate timetables
//! - **`engine`**: One-call facade and request type
//!
//! # Pipeline
//!
//! ```text
//! normalize → courses → SlotAssigner (per candidate) → FitnessEvaluator
//!           → GaRunner → best candidate → TimetableOutput
//! ```
//!
//! All randomness goes through an injected [`rand::Rng`]; a fixed seed makes
//! a run reproducible.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

pub mod courses;
pub mod engine;
pub mod error;
pub mod ga;
pub mod models;
pub mod normalize;
pub mod scheduler;

pub use engine::{generate_timetable, TimetableEngine, TimetableRequest};
pub use error::EngineError;
pub use ga::GaConfig;
pub use models::TimetableOutput;
