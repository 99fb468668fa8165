//! Timetabling domain models.
//!
//! Provides the data types flowing through the engine, from canonical
//! input entities to the formatted result.
//!
//! # Domain Mappings
//!
//! | Engine | Timetabling |
//! |--------|-------------|
//! | Student / Faculty / Room | Normalized upload rows |
//! | Offering | Course to be scheduled |
//! | Assignment | One placed session (or lunch break) |
//! | Candidate | One complete weekly timetable |
//! | TimetableOutput | Day → time view handed to the UI |

mod calendar;
mod constraint;
mod entity;
mod offering;
mod output;
mod schedule;

pub use calendar::{teaching_cells, Cell, Day, TimeSlot};
pub use constraint::Constraints;
pub use entity::{
    fuzzy_match, split_subjects, Faculty, Room, RoomCategory, Student, DEFAULT_MAX_HOURS,
    DEFAULT_ROOM_TYPE,
};
pub use offering::{course_code, Offering, OfferingKind, TECHNOLOGY_SUBJECTS};
pub use output::{ClassSummary, DaySchedule, ScheduleSummary, TimetableOutput};
pub use schedule::{Assignment, AssignmentKind, Candidate, Conflict, ConflictType};
