//! Result artifact handed to the presentation layer.
//!
//! The best candidate is reshaped into a day → time → class list view,
//! together with its conflicts and a summary score. This is the only thing
//! the surrounding product persists and exports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Assignment, Candidate, Conflict, Day, TimeSlot};

/// Per-day view: start slot → sessions starting then.
pub type DaySchedule = BTreeMap<TimeSlot, Vec<ClassSummary>>;

/// One session as shown in a timetable cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub course_code: String,
    pub course_name: String,
    /// Faculty display name.
    pub faculty: Option<String>,
    /// Room display name.
    pub room: Option<String>,
    /// Attending student count.
    pub students: usize,
}

impl From<&Assignment> for ClassSummary {
    fn from(a: &Assignment) -> Self {
        Self {
            course_code: a.course_code.clone(),
            course_name: a.course_name.clone(),
            faculty: a.faculty_name.clone(),
            room: a.room_name.clone(),
            students: a.student_count(),
        }
    }
}

/// Headline numbers for a generated timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Assignments in the timetable, breaks included.
    pub total_slots: usize,
    /// Detected hard-constraint conflicts.
    pub conflict_count: usize,
    /// 0–100 quality score.
    pub optimization_score: u32,
}

impl ScheduleSummary {
    /// Builds the summary from slot and conflict counts.
    ///
    /// The score is 100 with no conflicts and loses 10 points per conflict,
    /// bottoming out at 0.
    pub fn new(total_slots: usize, conflict_count: usize) -> Self {
        let optimization_score = if conflict_count == 0 {
            100
        } else {
            100u32.saturating_sub(conflict_count.saturating_mul(10).min(100) as u32)
        };
        Self {
            total_slots,
            conflict_count,
            optimization_score,
        }
    }
}

/// The generated timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableOutput {
    /// Day → time → sessions. All seven days are present.
    pub schedule: BTreeMap<Day, DaySchedule>,
    /// Conflicts of the returned timetable.
    pub conflicts: Vec<Conflict>,
    pub summary: ScheduleSummary,
}

impl TimetableOutput {
    /// Formats a candidate and its conflicts.
    pub fn from_candidate(candidate: &Candidate, conflicts: Vec<Conflict>) -> Self {
        let mut schedule: BTreeMap<Day, DaySchedule> =
            Day::ALL.into_iter().map(|d| (d, DaySchedule::new())).collect();

        for a in &candidate.assignments {
            schedule
                .entry(a.day)
                .or_default()
                .entry(a.time)
                .or_default()
                .push(ClassSummary::from(a));
        }

        let summary = ScheduleSummary::new(candidate.assignment_count(), conflicts.len());
        Self {
            schedule,
            conflicts,
            summary,
        }
    }

    /// Sessions in the given cell.
    pub fn cell(&self, day: Day, time: TimeSlot) -> &[ClassSummary] {
        self.schedule
            .get(&day)
            .and_then(|d| d.get(&time))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
