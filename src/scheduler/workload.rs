//! Faculty workload tracking.
//!
//! One hour per placed session. The assigner keeps live counters while it
//! builds a candidate; the evaluator recounts from the candidate itself so
//! that mutations are reflected.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Candidate, Faculty, DEFAULT_MAX_HOURS};

/// Hours taught versus the weekly cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadCounter {
    pub current_hours: u32,
    pub max_hours: u32,
}

impl WorkloadCounter {
    /// Creates an empty counter with the given cap.
    pub fn new(max_hours: u32) -> Self {
        Self {
            current_hours: 0,
            max_hours,
        }
    }

    /// Whether one more hour fits under the cap.
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.current_hours < self.max_hours
    }

    /// Whether the cap is respected.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.current_hours <= self.max_hours
    }

    /// Records one taught hour.
    #[inline]
    pub fn record_hour(&mut self) {
        self.current_hours += 1;
    }
}

/// Recounts per-faculty hours from a candidate's sessions.
///
/// Every listed faculty member gets a counter, taught or not. Faculty IDs
/// that appear only in the candidate get the default cap.
pub fn tally(candidate: &Candidate, faculty: &[Faculty]) -> BTreeMap<String, WorkloadCounter> {
    let mut counters: BTreeMap<String, WorkloadCounter> = faculty
        .iter()
        .map(|f| (f.id.clone(), WorkloadCounter::new(f.max_hours)))
        .collect();

    for id in candidate.sessions().filter_map(|a| a.faculty_id.as_ref()) {
        counters
            .entry(id.clone())
            .or_insert_with(|| WorkloadCounter::new(DEFAULT_MAX_HOURS))
            .record_hour();
    }
    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Day, Room, TimeSlot};

    #[test]
    fn test_counter_capacity() {
        let mut c = WorkloadCounter::new(2);
        assert!(c.has_capacity());
        c.record_hour();
        c.record_hour();
        assert!(!c.has_capacity());
        assert!(c.is_balanced());
        c.record_hour();
        assert!(!c.is_balanced());
    }

    #[test]
    fn test_zero_cap_never_has_capacity() {
        assert!(!WorkloadCounter::new(0).has_capacity());
    }

    #[test]
    fn test_tally() {
        let f1 = Faculty::new("F1").with_max_hours(1);
        let f2 = Faculty::new("F2");
        let ghost = Faculty::new("F9");
        let room = Room::new("R1");

        let mut c = Candidate::new();
        c.add_assignment(Assignment::lunch_break(Day::Monday));
        c.add_assignment(Assignment::new("A1", "X", &f1, &room, Day::Monday, TimeSlot::NineAm));
        c.add_assignment(Assignment::new("A2", "X", &f1, &room, Day::Monday, TimeSlot::TenAm));
        c.add_assignment(Assignment::new("A3", "X", &ghost, &room, Day::Monday, TimeSlot::Noon));

        let counts = tally(&c, &[f1, f2]);
        assert_eq!(counts["F1"].current_hours, 2);
        assert!(!counts["F1"].is_balanced());
        assert_eq!(counts["F2"].current_hours, 0);
        assert_eq!(counts["F9"].max_hours, DEFAULT_MAX_HOURS);
        assert_eq!(counts["F9"].current_hours, 1);
    }
}
