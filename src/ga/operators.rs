//! Mutation operators for candidate timetables.

use rand::Rng;

use crate::models::{Candidate, TimeSlot};

/// Moves one random assignment to a random teaching slot, same day.
///
/// No feasibility check: the move may create clashes, which the evaluator
/// then penalizes. Lunch breaks are eligible too. Empty candidates are left
/// unchanged.
pub fn time_slot_mutation<R: Rng + ?Sized>(candidate: &mut Candidate, rng: &mut R) {
    if candidate.assignments.is_empty() {
        return;
    }
    let index = rng.random_range(0..candidate.assignments.len());
    let time = TimeSlot::TEACHING[rng.random_range(0..TimeSlot::TEACHING.len())];
    candidate.assignments[index].time = time;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Day, Faculty, Room};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_moves_one_assignment_to_teaching_slot() {
        let f = Faculty::new("F1");
        let r = Room::new("R1");
        let mut c = Candidate::new();
        for (i, day) in Day::WEEKDAYS.into_iter().enumerate() {
            c.add_assignment(Assignment::new(format!("A{i}"), "X", &f, &r, day, TimeSlot::LUNCH));
        }
        let before = c.clone();

        let mut rng = SmallRng::seed_from_u64(42);
        time_slot_mutation(&mut c, &mut rng);

        let changed: Vec<usize> = (0..c.assignments.len())
            .filter(|&i| c.assignments[i] != before.assignments[i])
            .collect();
        assert_eq!(changed.len(), 1);
        let moved = &c.assignments[changed[0]];
        assert!(moved.time.is_teaching());
        assert_eq!(moved.day, before.assignments[changed[0]].day);
    }

    #[test]
    fn test_empty_candidate_unchanged() {
        let mut c = Candidate::new();
        time_slot_mutation(&mut c, &mut SmallRng::seed_from_u64(1));
        assert_eq!(c.assignment_count(), 0);
    }
}
