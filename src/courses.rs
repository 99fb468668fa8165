//! Course derivation.
//!
//! Turns the normalized entity collections into the prioritized list of
//! [`Offering`]s the assigner places.
//!
//! # Algorithm
//!
//! 1. Group students by elective (first-seen order). An elective becomes an
//!    offering only if some faculty member's subjects fuzzy-match it.
//! 2. Collect the distinct faculty subjects, minus the `General`/`All`
//!    sentinels. Each becomes a core offering (if it names a core discipline)
//!    or a plain subject offering, attended by a prefix of the student body.
//! 3. Stable-sort by priority: electives, then core, then subjects.
//!
//! Nothing is derived unless students, faculty and rooms are all present.

use itertools::Itertools;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Faculty, Offering, OfferingKind};
use crate::normalize::NormalizedInput;

/// Keywords marking a faculty subject as core curriculum.
pub const CORE_SUBJECTS: [&str; 7] = [
    "mathematics",
    "math",
    "english",
    "science",
    "physics",
    "chemistry",
    "biology",
];

/// Faculty subject entries that mean "anything" and never become offerings.
pub const SENTINEL_SUBJECTS: [&str; 2] = ["General", "All"];

/// Students attending a core offering.
pub const CORE_CLASS_SIZE: usize = 25;

/// Students attending a plain subject offering.
pub const SUBJECT_CLASS_SIZE: usize = 20;

/// Whether a subject name belongs to the core curriculum.
pub fn is_core_subject(subject: &str) -> bool {
    let subject = subject.to_lowercase();
    CORE_SUBJECTS.iter().any(|core| subject.contains(core))
}

/// Derives the offerings for one run, in scheduling order.
pub fn derive_offerings(input: &NormalizedInput) -> Vec<Offering> {
    if input.is_degenerate() {
        debug!("incomplete input; no offerings derived");
        return Vec::new();
    }

    let mut offerings = elective_offerings(input);
    offerings.extend(faculty_offerings(input));
    offerings.sort_by_key(|o| o.priority());

    debug!(
        electives = offerings.iter().filter(|o| o.kind == OfferingKind::Elective).count(),
        total = offerings.len(),
        "derived offerings"
    );
    offerings
}

fn eligible_faculty(faculty: &[Faculty], subject: &str) -> Vec<String> {
    faculty
        .iter()
        .filter(|f| f.teaches(subject))
        .map(|f| f.id.clone())
        .collect()
}

fn elective_offerings(input: &NormalizedInput) -> Vec<Offering> {
    let mut groups: Vec<Offering> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for student in &input.students {
        for elective in &student.subjects {
            let slot = *index.entry(elective.as_str()).or_insert_with(|| {
                groups.push(Offering::new(elective.clone(), OfferingKind::Elective));
                groups.len() - 1
            });
            groups[slot].add_student(student.id.clone());
        }
    }

    groups
        .into_iter()
        .filter_map(|mut offering| {
            offering.eligible_faculty = eligible_faculty(&input.faculty, &offering.name);
            if offering.eligible_faculty.is_empty() {
                debug!(elective = %offering.name, "no faculty teaches elective; dropped");
                None
            } else {
                Some(offering)
            }
        })
        .collect()
}

fn faculty_offerings(input: &NormalizedInput) -> Vec<Offering> {
    input
        .faculty
        .iter()
        .flat_map(|f| f.subjects.iter())
        .filter(|s| !SENTINEL_SUBJECTS.contains(&s.as_str()))
        .unique()
        .map(|subject| {
            let (kind, size) = if is_core_subject(subject) {
                (OfferingKind::Core, CORE_CLASS_SIZE)
            } else {
                (OfferingKind::Subject, SUBJECT_CLASS_SIZE)
            };
            let mut offering = Offering::new(subject.clone(), kind);
            for student in input.students.iter().take(size) {
                offering.add_student(student.id.clone());
            }
            offering.eligible_faculty = eligible_faculty(&input.faculty, subject);
            offering
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, Student};

    fn sample_input() -> NormalizedInput {
        let students = (1..=30)
            .map(|i| {
                let s = Student::new(format!("S{i}"));
                match i % 3 {
                    0 => s.with_subject("AI").with_subject("Music"),
                    1 => s.with_subject("Data Science"),
                    _ => s,
                }
            })
            .collect();
        NormalizedInput {
            students,
            faculty: vec![
                Faculty::new("F1").with_subject("AI").with_subject("Mathematics"),
                Faculty::new("F2").with_subject("Science").with_subject("General"),
                Faculty::new("F3").with_subject("History").with_subject("AI"),
            ],
            rooms: vec![Room::new("R1")],
        }
    }

    #[test]
    fn test_core_detection() {
        assert!(is_core_subject("Applied Mathematics"));
        assert!(is_core_subject("ENGLISH"));
        assert!(!is_core_subject("History"));
    }

    #[test]
    fn test_offering_order_and_kinds() {
        let offerings = derive_offerings(&sample_input());
        let names: Vec<(&str, OfferingKind)> =
            offerings.iter().map(|o| (o.name.as_str(), o.kind)).collect();
        assert_eq!(
            names,
            vec![
                ("Data Science", OfferingKind::Elective),
                ("AI", OfferingKind::Elective),
                ("Mathematics", OfferingKind::Core),
                ("Science", OfferingKind::Core),
                ("AI", OfferingKind::Subject),
                ("History", OfferingKind::Subject),
            ]
        );
        assert!(offerings.windows(2).all(|w| w[0].priority() <= w[1].priority()));
    }

    #[test]
    fn test_elective_without_faculty_dropped() {
        let offerings = derive_offerings(&sample_input());
        assert!(!offerings.iter().any(|o| o.name == "Music"));
    }

    #[test]
    fn test_elective_membership_and_faculty() {
        let offerings = derive_offerings(&sample_input());
        let ai = &offerings[1];
        assert_eq!(ai.name, "AI");
        assert_eq!(ai.students.len(), 10);
        assert_eq!(ai.eligible_faculty, vec!["F1", "F3"]);

        // "Data Science" fuzzy-matches F2's "Science".
        let ds = &offerings[0];
        assert_eq!(ds.students.len(), 10);
        assert_eq!(ds.eligible_faculty, vec!["F2"]);
    }

    #[test]
    fn test_class_sizes() {
        let offerings = derive_offerings(&sample_input());
        let math = offerings.iter().find(|o| o.name == "Mathematics").unwrap();
        assert_eq!(math.students.len(), CORE_CLASS_SIZE);
        assert_eq!(math.students[0], "S1");
        let history = offerings.iter().find(|o| o.name == "History").unwrap();
        assert_eq!(history.students.len(), SUBJECT_CLASS_SIZE);
    }

    #[test]
    fn test_small_student_body() {
        let mut input = sample_input();
        input.students.truncate(4);
        let offerings = derive_offerings(&input);
        let math = offerings.iter().find(|o| o.name == "Mathematics").unwrap();
        assert_eq!(math.students.len(), 4);
    }

    #[test]
    fn test_sentinels_excluded() {
        let offerings = derive_offerings(&sample_input());
        assert!(!offerings.iter().any(|o| o.name == "General"));
    }

    #[test]
    fn test_degenerate_input() {
        let mut input = sample_input();
        input.rooms.clear();
        assert!(derive_offerings(&input).is_empty());
    }
}
