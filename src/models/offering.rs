//! Course offerings.
//!
//! An offering is a course to be scheduled: who attends, who may teach it
//! and how urgently it should be placed. Offerings are derived from the
//! entity collections on every run (see [`crate::courses`]) and never
//! persisted.

use serde::{Deserialize, Serialize};

use super::RoomCategory;

/// Subject keywords that need a lab rather than a classroom.
pub const TECHNOLOGY_SUBJECTS: [&str; 10] = [
    "AI",
    "ML",
    "Data Science",
    "Cyber Sec",
    "IoT",
    "Big Data",
    "Networks",
    "Databases",
    "Cloud Computing",
    "Computer Science",
];

/// Offering classification.
///
/// Declaration order is scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingKind {
    /// Chosen by students; scheduled first.
    Elective,
    /// Core curriculum subject taught by faculty.
    Core,
    /// Any other faculty subject.
    Subject,
}

impl OfferingKind {
    /// Scheduling priority (0 = first).
    pub fn priority(&self) -> u8 {
        match self {
            OfferingKind::Elective => 0,
            OfferingKind::Core => 1,
            OfferingKind::Subject => 2,
        }
    }

    /// Repeat sessions attempted after the primary placement.
    pub fn supplemental_sessions(&self) -> u32 {
        match self {
            OfferingKind::Elective => 2,
            OfferingKind::Core => 1,
            OfferingKind::Subject => 0,
        }
    }
}

/// A course to be placed on the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    /// Subject name.
    pub name: String,
    /// Classification.
    pub kind: OfferingKind,
    /// Enrolled student IDs, distinct, in enrollment order.
    pub students: Vec<String>,
    /// IDs of faculty whose subjects match this offering.
    pub eligible_faculty: Vec<String>,
}

impl Offering {
    /// Creates an offering with no students or faculty.
    pub fn new(name: impl Into<String>, kind: OfferingKind) -> Self {
        Self {
            name: name.into(),
            kind,
            students: Vec::new(),
            eligible_faculty: Vec::new(),
        }
    }

    /// Adds a student, ignoring repeats.
    pub fn with_student(mut self, student_id: impl Into<String>) -> Self {
        self.add_student(student_id);
        self
    }

    /// Adds an eligible faculty member.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.eligible_faculty.push(faculty_id.into());
        self
    }

    /// Adds a student, ignoring repeats.
    pub fn add_student(&mut self, student_id: impl Into<String>) {
        let student_id = student_id.into();
        if !self.students.contains(&student_id) {
            self.students.push(student_id);
        }
    }

    /// Scheduling priority (0 = first).
    #[inline]
    pub fn priority(&self) -> u8 {
        self.kind.priority()
    }

    /// Whether the subject name marks it as a technology course.
    pub fn is_technical(&self) -> bool {
        let name = self.name.to_lowercase();
        TECHNOLOGY_SUBJECTS
            .iter()
            .any(|tech| name.contains(&tech.to_lowercase()))
    }

    /// Room category this offering should be placed in.
    pub fn room_category(&self) -> RoomCategory {
        if self.is_technical() {
            RoomCategory::Lab
        } else {
            RoomCategory::Classroom
        }
    }

    /// Course code for the given session (1-based).
    pub fn course_code(&self, session: u32) -> String {
        course_code(&self.name, session)
    }

    /// Display name for the given session (1-based).
    pub fn session_name(&self, session: u32) -> String {
        if session > 1 {
            format!("{} (Session {session})", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Short course code: whitespace removed, first six characters upper-cased,
/// with the session number appended for repeat sessions.
pub fn course_code(name: &str, session: u32) -> String {
    let compact: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(6)
        .collect();
    let mut code = compact.to_uppercase();
    if session > 1 {
        code.push_str(&session.to_string());
    }
    code
}
