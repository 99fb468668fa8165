//! Candidate timetable model.
//!
//! A candidate is one complete weekly assignment set: class sessions, study
//! periods and the synthetic lunch breaks. Conflicts are not stored on the
//! candidate; they are computed by [`crate::scheduler::FitnessEvaluator`].

use serde::{Deserialize, Serialize};

use super::{Day, Faculty, Offering, OfferingKind, Room, TimeSlot};

/// What an assignment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    /// A session of an offering.
    Class,
    /// The daily lunch break.
    Break,
    /// A study or enrichment period filling an otherwise empty cell.
    Study,
}

/// One placed (day, time, room, faculty) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Identifier, unique within the candidate.
    pub id: String,
    /// Name of the offering this session belongs to (classes only).
    pub offering: Option<String>,
    /// Kind of that offering. An elective and a subject offering may share a
    /// name; the kind tells them apart.
    pub offering_kind: Option<OfferingKind>,
    /// Short course code.
    pub course_code: String,
    /// Display course name.
    pub course_name: String,
    /// Teaching faculty (absent for breaks).
    pub faculty_id: Option<String>,
    /// Teaching faculty display name.
    pub faculty_name: Option<String>,
    /// Room (absent for breaks).
    pub room_id: Option<String>,
    /// Room display name.
    pub room_name: Option<String>,
    /// Day of the week.
    pub day: Day,
    /// Start slot.
    #[serde(rename = "timeSlot")]
    pub time: TimeSlot,
    /// 1-based session number of the offering.
    pub session_number: u32,
    /// Attending student IDs.
    #[serde(rename = "students")]
    pub student_ids: Vec<String>,
    /// Classification.
    #[serde(rename = "courseType")]
    pub kind: AssignmentKind,
}

impl Assignment {
    /// Creates a class or study assignment with no students yet.
    pub fn new(
        id: impl Into<String>,
        course_name: impl Into<String>,
        faculty: &Faculty,
        room: &Room,
        day: Day,
        time: TimeSlot,
    ) -> Self {
        let course_name = course_name.into();
        Self {
            id: id.into(),
            offering: None,
            offering_kind: None,
            course_code: super::course_code(&course_name, 1),
            course_name,
            faculty_id: Some(faculty.id.clone()),
            faculty_name: Some(faculty.name.clone()),
            room_id: Some(room.id.clone()),
            room_name: Some(room.name.clone()),
            day,
            time,
            session_number: 1,
            student_ids: Vec::new(),
            kind: AssignmentKind::Class,
        }
    }

    /// Creates the lunch break for `day`.
    pub fn lunch_break(day: Day) -> Self {
        Self {
            id: format!("lunch-{day}"),
            offering: None,
            offering_kind: None,
            course_code: "LUNCH".to_string(),
            course_name: "Lunch Break".to_string(),
            faculty_id: None,
            faculty_name: None,
            room_id: None,
            room_name: None,
            day,
            time: TimeSlot::LUNCH,
            session_number: 1,
            student_ids: Vec::new(),
            kind: AssignmentKind::Break,
        }
    }

    /// Links the assignment to an offering session.
    pub fn with_offering(mut self, offering: &Offering, session: u32) -> Self {
        self.course_code = offering.course_code(session);
        self.offering = Some(offering.name.clone());
        self.offering_kind = Some(offering.kind);
        self.session_number = session;
        self
    }

    /// Whether this is a session of `offering`.
    pub fn belongs_to(&self, offering: &Offering) -> bool {
        self.offering_kind == Some(offering.kind)
            && self.offering.as_deref() == Some(offering.name.as_str())
    }

    /// Sets the attending students.
    pub fn with_students(mut self, student_ids: Vec<String>) -> Self {
        self.student_ids = student_ids;
        self
    }

    /// Sets the classification.
    pub fn with_kind(mut self, kind: AssignmentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Number of attending students.
    #[inline]
    pub fn student_count(&self) -> usize {
        self.student_ids.len()
    }

    /// Whether this is a lunch break.
    #[inline]
    pub fn is_break(&self) -> bool {
        self.kind == AssignmentKind::Break
    }

    /// Whether both assignments start in the same grid cell.
    #[inline]
    pub fn same_cell(&self, other: &Assignment) -> bool {
        self.day == other.day && self.time == other.time
    }

    /// Whether the two assignments share any student.
    pub fn shares_student(&self, other: &Assignment) -> bool {
        self.student_ids
            .iter()
            .any(|s| other.student_ids.contains(s))
    }
}

/// One complete weekly assignment set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Assignments in placement order.
    pub assignments: Vec<Assignment>,
}

impl Candidate {
    /// Creates an empty candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of assignments, breaks included.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Non-break assignments.
    pub fn sessions(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| !a.is_break())
    }

    /// Lunch breaks.
    pub fn breaks(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| a.is_break())
    }

    /// Assignments of the given kind.
    pub fn assignments_of_kind(&self, kind: AssignmentKind) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.kind == kind).collect()
    }

    /// Assignments starting in the given cell.
    pub fn assignments_at(&self, day: Day, time: TimeSlot) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.day == day && a.time == time)
            .collect()
    }

    /// Non-break assignments taught by the given faculty member.
    pub fn assignments_for_faculty(&self, faculty_id: &str) -> Vec<&Assignment> {
        self.sessions()
            .filter(|a| a.faculty_id.as_deref() == Some(faculty_id))
            .collect()
    }

    /// Sessions of the given offering.
    pub fn assignments_for_offering(&self, offering: &Offering) -> Vec<&Assignment> {
        self.sessions().filter(|a| a.belongs_to(offering)).collect()
    }
}

/// Hard-constraint violation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// A student is in two rooms at once.
    StudentClash,
    /// A faculty member is in two rooms at once.
    FacultyClash,
    /// A room hosts two sessions at once.
    RoomClash,
}

/// A detected hard-constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Violation type.
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    /// The offending assignment.
    pub assignment: Assignment,
}

impl Conflict {
    /// Creates a student clash.
    pub fn student_clash(assignment: &Assignment) -> Self {
        Self::new(ConflictType::StudentClash, assignment)
    }

    /// Creates a faculty clash.
    pub fn faculty_clash(assignment: &Assignment) -> Self {
        Self::new(ConflictType::FacultyClash, assignment)
    }

    /// Creates a room clash.
    pub fn room_clash(assignment: &Assignment) -> Self {
        Self::new(ConflictType::RoomClash, assignment)
    }

    fn new(conflict_type: ConflictType, assignment: &Assignment) -> Self {
        Self {
            conflict_type,
            assignment: assignment.clone(),
        }
    }
}
