//! Input entities: students, faculty and rooms.
//!
//! Entities are the canonical form of the raw records handed to the engine
//! (see [`crate::normalize`]). They are read-only for the whole generation
//! run.

use serde::{Deserialize, Serialize};

/// Weekly teaching hours assumed when a faculty record does not state one.
pub const DEFAULT_MAX_HOURS: u32 = 10;

/// Room type assumed when a room record does not state one.
pub const DEFAULT_ROOM_TYPE: &str = "classroom";

/// Case-insensitive substring match in either direction.
///
/// This is how subjects are compared everywhere: "Data Science" matches
/// "Science", "AI" matches "AI & Robotics".
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Splits a comma-separated subject list, trimming and dropping empties.
pub fn split_subjects(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A student and the electives they chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Chosen electives, in the order given.
    pub subjects: Vec<String>,
}

impl Student {
    /// Creates a student with no electives.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            subjects: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an elective.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }
}

/// A faculty member, the subjects they teach and their weekly hour cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subjects this faculty member can teach.
    pub subjects: Vec<String>,
    /// Maximum teaching hours per week.
    pub max_hours: u32,
}

impl Faculty {
    /// Creates a faculty member with the default hour cap.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            subjects: Vec::new(),
            max_hours: DEFAULT_MAX_HOURS,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a taught subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Sets the weekly hour cap.
    pub fn with_max_hours(mut self, max_hours: u32) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Whether any taught subject fuzzy-matches `subject`.
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| fuzzy_match(s, subject))
    }
}

/// Room category used for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    /// Computer or science lab.
    Lab,
    /// Classroom or lecture hall.
    Classroom,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form room type ("Lab", "Lecture Hall", ...).
    pub room_type: String,
    /// Seat count, if known.
    pub capacity: Option<u32>,
}

impl Room {
    /// Creates a classroom with unknown capacity.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            room_type: DEFAULT_ROOM_TYPE.to_string(),
            capacity: None,
        }
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id).with_type("Lab")
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type.
    pub fn with_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = room_type.into();
        self
    }

    /// Sets the seat count.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Whether the room belongs to `category`.
    ///
    /// Rooms are matched on both type and name, so "Lecture Hall A" typed as
    /// "hall" still counts as a classroom.
    pub fn is_category(&self, category: RoomCategory) -> bool {
        let room_type = self.room_type.to_lowercase();
        let name = self.name.to_lowercase();
        match category {
            RoomCategory::Lab => room_type.contains("lab") || name.contains("lab"),
            RoomCategory::Classroom => {
                room_type.contains("classroom")
                    || room_type.contains("lecture")
                    || room_type.contains("class")
                    || name.contains("lecture")
            }
        }
    }

    /// Whether `students` people exceed the known seat count.
    pub fn overflows(&self, students: usize) -> bool {
        self.capacity.is_some_and(|cap| students > cap as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match_both_directions() {
        assert!(fuzzy_match("Data Science", "science"));
        assert!(fuzzy_match("AI", "ai & robotics"));
        assert!(!fuzzy_match("Physics", "Chemistry"));
    }

    #[test]
    fn test_split_subjects() {
        assert_eq!(
            split_subjects(" AI , ML,, Data Science ,"),
            vec!["AI", "ML", "Data Science"]
        );
        assert!(split_subjects("  ").is_empty());
    }

    #[test]
    fn test_faculty_teaches() {
        let f = Faculty::new("F1").with_subject("Mathematics").with_subject("AI");
        assert!(f.teaches("math"));
        assert!(f.teaches("AI"));
        assert!(!f.teaches("English"));
        assert_eq!(f.max_hours, DEFAULT_MAX_HOURS);
        assert_eq!(f.name, "F1");
    }

    #[test]
    fn test_room_categories() {
        let lab = Room::lab("R1");
        assert!(lab.is_category(RoomCategory::Lab));
        assert!(!lab.is_category(RoomCategory::Classroom));

        let hall = Room::new("R2").with_type("hall").with_name("Lecture Hall B");
        assert!(hall.is_category(RoomCategory::Classroom));

        let default_room = Room::new("R3");
        assert!(default_room.is_category(RoomCategory::Classroom));

        let named_lab = Room::new("R4").with_type("other").with_name("Robotics Lab");
        assert!(named_lab.is_category(RoomCategory::Lab));
    }

    #[test]
    fn test_room_overflow() {
        let room = Room::new("R1").with_capacity(30);
        assert!(!room.overflows(30));
        assert!(room.overflows(31));
        assert!(!Room::new("R2").overflows(500));
    }
}
