//! Input normalization.
//!
//! Uploaded spreadsheets name their columns however they like: a student
//! identifier may arrive as `id`, `Student ID` or `Student_ID`. This module
//! resolves every canonical field through one declared alias table and
//! produces the canonical [`Student`], [`Faculty`] and [`Room`] entities.
//!
//! # Rules
//! - Aliases are probed in table order; the first present, non-empty value
//!   wins. Strings are trimmed, numbers and booleans are stringified and
//!   arrays of scalars are joined with commas.
//! - A missing identifier fails the record with
//!   [`EngineError::MissingField`]. The collection normalizer skips such
//!   records, as well as repeated identifiers, and keeps going.
//! - Every other field falls back to a documented default.

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{split_subjects, Faculty, Room, Student, DEFAULT_MAX_HOURS, DEFAULT_ROOM_TYPE};

/// A raw input row.
pub type Record = Map<String, Value>;

/// Entity collections accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Student,
    Faculty,
    Room,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Student => "student",
            EntityKind::Faculty => "faculty",
            EntityKind::Room => "room",
        })
    }
}

/// Canonical entity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Subjects,
    MaxHours,
    RoomType,
    Capacity,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Subjects => "subjects",
            Field::MaxHours => "maxHours",
            Field::RoomType => "type",
            Field::Capacity => "capacity",
        })
    }
}

struct FieldMapping {
    entity: EntityKind,
    field: Field,
    aliases: &'static [&'static str],
}

const SCHEMA: &[FieldMapping] = &[
    FieldMapping {
        entity: EntityKind::Student,
        field: Field::Id,
        aliases: &["id", "Student ID", "Student_ID"],
    },
    FieldMapping {
        entity: EntityKind::Student,
        field: Field::Name,
        aliases: &["Name", "name", "Student_Name"],
    },
    FieldMapping {
        entity: EntityKind::Student,
        field: Field::Subjects,
        aliases: &["electives", "Electives", "subjects"],
    },
    FieldMapping {
        entity: EntityKind::Faculty,
        field: Field::Id,
        aliases: &["id", "Faculty ID", "Faculty_ID"],
    },
    FieldMapping {
        entity: EntityKind::Faculty,
        field: Field::Name,
        aliases: &["Name", "name", "Faculty_Name"],
    },
    FieldMapping {
        entity: EntityKind::Faculty,
        field: Field::Subjects,
        aliases: &["subjects", "Subjects", "courses"],
    },
    FieldMapping {
        entity: EntityKind::Faculty,
        field: Field::MaxHours,
        aliases: &["maxHours", "Max Hours"],
    },
    FieldMapping {
        entity: EntityKind::Room,
        field: Field::Id,
        aliases: &["id", "Room ID", "Room_ID"],
    },
    FieldMapping {
        entity: EntityKind::Room,
        field: Field::Name,
        aliases: &["Name", "name", "Room_Name"],
    },
    FieldMapping {
        entity: EntityKind::Room,
        field: Field::RoomType,
        aliases: &["Type", "type"],
    },
    FieldMapping {
        entity: EntityKind::Room,
        field: Field::Capacity,
        aliases: &["capacity", "Capacity"],
    },
];

/// Accepted key spellings for a field, in probe order.
///
/// Empty if the entity has no such field.
pub fn aliases(entity: EntityKind, field: Field) -> &'static [&'static str] {
    SCHEMA
        .iter()
        .find(|m| m.entity == entity && m.field == field)
        .map(|m| m.aliases)
        .unwrap_or(&[])
}

/// First non-empty value among the field's aliases, as text.
pub fn lookup(record: &Record, entity: EntityKind, field: Field) -> Option<String> {
    aliases(entity, field)
        .iter()
        .find_map(|key| record.get(*key).and_then(scalar_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Parses the leading integer of `text` ("12.5 hrs" → 12).
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn require_id(record: &Record, entity: EntityKind) -> Result<String, EngineError> {
    lookup(record, entity, Field::Id).ok_or(EngineError::MissingField {
        entity,
        field: Field::Id,
    })
}

fn as_record(value: &Value, entity: EntityKind) -> Result<&Record, EngineError> {
    value.as_object().ok_or(EngineError::MissingField {
        entity,
        field: Field::Id,
    })
}

/// Normalizes one student row.
pub fn normalize_student(value: &Value) -> Result<Student, EngineError> {
    let entity = EntityKind::Student;
    let record = as_record(value, entity)?;
    let id = require_id(record, entity)?;
    Ok(Student {
        name: lookup(record, entity, Field::Name).unwrap_or_else(|| id.clone()),
        subjects: lookup(record, entity, Field::Subjects)
            .map(|s| split_subjects(&s))
            .unwrap_or_default(),
        id,
    })
}

/// Normalizes one faculty row.
///
/// A missing, unparseable or non-positive hour cap becomes
/// [`DEFAULT_MAX_HOURS`].
pub fn normalize_faculty(value: &Value) -> Result<Faculty, EngineError> {
    let entity = EntityKind::Faculty;
    let record = as_record(value, entity)?;
    let id = require_id(record, entity)?;
    let max_hours = lookup(record, entity, Field::MaxHours)
        .and_then(|s| leading_int(&s))
        .filter(|&h| h > 0)
        .and_then(|h| u32::try_from(h).ok())
        .unwrap_or(DEFAULT_MAX_HOURS);
    Ok(Faculty {
        name: lookup(record, entity, Field::Name).unwrap_or_else(|| id.clone()),
        subjects: lookup(record, entity, Field::Subjects)
            .map(|s| split_subjects(&s))
            .unwrap_or_default(),
        max_hours,
        id,
    })
}

/// Normalizes one room row.
pub fn normalize_room(value: &Value) -> Result<Room, EngineError> {
    let entity = EntityKind::Room;
    let record = as_record(value, entity)?;
    let id = require_id(record, entity)?;
    let capacity = lookup(record, entity, Field::Capacity)
        .and_then(|s| leading_int(&s))
        .and_then(|c| u32::try_from(c).ok());
    Ok(Room {
        name: lookup(record, entity, Field::Name).unwrap_or_else(|| id.clone()),
        room_type: lookup(record, entity, Field::RoomType)
            .unwrap_or_else(|| DEFAULT_ROOM_TYPE.to_string()),
        capacity,
        id,
    })
}

/// Canonical entity collections for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedInput {
    pub students: Vec<Student>,
    pub faculty: Vec<Faculty>,
    pub rooms: Vec<Room>,
}

impl NormalizedInput {
    /// Whether any collection is empty, which leaves nothing to schedule.
    pub fn is_degenerate(&self) -> bool {
        self.students.is_empty() || self.faculty.is_empty() || self.rooms.is_empty()
    }
}

/// Normalizes all three raw collections.
///
/// Bad rows are skipped with a warning; empty collections are reported but
/// do not fail the run.
pub fn normalize_input(students: &[Value], faculty: &[Value], rooms: &[Value]) -> NormalizedInput {
    let input = NormalizedInput {
        students: normalize_collection(students, EntityKind::Student, normalize_student, |s| s.id.as_str()),
        faculty: normalize_collection(faculty, EntityKind::Faculty, normalize_faculty, |f| f.id.as_str()),
        rooms: normalize_collection(rooms, EntityKind::Room, normalize_room, |r| r.id.as_str()),
    };

    for (entity, len) in [
        (EntityKind::Student, input.students.len()),
        (EntityKind::Faculty, input.faculty.len()),
        (EntityKind::Room, input.rooms.len()),
    ] {
        if len == 0 {
            warn!(%entity, "no usable {entity} records; only lunch breaks will be scheduled");
        }
    }
    debug!(
        students = input.students.len(),
        faculty = input.faculty.len(),
        rooms = input.rooms.len(),
        "normalized input"
    );
    input
}

fn normalize_collection<T>(
    rows: &[Value],
    entity: EntityKind,
    normalize: fn(&Value) -> Result<T, EngineError>,
    id_of: fn(&T) -> &str,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        match normalize(value) {
            Ok(item) => {
                if seen.insert(id_of(&item).to_string()) {
                    out.push(item);
                } else {
                    warn!(%entity, row, id = id_of(&item), "duplicate {entity} ID; record skipped");
                }
            }
            Err(e) => warn!(%entity, row, error = %e, "record skipped"),
        }
    }
    out
}
