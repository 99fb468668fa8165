//! Generation constraints.
//!
//! The constraints record comes from the settings screen of the surrounding
//! product. Only `ensure_room_capacity` changes scoring; the remaining
//! options are carried through so callers can round-trip them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// Constraints and preferences for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Penalize sessions whose student count exceeds the room capacity.
    pub ensure_room_capacity: bool,
    /// Informational: faculty clashes are always scored.
    pub prevent_faculty_clashes: bool,
    /// Informational: workload overflow is always scored.
    pub balance_workload: bool,
    /// Informational.
    pub minimize_empty_periods: bool,
    /// Minimum break between sessions, in minutes.
    pub min_break_time: u32,
    /// Workload intensity level.
    pub workload_level: u32,
    /// Maximum consecutive sessions per faculty member.
    pub max_consecutive_faculty: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            ensure_room_capacity: false,
            prevent_faculty_clashes: true,
            balance_workload: true,
            minimize_empty_periods: true,
            min_break_time: 10,
            workload_level: 1,
            max_consecutive_faculty: 3,
        }
    }
}

impl Constraints {
    /// Creates the default constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the room capacity penalty.
    pub fn with_room_capacity(mut self, enabled: bool) -> Self {
        self.ensure_room_capacity = enabled;
        self
    }

    /// Parses a raw constraints value.
    ///
    /// `null` yields the defaults. Anything other than an object, or an
    /// object with wrongly typed options, is rejected before generation
    /// starts. Unknown options are ignored.
    pub fn from_value(value: &Value) -> Result<Self, EngineError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Self::deserialize(value)
                .map_err(|e| EngineError::InvalidConstraints(e.to_string())),
            other => Err(EngineError::InvalidConstraints(format!(
                "expected an object, found {}",
                json_type_name(other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_default() {
        let c = Constraints::from_value(&Value::Null).unwrap();
        assert_eq!(c, Constraints::default());
        assert!(!c.ensure_room_capacity);
    }

    #[test]
    fn test_partial_object() {
        let c = Constraints::from_value(&json!({
            "ensureRoomCapacity": true,
            "minBreakTime": 15,
            "preferredGirls": 2
        }))
        .unwrap();
        assert!(c.ensure_room_capacity);
        assert_eq!(c.min_break_time, 15);
        assert_eq!(c.workload_level, 1);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = Constraints::from_value(&json!({ "ensureRoomCapacity": "yes" })).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConstraints(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = Constraints::from_value(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_builder() {
        assert!(Constraints::new().with_room_capacity(true).ensure_room_capacity);
    }
}
