//! Weekly calendar grid.
//!
//! The timetable is a fixed grid of weekdays × teaching slots. A lunch slot
//! sits between the morning and afternoon blocks and is never used for
//! teaching.
//!
//! # Grid
//!
//! | Slot | Label | Teaching |
//! |------|-------|----------|
//! | 1 | 9:00 AM | yes |
//! | 2 | 10:00 AM | yes |
//! | 3 | 11:00 AM | yes |
//! | 4 | 12:00 PM | yes |
//! | – | 1:00 PM | lunch |
//! | 5 | 1:30 PM | yes |
//! | 6 | 2:30 PM | yes |
//! | 7 | 3:30 PM | yes |
//!
//! Both `Day` and `TimeSlot` order chronologically, so they can key ordered
//! maps directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// The teaching week, in calendar order.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// All seven days, in calendar order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Day order for repeat sessions.
    ///
    /// Friday leads so that the end of the week is not starved by the
    /// round-robin primary placement.
    pub const SUPPLEMENTAL_ORDER: [Day; 5] = [
        Day::Friday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Whether this is one of the five teaching days.
    pub fn is_weekday(&self) -> bool {
        !matches!(self, Day::Saturday | Day::Sunday)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A start time on the daily grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "9:00 AM")]
    NineAm,
    #[serde(rename = "10:00 AM")]
    TenAm,
    #[serde(rename = "11:00 AM")]
    ElevenAm,
    #[serde(rename = "12:00 PM")]
    Noon,
    #[serde(rename = "1:00 PM")]
    OnePm,
    #[serde(rename = "1:30 PM")]
    HalfPastOne,
    #[serde(rename = "2:30 PM")]
    HalfPastTwo,
    #[serde(rename = "3:30 PM")]
    HalfPastThree,
}

impl TimeSlot {
    /// Teaching slots in scan order.
    pub const TEACHING: [TimeSlot; 7] = [
        TimeSlot::NineAm,
        TimeSlot::TenAm,
        TimeSlot::ElevenAm,
        TimeSlot::Noon,
        TimeSlot::HalfPastOne,
        TimeSlot::HalfPastTwo,
        TimeSlot::HalfPastThree,
    ];

    /// The daily lunch break.
    pub const LUNCH: TimeSlot = TimeSlot::OnePm;

    /// Display label (also the serialized form).
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::NineAm => "9:00 AM",
            TimeSlot::TenAm => "10:00 AM",
            TimeSlot::ElevenAm => "11:00 AM",
            TimeSlot::Noon => "12:00 PM",
            TimeSlot::OnePm => "1:00 PM",
            TimeSlot::HalfPastOne => "1:30 PM",
            TimeSlot::HalfPastTwo => "2:30 PM",
            TimeSlot::HalfPastThree => "3:30 PM",
        }
    }

    /// Whether classes may be placed in this slot.
    pub fn is_teaching(&self) -> bool {
        *self != Self::LUNCH
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A (day, time) cell of the weekly grid.
pub type Cell = (Day, TimeSlot);

/// Every teaching cell of the week, day-major.
pub fn teaching_cells() -> impl Iterator<Item = Cell> {
    Day::WEEKDAYS
        .into_iter()
        .flat_map(|day| TimeSlot::TEACHING.into_iter().map(move |time| (day, time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teaching_slots_exclude_lunch() {
        assert_eq!(TimeSlot::TEACHING.len(), 7);
        assert!(!TimeSlot::TEACHING.contains(&TimeSlot::LUNCH));
        assert!(TimeSlot::TEACHING.iter().all(|t| t.is_teaching()));
    }

    #[test]
    fn test_slots_order_chronologically() {
        assert!(TimeSlot::Noon < TimeSlot::OnePm);
        assert!(TimeSlot::OnePm < TimeSlot::HalfPastOne);
        let mut sorted = TimeSlot::TEACHING;
        sorted.sort();
        assert_eq!(sorted, TimeSlot::TEACHING);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(
            serde_json::to_string(&TimeSlot::HalfPastTwo).unwrap(),
            "\"2:30 PM\""
        );
        assert_eq!(serde_json::to_string(&Day::Friday).unwrap(), "\"Friday\"");
        for slot in TimeSlot::TEACHING {
            let json = serde_json::to_string(&slot).unwrap();
            assert_eq!(json, format!("\"{}\"", slot.label()));
        }
    }

    #[test]
    fn test_supplemental_order_covers_weekdays() {
        let mut days = Day::SUPPLEMENTAL_ORDER;
        days.sort();
        assert_eq!(days, Day::WEEKDAYS);
        assert_eq!(Day::SUPPLEMENTAL_ORDER[0], Day::Friday);
    }

    #[test]
    fn test_teaching_cells() {
        let cells: Vec<Cell> = teaching_cells().collect();
        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0], (Day::Monday, TimeSlot::NineAm));
        assert_eq!(cells[34], (Day::Friday, TimeSlot::HalfPastThree));
        assert!(Day::Friday.is_weekday());
        assert!(!Day::Sunday.is_weekday());
    }
}
