//! Constraint-aware slot assignment.
//!
//! Builds one candidate timetable from the derived offerings.
//!
//! # Algorithm
//!
//! Placement runs as a fixed pipeline of phases over a shared grid state:
//!
//! 1. **Init**: one lunch break per weekday; one workload counter per
//!    faculty member. Stops here if any entity collection is empty.
//! 2. **Primary**: each offering, in priority order, gets one session. The
//!    starting day rotates per offering; every weekday is tried, slots in
//!    chronological order.
//! 3. **Supplemental**: electives get up to two repeat sessions, core
//!    offerings one, starting from Friday.
//! 4. **Filler**: a share of the still-empty cells (emptiest days first)
//!    receives study periods; the rest stay free.
//!
//! A cell accepts a session when it is unused, some eligible faculty member
//! with spare hours is free there, and a room of the right category is free
//! there. Faculty and room are then chosen uniformly at random. Every cell
//! holds at most one session, so rooms are never double-booked.
//!
//! Failures are never fatal: an offering that finds no cell is skipped.
//!
//! # Complexity
//! O(o · d · t · (f + r)) for o offerings, d days, t slots, f faculty, r rooms.

use itertools::Itertools;
use rand::prelude::IndexedRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::WorkloadCounter;
use crate::models::{
    teaching_cells, Assignment, AssignmentKind, Candidate, Cell, Day, Offering, RoomCategory,
    TimeSlot,
};
use crate::normalize::NormalizedInput;

/// Labels for study periods placed by the filler phase.
pub const STUDY_ACTIVITIES: [&str; 12] = [
    "Study Hall",
    "Library Time",
    "Tutorial Session",
    "Lab Practice",
    "Group Discussion",
    "Project Work",
    "Review Session",
    "Extra Practice",
    "Seminar",
    "Workshop",
    "Research Time",
    "Assignment Work",
];

/// Share of empty cells the filler phase visits.
pub const DEFAULT_FILLER_RATIO: f64 = 0.85;

/// Students attending a study period.
pub const STUDY_GROUP_SIZE: usize = 10;

/// Placement phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Primary,
    Supplemental,
    Filler,
}

impl Phase {
    /// The placement pipeline.
    pub const PIPELINE: [Phase; 4] = [
        Phase::Init,
        Phase::Primary,
        Phase::Supplemental,
        Phase::Filler,
    ];
}

/// Mutable state of one candidate under construction.
struct Grid {
    candidate: Candidate,
    used_cells: HashSet<Cell>,
    faculty_busy: HashSet<(usize, Cell)>,
    room_busy: HashSet<(usize, Cell)>,
    workload: Vec<WorkloadCounter>,
    /// Sessions placed per offering index.
    sessions: Vec<u32>,
    next_id: usize,
}

impl Grid {
    fn new(input: &NormalizedInput, offerings: usize) -> Self {
        Self {
            candidate: Candidate::new(),
            used_cells: HashSet::new(),
            faculty_busy: HashSet::new(),
            room_busy: HashSet::new(),
            workload: input
                .faculty
                .iter()
                .map(|f| WorkloadCounter::new(f.max_hours))
                .collect(),
            sessions: vec![0; offerings],
            next_id: 0,
        }
    }

    fn place_breaks(&mut self) -> usize {
        for day in Day::WEEKDAYS {
            self.candidate.add_assignment(Assignment::lunch_break(day));
            self.used_cells.insert((day, TimeSlot::LUNCH));
        }
        Day::WEEKDAYS.len()
    }

    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("slot-{}", self.next_id)
    }

    fn is_used(&self, cell: Cell) -> bool {
        self.used_cells.contains(&cell)
    }

    fn faculty_free(&self, faculty: usize, cell: Cell) -> bool {
        self.workload[faculty].has_capacity() && !self.faculty_busy.contains(&(faculty, cell))
    }

    fn room_free(&self, room: usize, cell: Cell) -> bool {
        !self.room_busy.contains(&(room, cell))
    }

    fn place(&mut self, assignment: Assignment, faculty: usize, room: usize) {
        let cell = (assignment.day, assignment.time);
        self.used_cells.insert(cell);
        self.faculty_busy.insert((faculty, cell));
        self.room_busy.insert((room, cell));
        self.workload[faculty].record_hour();
        self.candidate.add_assignment(assignment);
    }
}

/// Builds candidate timetables from one set of offerings.
///
/// The assigner borrows the entities and offerings; each call to
/// [`assign`](Self::assign) starts from a fresh grid, so candidates are
/// independent and differ only through the random choices.
#[derive(Debug, Clone)]
pub struct SlotAssigner<'a> {
    input: &'a NormalizedInput,
    offerings: &'a [Offering],
    faculty_index: HashMap<&'a str, usize>,
    filler_ratio: f64,
}

impl<'a> SlotAssigner<'a> {
    /// Creates an assigner over normalized input and its offerings.
    pub fn new(input: &'a NormalizedInput, offerings: &'a [Offering]) -> Self {
        let faculty_index = input
            .faculty
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.as_str(), i))
            .collect();
        Self {
            input,
            offerings,
            faculty_index,
            filler_ratio: DEFAULT_FILLER_RATIO,
        }
    }

    /// Sets the share of empty cells the filler phase visits (0.0–1.0).
    pub fn with_filler_ratio(mut self, ratio: f64) -> Self {
        self.filler_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Offerings in scheduling order.
    pub fn offerings(&self) -> &[Offering] {
        self.offerings
    }

    /// Builds one candidate.
    pub fn assign<R: Rng + ?Sized>(&self, rng: &mut R) -> Candidate {
        let mut grid = Grid::new(self.input, self.offerings.len());
        for phase in Phase::PIPELINE {
            let placed = match phase {
                Phase::Init => grid.place_breaks(),
                Phase::Primary => self.primary(&mut grid, rng),
                Phase::Supplemental => self.supplemental(&mut grid, rng),
                Phase::Filler => self.filler(&mut grid, rng),
            };
            debug!(?phase, placed, "phase complete");
            if phase == Phase::Init && self.input.is_degenerate() {
                debug!("incomplete input; candidate holds lunch breaks only");
                break;
            }
        }

        debug!(
            assignments = grid.candidate.assignment_count(),
            used_cells = grid.used_cells.len(),
            "candidate built"
        );
        grid.candidate
    }

    /// One session per offering, rotating the starting day.
    fn primary<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        let days = Day::WEEKDAYS;
        let mut placed = 0;
        for (index, offering) in self.offerings.iter().enumerate() {
            let start = index % days.len();
            let found = (0..days.len())
                .map(|attempt| days[(start + attempt) % days.len()])
                .any(|day| {
                    TimeSlot::TEACHING
                        .into_iter()
                        .any(|time| self.try_place(index, (day, time), grid, rng))
                });
            if found {
                placed += 1;
            } else {
                debug!(offering = %offering.name, "no eligible faculty or room; skipped");
            }
        }
        placed
    }

    /// Repeat sessions for electives and core offerings.
    fn supplemental<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        let mut placed = 0;
        for (index, offering) in self.offerings.iter().enumerate() {
            let wanted = offering.kind.supplemental_sessions();
            let mut added = 0;
            for day in Day::SUPPLEMENTAL_ORDER {
                for time in TimeSlot::TEACHING {
                    if added == wanted {
                        break;
                    }
                    if self.try_place(index, (day, time), grid, rng) {
                        added += 1;
                    }
                }
            }
            if added < wanted {
                debug!(offering = %offering.name, added, wanted, "repeat sessions short");
            }
            placed += added as usize;
        }
        placed
    }

    /// Study periods in the emptiest days' free cells.
    fn filler<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        let empty: Vec<Cell> = teaching_cells().filter(|&c| !grid.is_used(c)).collect();
        let empty_per_day = empty.iter().counts_by(|(day, _)| *day);
        let ordered: Vec<Cell> = empty
            .into_iter()
            .sorted_by_key(|(day, _)| (Reverse(empty_per_day[day]), *day))
            .collect();
        let quota = (ordered.len() as f64 * self.filler_ratio).ceil() as usize;

        let group: Vec<String> = self
            .input
            .students
            .iter()
            .take(STUDY_GROUP_SIZE)
            .map(|s| s.id.clone())
            .collect();

        let mut placed = 0;
        for cell in ordered.into_iter().take(quota) {
            let label = STUDY_ACTIVITIES.choose(rng);
            let faculty: Vec<usize> = (0..self.input.faculty.len())
                .filter(|&i| grid.faculty_free(i, cell))
                .collect();
            let rooms: Vec<usize> = (0..self.input.rooms.len())
                .filter(|&i| grid.room_free(i, cell))
                .collect();
            let (Some(&label), Some(&fi), Some(&ri)) =
                (label, faculty.choose(rng), rooms.choose(rng))
            else {
                continue;
            };

            let (day, time) = cell;
            let assignment = Assignment::new(
                grid.next_id(),
                label,
                &self.input.faculty[fi],
                &self.input.rooms[ri],
                day,
                time,
            )
            .with_students(group.clone())
            .with_kind(AssignmentKind::Study);
            debug!(%day, %time, activity = label, "study period placed");
            grid.place(assignment, fi, ri);
            placed += 1;
        }
        placed
    }

    /// Places the next session of offering `index` in `cell`, if acceptable.
    fn try_place<R: Rng + ?Sized>(
        &self,
        index: usize,
        cell: Cell,
        grid: &mut Grid,
        rng: &mut R,
    ) -> bool {
        if grid.is_used(cell) {
            return false;
        }
        let offering = &self.offerings[index];

        let faculty: Vec<usize> = offering
            .eligible_faculty
            .iter()
            .filter_map(|id| self.faculty_index.get(id.as_str()).copied())
            .filter(|&i| grid.faculty_free(i, cell) && self.input.faculty[i].teaches(&offering.name))
            .collect();
        if faculty.is_empty() {
            return false;
        }
        let rooms = self.free_rooms(offering.room_category(), cell, grid);
        let (Some(&fi), Some(&ri)) = (faculty.choose(rng), rooms.choose(rng)) else {
            return false;
        };

        let session = grid.sessions[index] + 1;
        let (day, time) = cell;
        let assignment = Assignment::new(
            grid.next_id(),
            offering.session_name(session),
            &self.input.faculty[fi],
            &self.input.rooms[ri],
            day,
            time,
        )
        .with_offering(offering, session)
        .with_students(offering.students.clone());

        debug!(
            offering = %offering.name,
            session,
            %day,
            %time,
            faculty = %self.input.faculty[fi].name,
            hours = grid.workload[fi].current_hours + 1,
            max_hours = grid.workload[fi].max_hours,
            "session placed"
        );
        grid.place(assignment, fi, ri);
        grid.sessions[index] = session;
        true
    }

    /// Rooms of `category` free in `cell`; any free room if none of that
    /// category exist.
    fn free_rooms(&self, category: RoomCategory, cell: Cell, grid: &Grid) -> Vec<usize> {
        let rooms = &self.input.rooms;
        let matching: Vec<usize> = (0..rooms.len())
            .filter(|&i| rooms[i].is_category(category))
            .collect();
        let pool = if matching.is_empty() {
            (0..rooms.len()).collect()
        } else {
            matching
        };
        pool.into_iter().filter(|&i| grid.room_free(i, cell)).collect()
    }
}
