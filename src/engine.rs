//! Engine facade.
//!
//! Wires normalization, course derivation, candidate search and output
//! formatting into one call. Everything that can reject a run (malformed
//! constraints, an unusable search configuration) is checked before the
//! first candidate is built.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::courses::derive_offerings;
use crate::error::EngineError;
use crate::ga::{GaConfig, GaResult, GaRunner, TimetableProblem};
use crate::models::{Candidate, Constraints, Offering, TimetableOutput};
use crate::normalize::{normalize_input, NormalizedInput};
use crate::scheduler::{Evaluation, FitnessEvaluator, SlotAssigner};

/// Raw generation request.
///
/// Entity rows are loose JSON records; see [`crate::normalize`] for the
/// accepted spellings. Missing collections are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableRequest {
    pub students: Vec<Value>,
    pub faculty: Vec<Value>,
    pub rooms: Vec<Value>,
    /// Constraints object, or `null` for the defaults.
    pub constraints: Value,
}

impl TimetableRequest {
    /// Parses a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Search outcome for one run.
pub type SearchResult = GaResult<Candidate, Evaluation>;

/// Timetable generator for one set of input data.
///
/// # Example
/// ```
/// use serde_json::json;
/// use timetable_engine::engine::{TimetableEngine, TimetableRequest};
/// use timetable_engine::ga::GaConfig;
///
/// let request: TimetableRequest = serde_json::from_value(json!({
///     "students": [{ "id": "S1", "electives": "AI" }],
///     "faculty": [{ "id": "F1", "subjects": "AI", "maxHours": 1 }],
///     "rooms": [{ "id": "R1", "type": "lab" }],
/// }))
/// .unwrap();
///
/// let engine = TimetableEngine::new(&request).unwrap();
/// let output = engine.generate(&GaConfig::quick().with_seed(42)).unwrap();
/// assert_eq!(output.summary.optimization_score, 100);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableEngine {
    input: NormalizedInput,
    offerings: Vec<Offering>,
    constraints: Constraints,
}

impl TimetableEngine {
    /// Parses constraints, normalizes entities and derives offerings.
    pub fn new(request: &TimetableRequest) -> Result<Self, EngineError> {
        let constraints = Constraints::from_value(&request.constraints)?;
        let input = normalize_input(&request.students, &request.faculty, &request.rooms);
        Ok(Self::from_parts(input, constraints))
    }

    /// Builds an engine from already normalized input.
    pub fn from_parts(input: NormalizedInput, constraints: Constraints) -> Self {
        let offerings = derive_offerings(&input);
        Self {
            input,
            offerings,
            constraints,
        }
    }

    pub fn input(&self) -> &NormalizedInput {
        &self.input
    }

    /// Derived offerings in scheduling order.
    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Fitness evaluator over this engine's data.
    pub fn evaluator(&self) -> FitnessEvaluator<'_> {
        FitnessEvaluator::new(&self.input.faculty, &self.input.rooms, &self.constraints)
    }

    /// The search problem over this engine's data.
    pub fn problem(&self) -> TimetableProblem<'_> {
        TimetableProblem::new(
            SlotAssigner::new(&self.input, &self.offerings),
            self.evaluator(),
        )
    }

    /// Runs the population search, seeding from `config.seed`.
    pub fn search(&self, config: &GaConfig) -> Result<SearchResult, EngineError> {
        let result = GaRunner::run(&self.problem(), config)?;
        self.log_result(&result);
        Ok(result)
    }

    /// Runs the population search with a caller-supplied RNG.
    pub fn search_with_rng<R: Rng + ?Sized>(
        &self,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<SearchResult, EngineError> {
        let result = GaRunner::run_with_rng(&self.problem(), config, rng)?;
        self.log_result(&result);
        Ok(result)
    }

    /// Searches and formats the best candidate.
    pub fn generate(&self, config: &GaConfig) -> Result<TimetableOutput, EngineError> {
        let result = self.search(config)?;
        Ok(Self::format(result))
    }

    /// Formats a search result into the day → time view.
    pub fn format(result: SearchResult) -> TimetableOutput {
        TimetableOutput::from_candidate(&result.best, result.evaluation.conflicts)
    }

    fn log_result(&self, result: &SearchResult) {
        info!(
            offerings = self.offerings.len(),
            generations = result.generations,
            fitness = result.best_fitness(),
            conflicts = result.evaluation.conflicts.len(),
            assignments = result.best.assignment_count(),
            "timetable search finished"
        );
    }
}

/// One-shot generation: validate, normalize, derive, search, format.
pub fn generate_timetable(
    request: &TimetableRequest,
    config: &GaConfig,
) -> Result<TimetableOutput, EngineError> {
    config.validate()?;
    let engine = TimetableEngine::new(request)?;
    info!(
        students = engine.input.students.len(),
        faculty = engine.input.faculty.len(),
        rooms = engine.input.rooms.len(),
        population = config.population_size,
        generations = config.max_generations,
        "generating timetable"
    );
    engine.generate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConflictType, Day, TimeSlot};
    use crate::scheduler::tally;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn request(value: Value) -> TimetableRequest {
        serde_json::from_value(value).unwrap()
    }

    fn non_break_cells(output: &TimetableOutput) -> usize {
        output
            .schedule
            .values()
            .flat_map(|day| day.values())
            .flatten()
            .filter(|c| c.course_code != "LUNCH")
            .count()
    }

    #[test]
    fn test_single_elective_single_slot() {
        let req = request(json!({
            "students": [{ "id": "S1", "electives": "AI" }],
            "faculty": [{ "id": "F1", "subjects": "AI", "maxHours": 1 }],
            "rooms": [{ "id": "R1", "Room_Name": "Lab 1", "type": "lab" }],
        }));
        let output = generate_timetable(&req, &GaConfig::quick().with_seed(42)).unwrap();

        assert_eq!(non_break_cells(&output), 1);
        assert!(output.conflicts.is_empty());
        assert_eq!(output.summary.optimization_score, 100);
        assert_eq!(output.summary.total_slots, 6);
        let class = output
            .schedule
            .values()
            .flat_map(|day| day.values())
            .flatten()
            .find(|c| c.course_code != "LUNCH")
            .unwrap();
        assert_eq!(class.course_name, "AI");
        assert_eq!(class.room.as_deref(), Some("Lab 1"));
    }

    #[test]
    fn test_faculty_hours_respected() {
        let req = request(json!({
            "students": [
                { "id": "S1", "electives": "Physics" },
                { "id": "S2", "electives": "Physics" }
            ],
            "faculty": [{ "id": "F1", "subjects": "Physics", "maxHours": 1 }],
            "rooms": [{ "id": "R1" }],
        }));
        let engine = TimetableEngine::new(&req).unwrap();
        for seed in 0..5 {
            let result = engine.search(&GaConfig::quick().with_seed(seed)).unwrap();
            let hours = tally(&result.best, &engine.input().faculty);
            assert!(hours.values().all(|w| w.current_hours <= w.max_hours));
            assert_eq!(result.best.assignments_for_faculty("F1").len(), 1);
        }
    }

    #[test]
    fn test_no_faculty_only_breaks() {
        let req = request(json!({
            "students": [{ "id": "S1", "electives": "AI" }],
            "faculty": [],
            "rooms": [{ "id": "R1" }],
        }));
        let engine = TimetableEngine::new(&req).unwrap();
        assert!(engine.offerings().is_empty());

        let result = engine.search(&GaConfig::quick().with_seed(1)).unwrap();
        assert_eq!(result.best.assignment_count(), 5);
        assert_eq!(result.best.breaks().count(), 5);

        let output = TimetableEngine::format(result);
        assert_eq!(non_break_cells(&output), 0);
        for day in Day::WEEKDAYS {
            assert_eq!(output.cell(day, TimeSlot::LUNCH).len(), 1);
        }
    }

    #[test]
    fn test_forced_room_clash_reported() {
        let req = request(json!({
            "students": [{ "id": "S1" }],
            "faculty": [{ "id": "F1" }, { "id": "F2" }],
            "rooms": [{ "id": "R1" }],
        }));
        let engine = TimetableEngine::new(&req).unwrap();
        let f = &engine.input().faculty;
        let room = &engine.input().rooms[0];

        let mut candidate = Candidate::new();
        for id in ["A1", "A2"] {
            let faculty = if id == "A1" { &f[0] } else { &f[1] };
            candidate.add_assignment(crate::models::Assignment::new(
                id,
                "Forced",
                faculty,
                room,
                Day::Tuesday,
                TimeSlot::ElevenAm,
            ));
        }

        let evaluation = engine.evaluator().evaluate(&candidate);
        assert_eq!(evaluation.fitness, 900);
        assert_eq!(evaluation.conflicts.len(), 1);
        assert_eq!(evaluation.conflicts[0].conflict_type, ConflictType::RoomClash);

        let output = TimetableOutput::from_candidate(&candidate, evaluation.conflicts);
        assert_eq!(output.summary.conflict_count, 1);
        assert_eq!(output.summary.optimization_score, 90);
    }

    #[test]
    fn test_summary_matches_conflicts() {
        let req = request(json!({
            "students": (1..=30).map(|i| json!({ "id": format!("S{i}"), "electives": "Networks, Art" })).collect::<Vec<_>>(),
            "faculty": [
                { "id": "F1", "subjects": "Networks, Mathematics", "maxHours": 6 },
                { "id": "F2", "subjects": "Art, English" }
            ],
            "rooms": [{ "id": "R1", "type": "Lab" }, { "id": "R2", "capacity": 20 }],
            "constraints": { "ensureRoomCapacity": true }
        }));
        let engine = TimetableEngine::new(&req).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let config = GaConfig::quick().with_max_generations(3);
        let output = TimetableEngine::format(engine.search_with_rng(&config, &mut rng).unwrap());

        let n = output.summary.conflict_count;
        assert_eq!(n, output.conflicts.len());
        let expected = if n == 0 { 100 } else { 100u32.saturating_sub(10 * n as u32) };
        assert_eq!(output.summary.optimization_score, expected);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let req = request(json!({
            "students": (1..=8).map(|i| json!({ "id": format!("S{i}"), "electives": "Cloud Computing" })).collect::<Vec<_>>(),
            "faculty": [{ "id": "F1", "subjects": "Cloud Computing, Biology" }],
            "rooms": [{ "id": "R1", "type": "lab" }, { "id": "R2" }],
        }));
        let config = GaConfig::quick().with_seed(7);
        let a = generate_timetable(&req, &config).unwrap();
        let b = generate_timetable(&req, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wire_shape() {
        let req = request(json!({
            "students": [{ "id": "S1", "electives": "AI" }],
            "faculty": [{ "id": "F1", "Faculty_Name": "Dr. Rao", "subjects": "AI", "maxHours": 1 }],
            "rooms": [{ "id": "R1", "type": "lab" }],
            "constraints": null
        }));
        let output = generate_timetable(&req, &GaConfig::quick().with_seed(3)).unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["schedule"].as_object().unwrap().len(), 7);
        assert_eq!(json["schedule"]["Saturday"], json!({}));
        assert_eq!(json["schedule"]["Monday"]["1:00 PM"][0]["courseCode"], "LUNCH");
        assert_eq!(json["summary"]["totalSlots"], 6);
        assert_eq!(json["summary"]["optimizationScore"], 100);
        assert_eq!(json["conflicts"], json!([]));
    }

    #[test]
    fn test_rejects_bad_constraints() {
        let req = request(json!({ "constraints": [1, 2] }));
        assert!(matches!(
            TimetableEngine::new(&req),
            Err(EngineError::InvalidConstraints(_))
        ));

        let req = request(json!({ "constraints": { "ensureRoomCapacity": "yes" } }));
        assert!(matches!(
            generate_timetable(&req, &GaConfig::quick()),
            Err(EngineError::InvalidConstraints(_))
        ));
    }

    #[test]
    fn test_rejects_bad_config() {
        let req = TimetableRequest::default();
        assert!(matches!(
            generate_timetable(&req, &GaConfig::quick().with_max_generations(0)),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_request_parse_error() {
        assert!(matches!(
            TimetableRequest::from_json("{ not json"),
            Err(EngineError::InvalidRequest(_))
        ));
        let empty = TimetableRequest::from_json("{}").unwrap();
        assert!(empty.students.is_empty());
        assert!(empty.constraints.is_null());
    }
}
