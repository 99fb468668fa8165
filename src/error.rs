//! Engine error type.

use crate::normalize::{EntityKind, Field};

/// Errors raised by the engine.
///
/// `MissingField` is record-level: the normalizer skips the record and the
/// run continues. The remaining variants reject the run before generation
/// starts.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{entity} record is missing required field `{field}`")]
    MissingField { entity: EntityKind, field: Field },
    #[error("malformed constraints: {0}")]
    InvalidConstraints(String),
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}
