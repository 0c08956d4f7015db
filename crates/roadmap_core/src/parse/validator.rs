//! Schema gate for externally produced roadmap candidates.
//!
//! # Responsibility
//! - Confirm `pillars` and `timeframes` exist and are lists.
//! - Convert an accepted candidate into the typed canonical record.
//!
//! # Invariants
//! - No best-effort coercion: a failed check rejects the whole candidate.
//! - Nested shapes are trusted to the producer beyond typed decoding.

use crate::model::roadmap::RoadmapData;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_LIST_FIELDS: [&str; 2] = ["pillars", "timeframes"];

/// Candidate does not match the roadmap parse contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// Candidate is not a JSON object.
    NotAnObject,
    /// Required list field is absent.
    MissingField(&'static str),
    /// Required field is present but not a list.
    NotAList(&'static str),
    /// Shape check passed but nested fields failed typed decoding.
    Malformed(String),
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "roadmap payload must be a JSON object"),
            Self::MissingField(field) => {
                write!(f, "roadmap payload is missing required field `{field}`")
            }
            Self::NotAList(field) => {
                write!(f, "roadmap payload field `{field}` must be a list")
            }
            Self::Malformed(details) => write!(f, "roadmap payload is malformed: {details}"),
        }
    }
}

impl Error for SchemaViolation {}

/// Checks the top-level shape of a candidate.
///
/// # Errors
/// - `NotAnObject` when the candidate is not a JSON object.
/// - `MissingField` / `NotAList` for the first offending required field.
pub fn validate_candidate(candidate: &Value) -> Result<(), SchemaViolation> {
    let object = candidate.as_object().ok_or(SchemaViolation::NotAnObject)?;
    for field in REQUIRED_LIST_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) => return Err(SchemaViolation::MissingField(field)),
            Some(Value::Array(_)) => {}
            Some(_) => return Err(SchemaViolation::NotAList(field)),
        }
    }
    Ok(())
}

/// Validates a candidate and decodes it into [`RoadmapData`].
pub fn accept_candidate(candidate: Value) -> Result<RoadmapData, SchemaViolation> {
    validate_candidate(&candidate)?;
    serde_json::from_value(candidate).map_err(|err| SchemaViolation::Malformed(err.to_string()))
}
