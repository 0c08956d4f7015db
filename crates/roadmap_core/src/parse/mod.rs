//! Intake of externally produced roadmap payloads.
//!
//! # Responsibility
//! - Turn raw collaborator text into an accepted canonical record.
//! - Reject malformed payloads as a whole; never keep a partial record.
//!
//! # Invariants
//! - Pipeline order is: fence strip -> JSON decode -> schema gate -> normalize.

use crate::model::roadmap::RoadmapData;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod normalize;
pub mod validator;

pub use normalize::{normalize_roadmap, split_timeframe_label, strip_code_fence};
pub use validator::{accept_candidate, validate_candidate, SchemaViolation};

/// Errors from decoding a raw roadmap payload.
#[derive(Debug)]
pub enum ParseError {
    /// Payload text is not JSON at all.
    InvalidJson(serde_json::Error),
    /// Payload is JSON but violates the roadmap schema.
    Schema(SchemaViolation),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "roadmap payload is not valid JSON: {err}"),
            Self::Schema(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::Schema(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

impl From<SchemaViolation> for ParseError {
    fn from(value: SchemaViolation) -> Self {
        Self::Schema(value)
    }
}

/// Decodes, validates and normalizes one raw payload.
pub fn parse_roadmap_json(text: &str) -> Result<RoadmapData, ParseError> {
    let candidate: serde_json::Value = serde_json::from_str(strip_code_fence(text))?;
    let data = accept_candidate(candidate)?;
    Ok(normalize_roadmap(data))
}
