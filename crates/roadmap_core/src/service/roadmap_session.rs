//! Roadmap session use-case service.
//!
//! # Responsibility
//! - Own the current canonical record for one editing session.
//! - Route parse results and edits through validation and the resolver.
//! - Expose both projections and the image prompt of the current record.
//!
//! # Invariants
//! - The record is only ever replaced, never mutated in place.
//! - A failed load leaves the previous record authoritative.
//! - Edits apply in call order against the latest record.
//! - Log lines carry ids and counts only, never roadmap text.

use crate::edit::{apply_edit_with_outcome, EditOutcome, EditTarget, StaleAddress};
use crate::model::roadmap::RoadmapData;
use crate::parse::{parse_roadmap_json, ParseError, SchemaViolation};
use crate::projection::{project_pillars, project_timeline, PillarView, TimelineView};
use crate::prompt::build_image_prompt;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Error type returned by a text-understanding collaborator.
pub type UpstreamError = Box<dyn Error + Send + Sync>;

/// External text-understanding collaborator.
///
/// Turns freeform roadmap prose into a JSON payload following the roadmap
/// parse contract. Implementations live outside the core.
pub trait RoadmapParser {
    fn parse(&self, source_text: &str) -> Result<String, UpstreamError>;
}

impl<F> RoadmapParser for F
where
    F: Fn(&str) -> Result<String, UpstreamError>,
{
    fn parse(&self, source_text: &str) -> Result<String, UpstreamError> {
        self(source_text)
    }
}

/// Errors surfaced to session callers.
#[derive(Debug)]
pub enum RoadmapError {
    /// Source text is blank after trim; the collaborator is not called.
    EmptySource,
    /// Payload violates the roadmap schema.
    SchemaViolation(SchemaViolation),
    /// Collaborator failed or returned an unusable payload.
    UpstreamFailure(String),
}

impl Display for RoadmapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySource => write!(f, "roadmap description must not be blank"),
            Self::SchemaViolation(err) => write!(f, "{err}"),
            Self::UpstreamFailure(message) => write!(f, "roadmap parsing failed: {message}"),
        }
    }
}

impl Error for RoadmapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SchemaViolation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for RoadmapError {
    fn from(value: ParseError) -> Self {
        match value {
            ParseError::Schema(err) => Self::SchemaViolation(err),
            ParseError::InvalidJson(err) => {
                Self::UpstreamFailure(format!("payload is not valid JSON: {err}"))
            }
        }
    }
}

/// Holder of the canonical record for one session.
#[derive(Debug, Clone)]
pub struct RoadmapSession {
    id: Uuid,
    current: Option<RoadmapData>,
    revision: u64,
}

impl Default for RoadmapSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadmapSession {
    /// Creates an empty session with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current: None,
            revision: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current canonical record, if a load has succeeded.
    pub fn current(&self) -> Option<&RoadmapData> {
        self.current.as_ref()
    }

    /// Number of accepted record replacements (loads and edits).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Runs the collaborator on `source_text` and accepts its payload.
    ///
    /// # Errors
    /// - `EmptySource` when `source_text` is blank.
    /// - `UpstreamFailure` when the collaborator errors or returns non-JSON.
    /// - `SchemaViolation` when the payload misses required lists.
    pub fn load_from_parser<P: RoadmapParser + ?Sized>(
        &mut self,
        parser: &P,
        source_text: &str,
    ) -> Result<&RoadmapData, RoadmapError> {
        if source_text.trim().is_empty() {
            return Err(RoadmapError::EmptySource);
        }
        let payload = parser.parse(source_text).map_err(|err| {
            warn!(
                "event=roadmap_load module=service status=error session={} kind=upstream",
                self.id
            );
            RoadmapError::UpstreamFailure(err.to_string())
        })?;
        self.load_json(&payload)
    }

    /// Accepts a JSON payload directly.
    ///
    /// # Errors
    /// Same as [`Self::load_from_parser`], minus the collaborator call.
    pub fn load_json(&mut self, payload: &str) -> Result<&RoadmapData, RoadmapError> {
        let data = parse_roadmap_json(payload).map_err(|err| {
            let error = RoadmapError::from(err);
            warn!(
                "event=roadmap_load module=service status=error session={} kind={}",
                self.id,
                error_kind(&error)
            );
            error
        })?;
        Ok(self.replace(data))
    }

    /// Replaces the record with an already validated one.
    pub fn replace(&mut self, data: RoadmapData) -> &RoadmapData {
        for issue in data.structural_issues() {
            warn!(
                "event=roadmap_structure module=service status=warn session={} issue=\"{}\"",
                self.id, issue
            );
        }
        info!(
            "event=roadmap_load module=service status=ok session={} pillars={} timeframes={} tasks={}",
            self.id,
            data.pillars.len(),
            data.timeframes.len(),
            data.task_count()
        );
        self.revision += 1;
        self.current.insert(data)
    }

    /// Edit callback for inline task edits.
    ///
    /// No-op without a loaded record.
    pub fn on_edit(
        &mut self,
        timeframe_id: &str,
        pillar_id: &str,
        task_index: usize,
        new_text: &str,
    ) -> EditOutcome {
        self.edit(
            &EditTarget::task(timeframe_id, pillar_id, task_index),
            new_text,
        )
    }

    /// Applies any single-field edit to the current record.
    ///
    /// The record is swapped for the resolver's copy even when the write is
    /// dropped, since resolving a task address may append an empty group.
    pub fn edit(&mut self, target: &EditTarget, new_text: &str) -> EditOutcome {
        let Some(current) = self.current.as_ref() else {
            warn!(
                "event=roadmap_edit module=service status=skipped session={} reason=no_record",
                self.id
            );
            return EditOutcome::Dropped(StaleAddress::NoRecord);
        };

        let (next, outcome) = apply_edit_with_outcome(current, target, new_text);
        self.current = Some(next);
        self.revision += 1;
        info!(
            "event=roadmap_edit module=service status={} session={} revision={}",
            if outcome.is_applied() { "ok" } else { "dropped" },
            self.id,
            self.revision
        );
        outcome
    }

    /// Pillar-major view of the current record.
    pub fn pillar_view(&self) -> Option<PillarView> {
        self.current.as_ref().map(project_pillars)
    }

    /// Timeframe-major view of the current record.
    pub fn timeline_view(&self) -> Option<TimelineView> {
        self.current.as_ref().map(project_timeline)
    }

    /// Image-generation prompt for the current record.
    pub fn image_prompt(&self) -> Option<String> {
        self.current.as_ref().map(build_image_prompt)
    }
}

fn error_kind(error: &RoadmapError) -> &'static str {
    match error {
        RoadmapError::EmptySource => "empty_source",
        RoadmapError::SchemaViolation(_) => "schema_violation",
        RoadmapError::UpstreamFailure(_) => "upstream",
    }
}
