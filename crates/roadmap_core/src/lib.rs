//! Core domain logic for the roadmap planner.
//! This crate is the single source of truth for roadmap invariants.

pub mod edit;
pub mod logging;
pub mod model;
pub mod parse;
pub mod projection;
pub mod prompt;
pub mod service;

pub use edit::{apply, apply_edit, EditOutcome, EditTarget, StaleAddress};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::roadmap::{
    DeliverableGroup, Pillar, PillarId, RoadmapData, StructuralIssue, Timeframe, TimeframeId,
};
pub use parse::{parse_roadmap_json, validate_candidate, ParseError, SchemaViolation};
pub use projection::{
    color_for_index, palette_size, project_pillars, project_timeline, PillarColor, PillarView,
    TimelineView,
};
pub use prompt::build_image_prompt;
pub use service::roadmap_session::{RoadmapError, RoadmapParser, RoadmapSession, UpstreamError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
