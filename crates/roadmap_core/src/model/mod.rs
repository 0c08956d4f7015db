//! Canonical roadmap data model.
//!
//! # Responsibility
//! - Define the single authoritative record every view is derived from.
//! - Keep one shape for both pillar-major and timeframe-major projections.
//!
//! # Invariants
//! - `pillars`, `timeframes` and `tasks` keep producer order; core never sorts.
//! - At most one deliverable group exists per `(timeframe, pillar)` pair.
//! - Records are replaced, never mutated in place, once accepted.

pub mod roadmap;
