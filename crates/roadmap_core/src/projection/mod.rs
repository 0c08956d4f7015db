//! Read-only regroupings of the canonical record.
//!
//! # Responsibility
//! - Derive the pillar-major and timeframe-major views.
//! - Assign each pillar one color shared by both views.
//!
//! # Invariants
//! - Projections never alter the record they read.
//! - Both views enumerate the same set of non-empty `(pillar, timeframe)` cells.
//! - Groups whose pillar id is unknown are never rendered.

pub(crate) mod index;
pub mod palette;
pub mod pillar_view;
pub mod timeline_view;

pub use palette::{color_for_index, palette_size, pillar_colors, PillarColor, PALETTE};
pub use pillar_view::{project_pillars, PillarBlock, PillarLane, PillarView};
pub use timeline_view::{
    project_timeline, TimelineColumn, TimelineEntry, TimelineLayout, TimelineView,
};
