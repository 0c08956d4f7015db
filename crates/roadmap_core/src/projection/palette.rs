//! Deterministic pillar colors.
//!
//! # Invariants
//! - Color is a pure function of a pillar's ordinal position.
//! - `color_for_index(i) == color_for_index(i + k * PALETTE.len())`.

use crate::model::roadmap::RoadmapData;
use serde::Serialize;

/// Display color assigned to one pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PillarColor {
    /// Human-readable name, used in image prompts.
    pub name: &'static str,
    /// `#RRGGBB` value for renderers.
    pub hex: &'static str,
}

pub const PALETTE: [PillarColor; 6] = [
    PillarColor {
        name: "blue",
        hex: "#3B82F6",
    },
    PillarColor {
        name: "emerald",
        hex: "#10B981",
    },
    PillarColor {
        name: "amber",
        hex: "#F59E0B",
    },
    PillarColor {
        name: "rose",
        hex: "#F43F5E",
    },
    PillarColor {
        name: "violet",
        hex: "#8B5CF6",
    },
    PillarColor {
        name: "cyan",
        hex: "#06B6D4",
    },
];

pub fn palette_size() -> usize {
    PALETTE.len()
}

pub fn color_for_index(index: usize) -> PillarColor {
    PALETTE[index % PALETTE.len()]
}

/// Colors for every pillar of one record, computed once per render.
pub fn pillar_colors(data: &RoadmapData) -> Vec<PillarColor> {
    (0..data.pillars.len()).map(color_for_index).collect()
}
