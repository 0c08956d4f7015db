//! Pillar-major projection.
//!
//! # Invariants
//! - One lane per pillar, in pillar order, even when the lane has no blocks.
//! - Blocks follow timeframe order; absent or empty groups produce no block.

use crate::model::roadmap::{PillarId, RoadmapData, TimeframeId};
use crate::projection::index::{traverse, Major};
use crate::projection::palette::{pillar_colors, PillarColor};
use serde::Serialize;

/// One pillar's deliverables for one timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarBlock {
    pub timeframe_id: TimeframeId,
    pub date: String,
    pub name: String,
    pub tasks: Vec<String>,
}

/// One pillar with its populated timeframes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarLane {
    pub pillar_id: PillarId,
    pub pillar_name: String,
    pub color: PillarColor,
    pub blocks: Vec<PillarBlock>,
}

impl PillarLane {
    /// Returns the block for `timeframe_id`, if that cell is populated.
    pub fn block(&self, timeframe_id: &str) -> Option<&PillarBlock> {
        self.blocks
            .iter()
            .find(|block| block.timeframe_id == timeframe_id)
    }
}

/// Pillar-grouped view of a roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarView {
    pub lanes: Vec<PillarLane>,
}

impl PillarView {
    pub fn lane(&self, pillar_id: &str) -> Option<&PillarLane> {
        self.lanes.iter().find(|lane| lane.pillar_id == pillar_id)
    }
}

/// Projects `data` into pillar-major order.
pub fn project_pillars(data: &RoadmapData) -> PillarView {
    let colors = pillar_colors(data);
    let lanes = traverse(data, Major::Pillar)
        .into_iter()
        .zip(data.pillars.iter().zip(colors))
        .map(|(cells, (pillar, color))| PillarLane {
            pillar_id: pillar.id.clone(),
            pillar_name: pillar.name.clone(),
            color,
            blocks: cells
                .into_iter()
                .map(|cell| PillarBlock {
                    timeframe_id: cell.timeframe.id.clone(),
                    date: cell.timeframe.date.clone(),
                    name: cell.timeframe.name.clone(),
                    tasks: cell.tasks.to_vec(),
                })
                .collect(),
        })
        .collect();
    PillarView { lanes }
}
