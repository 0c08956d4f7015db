//! Shared traversal behind both roadmap views.
//!
//! Both projectors visit the same `(pillar, timeframe)` grid and differ only in
//! which axis is the outer loop, so they share one index and one traversal.

use crate::model::roadmap::{Pillar, RoadmapData, Timeframe};
use std::collections::HashMap;

/// Non-empty task lists keyed by `(timeframe position, pillar id)`.
///
/// When a timeframe holds several groups for one pillar the first one wins,
/// matching a linear first-match scan.
pub(crate) struct DeliverableIndex<'a> {
    by_cell: HashMap<(usize, &'a str), &'a [String]>,
}

impl<'a> DeliverableIndex<'a> {
    pub(crate) fn build(data: &'a RoadmapData) -> Self {
        let mut by_cell = HashMap::new();
        for (timeframe_index, timeframe) in data.timeframes.iter().enumerate() {
            for group in &timeframe.deliverables {
                by_cell
                    .entry((timeframe_index, group.pillar_id.as_str()))
                    .or_insert(group.tasks.as_slice());
            }
        }
        Self { by_cell }
    }

    /// Returns the tasks for one cell, treating empty lists as absent.
    pub(crate) fn tasks(
        &self,
        timeframe_index: usize,
        pillar_id: &'a str,
    ) -> Option<&'a [String]> {
        self.by_cell
            .get(&(timeframe_index, pillar_id))
            .copied()
            .filter(|tasks| !tasks.is_empty())
    }
}

/// Which axis drives the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Major {
    Pillar,
    Timeframe,
}

/// One populated `(pillar, timeframe)` cell.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell<'a> {
    pub(crate) pillar_index: usize,
    pub(crate) pillar: &'a Pillar,
    pub(crate) timeframe: &'a Timeframe,
    pub(crate) tasks: &'a [String],
}

/// Walks the grid with `major` as the outer axis.
///
/// Returns one row per outer item (every pillar or every timeframe, even when
/// it ends up with no cells), each holding its populated cells in inner order.
pub(crate) fn traverse(data: &RoadmapData, major: Major) -> Vec<Vec<Cell<'_>>> {
    let index = DeliverableIndex::build(data);
    let (outer_len, inner_len) = match major {
        Major::Pillar => (data.pillars.len(), data.timeframes.len()),
        Major::Timeframe => (data.timeframes.len(), data.pillars.len()),
    };

    (0..outer_len)
        .map(|outer| {
            (0..inner_len)
                .filter_map(|inner| {
                    let (pillar_index, timeframe_index) = match major {
                        Major::Pillar => (outer, inner),
                        Major::Timeframe => (inner, outer),
                    };
                    let pillar = &data.pillars[pillar_index];
                    let timeframe = &data.timeframes[timeframe_index];
                    index
                        .tasks(timeframe_index, &pillar.id)
                        .map(|tasks| Cell {
                            pillar_index,
                            pillar,
                            timeframe,
                            tasks,
                        })
                })
                .collect()
        })
        .collect()
}
