//! Timeframe-major projection.
//!
//! # Responsibility
//! - Group deliverables into one column per timeframe.
//! - Tag every entry with its pillar's deterministic color.
//! - Track column sizes for horizontally scrolling boards.
//!
//! # Invariants
//! - Columns follow timeframe order; every timeframe yields a column.
//! - Entries follow pillar order, not the order groups were declared in.
//! - An entry's color equals the color of the same pillar in the pillar view.

use crate::model::roadmap::{PillarId, RoadmapData, TimeframeId};
use crate::projection::index::{traverse, Major};
use crate::projection::palette::{pillar_colors, PillarColor};
use serde::Serialize;

/// One pillar's tasks inside a timeframe column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub pillar_id: PillarId,
    pub pillar_name: String,
    pub tasks: Vec<String>,
    pub color: PillarColor,
}

/// One timeframe column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineColumn {
    pub timeframe_id: TimeframeId,
    pub date: String,
    pub name: String,
    pub entries: Vec<TimelineEntry>,
    /// Sum of task counts over `entries`.
    pub task_count: usize,
}

impl TimelineColumn {
    pub fn entry(&self, pillar_id: &str) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.pillar_id == pillar_id)
    }
}

/// Horizontal layout bookkeeping for the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimelineLayout {
    pub column_count: usize,
    /// Largest number of pillar entries in any column.
    pub max_entries: usize,
    /// Largest `task_count` of any column.
    pub max_tasks: usize,
    /// Columns without any entries.
    pub empty_columns: usize,
}

/// Timeframe-grouped view of a roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub columns: Vec<TimelineColumn>,
    pub layout: TimelineLayout,
}

impl TimelineView {
    pub fn column(&self, timeframe_id: &str) -> Option<&TimelineColumn> {
        self.columns
            .iter()
            .find(|column| column.timeframe_id == timeframe_id)
    }
}

/// Projects `data` into timeframe-major order.
pub fn project_timeline(data: &RoadmapData) -> TimelineView {
    let colors = pillar_colors(data);
    let columns: Vec<TimelineColumn> = traverse(data, Major::Timeframe)
        .into_iter()
        .zip(&data.timeframes)
        .map(|(cells, timeframe)| {
            let entries: Vec<TimelineEntry> = cells
                .into_iter()
                .map(|cell| TimelineEntry {
                    pillar_id: cell.pillar.id.clone(),
                    pillar_name: cell.pillar.name.clone(),
                    tasks: cell.tasks.to_vec(),
                    color: colors[cell.pillar_index],
                })
                .collect();
            TimelineColumn {
                timeframe_id: timeframe.id.clone(),
                date: timeframe.date.clone(),
                name: timeframe.name.clone(),
                task_count: entries.iter().map(|entry| entry.tasks.len()).sum(),
                entries,
            }
        })
        .collect();

    let layout = measure(&columns);
    TimelineView { columns, layout }
}

fn measure(columns: &[TimelineColumn]) -> TimelineLayout {
    columns.iter().fold(
        TimelineLayout {
            column_count: columns.len(),
            ..TimelineLayout::default()
        },
        |mut layout, column| {
            layout.max_entries = layout.max_entries.max(column.entries.len());
            layout.max_tasks = layout.max_tasks.max(column.task_count);
            if column.entries.is_empty() {
                layout.empty_columns += 1;
            }
            layout
        },
    )
}
