//! Path-addressed, copy-on-write edits.
//!
//! # Responsibility
//! - Apply one single-field change to a copy of the canonical record.
//! - Classify addresses that no longer resolve.
//!
//! # Invariants
//! - The input record is never mutated; the result never aliases it.
//! - Resolution never fails: stale addresses degrade to a no-op on the copy.
//! - A task write outside the current list bounds is dropped, never padded.
//! - Editing a task for a pillar without a group appends an empty group first.

use crate::model::roadmap::{DeliverableGroup, PillarId, RoadmapData, TimeframeId};
use log::debug;
use std::fmt::{Display, Formatter};

/// Address of the single field an edit targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Title,
    Subtitle,
    PillarName {
        pillar_id: PillarId,
    },
    TimeframeDate {
        timeframe_id: TimeframeId,
    },
    TimeframeName {
        timeframe_id: TimeframeId,
    },
    /// One task string, addressed by timeframe, pillar and position.
    Task {
        timeframe_id: TimeframeId,
        pillar_id: PillarId,
        task_index: usize,
    },
}

impl EditTarget {
    pub fn task(
        timeframe_id: impl Into<TimeframeId>,
        pillar_id: impl Into<PillarId>,
        task_index: usize,
    ) -> Self {
        Self::Task {
            timeframe_id: timeframe_id.into(),
            pillar_id: pillar_id.into(),
            task_index,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::PillarName { .. } => "pillar_name",
            Self::TimeframeDate { .. } => "timeframe_date",
            Self::TimeframeName { .. } => "timeframe_name",
            Self::Task { .. } => "task",
        }
    }
}

/// Why an edit address did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleAddress {
    /// No canonical record is loaded yet.
    NoRecord,
    TimeframeNotFound(TimeframeId),
    PillarNotFound(PillarId),
    TaskIndexOutOfBounds {
        timeframe_id: TimeframeId,
        pillar_id: PillarId,
        task_index: usize,
        len: usize,
    },
}

impl Display for StaleAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecord => write!(f, "no roadmap loaded"),
            Self::TimeframeNotFound(id) => write!(f, "timeframe not found: {id}"),
            Self::PillarNotFound(id) => write!(f, "pillar not found: {id}"),
            Self::TaskIndexOutOfBounds {
                timeframe_id,
                pillar_id,
                task_index,
                len,
            } => write!(
                f,
                "task index {task_index} out of bounds ({len}) for pillar {pillar_id} in timeframe {timeframe_id}"
            ),
        }
    }
}

/// What happened to the requested write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Address did not resolve; the write was dropped.
    Dropped(StaleAddress),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Overwrites one task and returns the new record.
///
/// Mirrors the UI edit callback `onEdit(timeframeId, pillarId, taskIndex,
/// newText)`. Unknown timeframes and out-of-range indexes leave the copy
/// unchanged apart from a possibly appended empty group.
pub fn apply(
    current: &RoadmapData,
    timeframe_id: &str,
    pillar_id: &str,
    task_index: usize,
    new_text: &str,
) -> RoadmapData {
    apply_edit(
        current,
        &EditTarget::task(timeframe_id, pillar_id, task_index),
        new_text,
    )
}

/// Applies any single-field edit and returns the new record.
pub fn apply_edit(current: &RoadmapData, target: &EditTarget, new_text: &str) -> RoadmapData {
    apply_edit_with_outcome(current, target, new_text).0
}

/// Applies an edit and reports whether the write landed.
pub fn apply_edit_with_outcome(
    current: &RoadmapData,
    target: &EditTarget,
    new_text: &str,
) -> (RoadmapData, EditOutcome) {
    let mut next = current.clone();
    let outcome = match write_field(&mut next, target, new_text) {
        Ok(()) => EditOutcome::Applied,
        Err(stale) => {
            debug!(
                "event=edit_dropped module=edit status=stale target={} reason=\"{}\"",
                target.label(),
                stale
            );
            EditOutcome::Dropped(stale)
        }
    };
    (next, outcome)
}

fn write_field(
    data: &mut RoadmapData,
    target: &EditTarget,
    new_text: &str,
) -> Result<(), StaleAddress> {
    match target {
        EditTarget::Title => data.title = new_text.to_string(),
        EditTarget::Subtitle => data.subtitle = new_text.to_string(),
        EditTarget::PillarName { pillar_id } => {
            data.pillar_mut(pillar_id)
                .ok_or_else(|| StaleAddress::PillarNotFound(pillar_id.clone()))?
                .name = new_text.to_string();
        }
        EditTarget::TimeframeDate { timeframe_id } => {
            data.timeframe_mut(timeframe_id)
                .ok_or_else(|| StaleAddress::TimeframeNotFound(timeframe_id.clone()))?
                .date = new_text.to_string();
        }
        EditTarget::TimeframeName { timeframe_id } => {
            data.timeframe_mut(timeframe_id)
                .ok_or_else(|| StaleAddress::TimeframeNotFound(timeframe_id.clone()))?
                .name = new_text.to_string();
        }
        EditTarget::Task {
            timeframe_id,
            pillar_id,
            task_index,
        } => write_task(data, timeframe_id, pillar_id, *task_index, new_text)?,
    }
    Ok(())
}

fn write_task(
    data: &mut RoadmapData,
    timeframe_id: &str,
    pillar_id: &str,
    task_index: usize,
    new_text: &str,
) -> Result<(), StaleAddress> {
    let timeframe = data
        .timeframe_mut(timeframe_id)
        .ok_or_else(|| StaleAddress::TimeframeNotFound(timeframe_id.to_string()))?;

    let position = match timeframe
        .deliverables
        .iter()
        .position(|group| group.pillar_id == pillar_id)
    {
        Some(position) => position,
        None => {
            timeframe
                .deliverables
                .push(DeliverableGroup::new(pillar_id, Vec::new()));
            timeframe.deliverables.len() - 1
        }
    };

    let tasks = &mut timeframe.deliverables[position].tasks;
    let len = tasks.len();
    let slot = tasks
        .get_mut(task_index)
        .ok_or_else(|| StaleAddress::TaskIndexOutOfBounds {
            timeframe_id: timeframe_id.to_string(),
            pillar_id: pillar_id.to_string(),
            task_index,
            len,
        })?;
    *slot = new_text.to_string();
    Ok(())
}
