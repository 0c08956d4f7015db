//! Roadmap record types.
//!
//! # Responsibility
//! - Define `RoadmapData` and its nested pillar/timeframe/deliverable shapes.
//! - Provide lookup helpers and structural diagnostics.
//!
//! # Invariants
//! - Wire field names match the parse contract (`pillarId` is camelCase).
//! - Lookups return the first match in list order.
//! - Diagnostics report problems; they never reject or repair data.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Short stable pillar token, e.g. `p1`.
pub type PillarId = String;

/// Stable timeframe token, e.g. `t1`.
pub type TimeframeId = String;

/// Named strategic category deliverables are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: PillarId,
    #[serde(default)]
    pub name: String,
}

impl Pillar {
    pub fn new(id: impl Into<PillarId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One pillar's task list for one timeframe.
///
/// An empty `tasks` list means "nothing this period" and is treated as absent
/// by every projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableGroup {
    #[serde(rename = "pillarId")]
    pub pillar_id: PillarId,
    /// Position is part of the edit address; never reorder.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<String>,
}

impl DeliverableGroup {
    pub fn new(pillar_id: impl Into<PillarId>, tasks: Vec<String>) -> Self {
        Self {
            pillar_id: pillar_id.into(),
            tasks,
        }
    }

    /// Returns whether this group has no tasks to render.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Named, dated period of the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub id: TimeframeId,
    /// Display date string, e.g. `2025 - Q1 & Q2`.
    #[serde(default)]
    pub date: String,
    /// Display name, e.g. `Build-out`.
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deliverables: Vec<DeliverableGroup>,
}

impl Timeframe {
    pub fn new(
        id: impl Into<TimeframeId>,
        date: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            name: name.into(),
            deliverables: Vec::new(),
        }
    }

    /// Builder-style helper used by fixtures and importers.
    pub fn with_group(mut self, pillar_id: impl Into<PillarId>, tasks: &[&str]) -> Self {
        self.deliverables.push(DeliverableGroup::new(
            pillar_id,
            tasks.iter().map(|task| (*task).to_string()).collect(),
        ));
        self
    }

    /// Returns the first deliverable group for `pillar_id`.
    pub fn group(&self, pillar_id: &str) -> Option<&DeliverableGroup> {
        self.deliverables
            .iter()
            .find(|group| group.pillar_id == pillar_id)
    }

    /// Returns `date: name`, or whichever half is present.
    pub fn label(&self) -> String {
        match (self.date.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{}: {}", self.date, self.name),
            (false, true) => self.date.clone(),
            (true, false) => self.name.clone(),
            (true, true) => self.id.clone(),
        }
    }
}

/// Canonical roadmap record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub pillars: Vec<Pillar>,
    pub timeframes: Vec<Timeframe>,
}

impl RoadmapData {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            pillars: Vec::new(),
            timeframes: Vec::new(),
        }
    }

    pub fn pillar_mut(&mut self, pillar_id: &str) -> Option<&mut Pillar> {
        self.pillars.iter_mut().find(|pillar| pillar.id == pillar_id)
    }

    pub fn timeframe_mut(&mut self, timeframe_id: &str) -> Option<&mut Timeframe> {
        self.timeframes
            .iter_mut()
            .find(|timeframe| timeframe.id == timeframe_id)
    }

    /// Total number of task strings across all groups.
    pub fn task_count(&self) -> usize {
        self.timeframes
            .iter()
            .flat_map(|timeframe| timeframe.deliverables.iter())
            .map(|group| group.tasks.len())
            .sum()
    }

    /// Lists structural problems in producer order.
    ///
    /// Dangling pillar references are tolerated by the projectors (they are
    /// simply never rendered), so this is diagnostic output only.
    pub fn structural_issues(&self) -> Vec<StructuralIssue> {
        let mut issues = Vec::new();

        let mut seen_pillars = HashSet::new();
        for pillar in &self.pillars {
            if !seen_pillars.insert(pillar.id.as_str()) {
                issues.push(StructuralIssue::DuplicatePillarId(pillar.id.clone()));
            }
        }

        let mut seen_timeframes = HashSet::new();
        for timeframe in &self.timeframes {
            if !seen_timeframes.insert(timeframe.id.as_str()) {
                issues.push(StructuralIssue::DuplicateTimeframeId(timeframe.id.clone()));
            }

            let mut seen_groups = HashSet::new();
            for group in &timeframe.deliverables {
                if !seen_groups.insert(group.pillar_id.as_str()) {
                    issues.push(StructuralIssue::DuplicateGroup {
                        timeframe_id: timeframe.id.clone(),
                        pillar_id: group.pillar_id.clone(),
                    });
                }
                if !seen_pillars.contains(group.pillar_id.as_str()) {
                    issues.push(StructuralIssue::DanglingPillarRef {
                        timeframe_id: timeframe.id.clone(),
                        pillar_id: group.pillar_id.clone(),
                    });
                }
            }
        }

        issues
    }
}

/// Treats an explicit `null` list like an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structural problem found by [`RoadmapData::structural_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralIssue {
    DuplicatePillarId(PillarId),
    DuplicateTimeframeId(TimeframeId),
    /// More than one group for the same pillar inside one timeframe.
    DuplicateGroup {
        timeframe_id: TimeframeId,
        pillar_id: PillarId,
    },
    /// Group references a pillar id missing from `pillars`.
    DanglingPillarRef {
        timeframe_id: TimeframeId,
        pillar_id: PillarId,
    },
}

impl Display for StructuralIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePillarId(id) => write!(f, "duplicate pillar id: {id}"),
            Self::DuplicateTimeframeId(id) => write!(f, "duplicate timeframe id: {id}"),
            Self::DuplicateGroup {
                timeframe_id,
                pillar_id,
            } => write!(
                f,
                "duplicate deliverable group for pillar {pillar_id} in timeframe {timeframe_id}"
            ),
            Self::DanglingPillarRef {
                timeframe_id,
                pillar_id,
            } => write!(
                f,
                "timeframe {timeframe_id} references unknown pillar {pillar_id}"
            ),
        }
    }
}
