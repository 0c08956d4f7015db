//! Normalization of producer output into canonical form.
//!
//! # Responsibility
//! - Strip Markdown code fences that language models wrap JSON in.
//! - Split combined `date: name` timeframe labels.
//! - Merge duplicate `(timeframe, pillar)` groups into one.
//!
//! # Invariants
//! - Task text and order are preserved; tasks are never trimmed, sorted,
//!   de-duplicated or dropped.
//! - Pillar and timeframe order is preserved.
//! - Normalizing an already normalized record is a no-op.

use crate::model::roadmap::{DeliverableGroup, RoadmapData, Timeframe};
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[^\S\n]*\n(.*?)\s*```\s*$").expect("valid fence regex")
});

/// Removes a surrounding Markdown code fence, if present.
///
/// Text without a fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE_RE.captures(text).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text.trim(),
    }
}

/// Splits a combined timeframe label on its first `": "` separator.
///
/// `"2025 - Q1 & Q2: Build-out"` -> `("2025 - Q1 & Q2", "Build-out")`.
/// Labels without the separator, such as `"Kickoff 09:30"`, are returned
/// whole as the date.
pub fn split_timeframe_label(label: &str) -> (String, String) {
    match label.split_once(": ") {
        Some((date, name)) => (date.trim().to_string(), name.trim().to_string()),
        None => (label.trim().to_string(), String::new()),
    }
}

/// Produces the canonical form of a validated record.
pub fn normalize_roadmap(mut data: RoadmapData) -> RoadmapData {
    data.title = data.title.trim().to_string();
    data.subtitle = data.subtitle.trim().to_string();

    for pillar in &mut data.pillars {
        pillar.id = pillar.id.trim().to_string();
        pillar.name = pillar.name.trim().to_string();
    }

    for timeframe in &mut data.timeframes {
        normalize_timeframe(timeframe);
    }

    data
}

fn normalize_timeframe(timeframe: &mut Timeframe) {
    timeframe.id = timeframe.id.trim().to_string();
    timeframe.name = timeframe.name.trim().to_string();
    timeframe.date = timeframe.date.trim().to_string();
    if timeframe.name.is_empty() && timeframe.date.contains(": ") {
        let (date, name) = split_timeframe_label(&timeframe.date);
        timeframe.date = date;
        timeframe.name = name;
    }

    let mut merged: Vec<DeliverableGroup> = Vec::with_capacity(timeframe.deliverables.len());
    for mut group in timeframe.deliverables.drain(..) {
        group.pillar_id = group.pillar_id.trim().to_string();
        match merged
            .iter_mut()
            .find(|existing| existing.pillar_id == group.pillar_id)
        {
            Some(existing) => existing.tasks.append(&mut group.tasks),
            None => merged.push(group),
        }
    }
    timeframe.deliverables = merged;
}
