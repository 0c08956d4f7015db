//! Image-generation prompt payload.
//!
//! # Responsibility
//! - Serialize the canonical record into instructions for an infographic
//!   generator.
//!
//! # Invariants
//! - Output is a pure function of the record: unchanged data yields
//!   byte-identical text.
//! - Pillar, timeframe and task order match the projections.
//! - Pillar colors match the ones the views render.

use crate::model::roadmap::RoadmapData;
use crate::projection::index::{traverse, Major};
use crate::projection::palette::pillar_colors;

const PROMPT_PREAMBLE: &str = "Create a clean, professional roadmap infographic. \
Lay out timeframes as columns from left to right in the order given, and show \
each strategic pillar as a color-coded row. Render all text exactly as written.";

/// Builds the text block handed to the image-generation collaborator.
///
/// Every field is flattened to one line, so user text cannot open a new
/// heading or bullet.
pub fn build_image_prompt(data: &RoadmapData) -> String {
    let colors = pillar_colors(data);
    let mut out = String::new();

    out.push_str(PROMPT_PREAMBLE);
    out.push_str("\n\n");
    push_field(&mut out, "Title", &data.title);
    push_field(&mut out, "Subtitle", &data.subtitle);

    out.push_str("\nStrategic pillars:\n");
    for (position, (pillar, color)) in data.pillars.iter().zip(&colors).enumerate() {
        push_line(
            &mut out,
            &format!(
                "{}. {} ({} {})",
                position + 1,
                single_line(&pillar.name),
                color.name,
                color.hex
            ),
        );
    }

    out.push_str("\nTimeline:\n");
    for (cells, timeframe) in traverse(data, Major::Timeframe)
        .into_iter()
        .zip(&data.timeframes)
    {
        push_line(&mut out, &format!("\n## {}", single_line(&timeframe.label())));
        for cell in cells {
            push_line(&mut out, &format!("- {}:", single_line(&cell.pillar.name)));
            for task in cell.tasks {
                push_line(&mut out, &format!("  - {}", single_line(task)));
            }
        }
    }

    out
}

fn push_field(out: &mut String, key: &str, value: &str) {
    if !value.is_empty() {
        push_line(out, &format!("{key}: {}", single_line(value)));
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn single_line(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}
