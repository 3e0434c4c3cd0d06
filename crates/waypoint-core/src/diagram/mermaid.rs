//! Mermaid flowchart source generation.

use std::fmt::Write;

use super::palette::Palette;
use crate::models::Step;

/// Longest label kept before truncating with `...`.
pub const MAX_LABEL_CHARS: usize = 30;

/// Leading markers stripped from labels, in addition to `Context:`.
const EMOJI_MARKERS: [&str; 7] = ["🎯", "⭐", "💡", "🔍", "🚀", "⚡", "🎉"];

/// Node outline chosen from the step text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Box,
    Diamond,
    Circle,
}

impl NodeShape {
    /// Shape for a step, by case-insensitive markers in its raw text.
    pub fn for_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("context:") {
            NodeShape::Box
        } else if text.contains("decision") || text.contains("choose") {
            NodeShape::Diamond
        } else if text.contains("end") || text.contains("complete") {
            NodeShape::Circle
        } else {
            NodeShape::Box
        }
    }

    fn wrap(self, node: &str, label: &str) -> String {
        match self {
            NodeShape::Box => format!("{node}[\"{label}\"]"),
            NodeShape::Diamond => format!("{node}{{\"{label}\"}}"),
            NodeShape::Circle => format!("{node}((\"{label}\"))"),
        }
    }
}

/// Mermaid node id for the step at `index`.
pub fn node_id(index: usize) -> String {
    format!("node_{index}")
}

/// Strips one leading tag marker and a `Deep dive:` prefix, then shortens
/// the result to [`MAX_LABEL_CHARS`].
pub fn clean_label(text: &str) -> String {
    let stripped = strip_marker(text);
    let stripped = stripped
        .strip_prefix("Deep dive:")
        .map_or(stripped, str::trim_start)
        .trim();

    if stripped.chars().count() > MAX_LABEL_CHARS {
        let head: String = stripped.chars().take(MAX_LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        stripped.to_string()
    }
}

fn strip_marker(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("Context:") {
        return rest.trim_start();
    }
    EMOJI_MARKERS
        .iter()
        .find_map(|marker| text.strip_prefix(marker))
        .map_or(text, str::trim_start)
}

/// Quotes would terminate the label string early.
fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

/// Builds `flowchart TD` source for `steps`.
///
/// Nodes come first, then parent edges, then one style line per node.
/// Returns an empty string for an empty journey.
pub fn flowchart_source(steps: &[Step], palette: &Palette) -> String {
    if steps.is_empty() {
        return String::new();
    }

    let mut source = String::from("flowchart TD\n");
    let mut edges = Vec::new();
    let mut styles = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        let node = node_id(index);
        let label = escape_label(&clean_label(&step.text));
        let _ = writeln!(source, "    {}", NodeShape::for_text(&step.text).wrap(&node, &label));

        let parent_index = step
            .parent
            .as_deref()
            .and_then(|parent| steps.iter().position(|s| s.id == parent));
        if let Some(parent_index) = parent_index {
            let parent = node_id(parent_index);
            if step.text.to_lowercase().contains("deep dive") {
                edges.push(format!("    {parent} -.->|\"explore\"| {node}"));
            } else {
                edges.push(format!("    {parent} -->|\"next\"| {node}"));
            }
        }

        styles.push(format!(
            "    style {node} fill:{},stroke:{},stroke-width:2px,color:#ffffff,font-size:14px",
            palette.fill(index),
            palette.text
        ));
    }

    for section in [edges, styles] {
        if section.is_empty() {
            continue;
        }
        source.push('\n');
        for line in section {
            source.push_str(&line);
            source.push('\n');
        }
    }

    source
}
