//! Journey → Mermaid flowchart adapter.
//!
//! The adapter turns a step sequence into `flowchart TD` source that any
//! Mermaid renderer can draw, remembers which node came from which step, and
//! carries the viewport independently of the steps. Rendering is skipped when
//! the steps (and palette) are structurally equal to the last rendered
//! snapshot, so the viewport survives unrelated updates.

pub mod mermaid;
pub mod palette;
pub mod viewport;

pub use mermaid::{clean_label, flowchart_source, node_id, NodeShape};
pub use palette::{Palette, PALETTES};
pub use viewport::{Bounds, Point, Size, Viewport};

use log::debug;

use crate::models::Step;

/// Link between a rendered node and the step it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBinding {
    pub node_id: String,
    pub step_id: String,
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDiagram {
    pub source: String,
    pub nodes: Vec<NodeBinding>,
    pub palette: &'static Palette,
    /// Nothing was on screen before this render; a good moment to fit.
    pub first_render: bool,
}

/// Stateful diagram adapter.
#[derive(Debug, Default)]
pub struct DiagramAdapter {
    last_steps: Option<Vec<Step>>,
    last_palette: Option<&'static Palette>,
    palette_override: Option<&'static Palette>,
    source: Option<String>,
    nodes: Vec<NodeBinding>,
    viewport: Viewport,
}

impl DiagramAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `steps`, or returns `None` when nothing needs redrawing.
    ///
    /// An empty journey renders nothing and forgets the previous snapshot.
    pub fn render(&mut self, steps: &[Step], context: &str) -> Option<RenderedDiagram> {
        if steps.is_empty() {
            self.last_steps = None;
            self.last_palette = None;
            self.source = None;
            self.nodes.clear();
            return None;
        }

        let palette = self.palette(context);
        let unchanged = self.last_steps.as_deref() == Some(steps)
            && self.last_palette.is_some_and(|last| last == palette);
        if unchanged {
            debug!("Diagram unchanged; skipping render");
            return None;
        }

        let source = flowchart_source(steps, palette);
        let nodes: Vec<NodeBinding> = steps
            .iter()
            .enumerate()
            .map(|(index, step)| NodeBinding {
                node_id: node_id(index),
                step_id: step.id.clone(),
            })
            .collect();
        let first_render = self.last_steps.is_none();

        self.last_steps = Some(steps.to_vec());
        self.last_palette = Some(palette);
        self.source = Some(source.clone());
        self.nodes = nodes.clone();

        Some(RenderedDiagram {
            source,
            nodes,
            palette,
            first_render,
        })
    }

    /// Source of the last render, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Step id behind a rendered node.
    pub fn node_step(&self, node_id: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|binding| binding.node_id == node_id)
            .map(|binding| binding.step_id.as_str())
    }

    /// The palette in effect for `context`.
    pub fn palette(&self, context: &str) -> &'static Palette {
        self.palette_override
            .unwrap_or_else(|| Palette::for_context(context))
    }

    /// Switches to the next palette in cycling order.
    pub fn cycle_palette(&mut self, context: &str) -> &'static Palette {
        let next = self.palette(context).next();
        self.palette_override = Some(next);
        next
    }

    pub fn set_palette(&mut self, palette: Option<&'static Palette>) {
        self.palette_override = palette;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}
