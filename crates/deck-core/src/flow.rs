//! Energy flow diagram layout.
//!
//! Nodes sit in three fixed columns (sources, the electricity hub, end uses).
//! Links are quadratic curves from the right edge of the source box to the
//! left edge of the target box, stroked in the source node's color.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::FlowLink;

/// Minimum width of the drawing area.
pub const MIN_WIDTH: f64 = 800.0;
/// Height of the drawing area.
pub const HEIGHT: f64 = 350.0;
/// Title drawn above the diagram.
pub const TITLE: &str = "India's Energy Flow (2024)";

const NODE_HALF_WIDTH: f64 = 80.0;
const NODE_HALF_HEIGHT: f64 = 15.0;
const LINK_OPACITY: f64 = 0.6;

/// Outer margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0,
        }
    }
}

/// A positioned node box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Throughput in TWh
    pub value: f64,
    pub color: String,
}

/// A stroked link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPath {
    pub source: String,
    pub target: String,
    /// SVG path data
    pub d: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Fully laid out flow diagram, ready for an SVG renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDiagram {
    pub title: String,
    pub margin: Margin,
    /// Inner plot width
    pub width: f64,
    /// Inner plot height
    pub height: f64,
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowPath>,
}

/// Fixed placement for each known node: (id, x, y, color).
const PLACEMENT: [(&str, f64, f64, &str); 9] = [
    ("Coal", 50.0, 80.0, "#B4413C"),
    ("Oil & Gas", 50.0, 140.0, "#DB4545"),
    ("Nuclear", 50.0, 200.0, "#1FB8CD"),
    ("Renewables", 50.0, 260.0, "#5D878F"),
    ("Electricity", 350.0, 150.0, "#FFC185"),
    ("Transportation", 350.0, 260.0, "#964325"),
    ("Industry", 650.0, 100.0, "#944454"),
    ("Residential", 650.0, 160.0, "#D2BA4C"),
    ("Commercial", 650.0, 220.0, "#13343B"),
];

impl FlowDiagram {
    /// Lay out `links` for a container of the given width.
    ///
    /// Links naming a node without a fixed placement are dropped. A node's
    /// value is the larger of its total inflow and total outflow.
    pub fn layout(links: &[FlowLink], container_width: Option<f64>) -> Self {
        let margin = Margin::default();
        let width = container_width.unwrap_or(MIN_WIDTH).max(MIN_WIDTH) - margin.left - margin.right;
        let height = HEIGHT - margin.top - margin.bottom;

        let mut inflow: HashMap<&str, f64> = HashMap::new();
        let mut outflow: HashMap<&str, f64> = HashMap::new();
        for link in links {
            *outflow.entry(link.source.as_str()).or_default() += link.value;
            *inflow.entry(link.target.as_str()).or_default() += link.value;
        }

        let nodes: Vec<FlowNode> = PLACEMENT
            .iter()
            .map(|(id, x, y, color)| FlowNode {
                id: (*id).to_string(),
                x: *x,
                y: *y,
                value: inflow
                    .get(id)
                    .copied()
                    .unwrap_or(0.0)
                    .max(outflow.get(id).copied().unwrap_or(0.0)),
                color: (*color).to_string(),
            })
            .collect();

        let find = |id: &str| nodes.iter().find(|n| n.id == id);
        let paths = links
            .iter()
            .filter_map(|link| {
                let (Some(source), Some(target)) = (find(&link.source), find(&link.target)) else {
                    debug!(source = %link.source, target = %link.target, "dropping link to unplaced node");
                    return None;
                };
                Some(FlowPath {
                    source: link.source.clone(),
                    target: link.target.clone(),
                    d: link_path(source, target),
                    stroke: source.color.clone(),
                    stroke_width: (link.value / 15.0).max(3.0),
                    opacity: LINK_OPACITY,
                })
            })
            .collect();

        Self {
            title: TITLE.to_string(),
            margin,
            width,
            height,
            nodes,
            links: paths,
        }
    }

    /// The `viewBox` attribute for the outer SVG element.
    pub fn view_box(&self) -> String {
        format!(
            "0 0 {} {}",
            self.width + self.margin.left + self.margin.right,
            self.height + self.margin.top + self.margin.bottom
        )
    }
}

fn link_path(source: &FlowNode, target: &FlowNode) -> String {
    let mid_x = (source.x + target.x) / 2.0;
    let start_y = source.y + NODE_HALF_HEIGHT;
    let end_y = target.y + NODE_HALF_HEIGHT;
    format!(
        "M{},{} Q{},{} {},{} Q{},{} {},{}",
        source.x + NODE_HALF_WIDTH,
        start_y,
        mid_x,
        start_y,
        mid_x,
        (source.y + target.y) / 2.0,
        mid_x,
        end_y,
        target.x - NODE_HALF_WIDTH,
        end_y,
    )
}
