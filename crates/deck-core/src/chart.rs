//! Chart targets, specifications and the renderer seam.
//!
//! Drawing is delegated to whatever charting library the host has; the deck
//! only describes what to draw.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Investment, WorkforcePoint};
use crate::error::Result;
use crate::flow::FlowDiagram;

/// The three lazily drawn visualizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTarget {
    FlowDiagram,
    Investment,
    Workforce,
}

impl ChartTarget {
    pub const ALL: [ChartTarget; 3] = [
        ChartTarget::FlowDiagram,
        ChartTarget::Investment,
        ChartTarget::Workforce,
    ];

    /// DOM id of the container.
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartTarget::FlowDiagram => "sankeyChart",
            ChartTarget::Investment => "investmentChart",
            ChartTarget::Workforce => "workforceChart",
        }
    }

    pub(crate) fn slot(&self) -> usize {
        match self {
            ChartTarget::FlowDiagram => 0,
            ChartTarget::Investment => 1,
            ChartTarget::Workforce => 2,
        }
    }
}

impl fmt::Display for ChartTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// How a dataset is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Left,
    Right,
    Bottom,
}

/// Tick label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    Plain,
    /// 150000 renders as "150K"
    Thousands,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Plain => value.to_string(),
            TickFormat::Thousands => format!("{}K", value / 1000.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub id: String,
    pub title: String,
    pub position: AxisPosition,
    pub begin_at_zero: bool,
    pub ticks: TickFormat,
    /// Draw this axis's grid lines over the plot area
    pub grid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub color: String,
    pub kind: SeriesKind,
    pub axis: String,
    pub fill: bool,
    pub tension: f64,
}

/// Category-axis chart built from one or more series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChart {
    pub title: String,
    pub kind: SeriesKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub axes: Vec<Axis>,
}

/// What a renderer is asked to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Flow(FlowDiagram),
    Series(SeriesChart),
}

/// Grouped bar chart of investment with a project-count line on a second axis.
pub fn investment_chart(data: &[Investment]) -> SeriesChart {
    SeriesChart {
        title: "Global Nuclear Investment & Projects (2024)".into(),
        kind: SeriesKind::Bar,
        labels: data.iter().map(|d| d.country.clone()).collect(),
        datasets: vec![
            Dataset {
                label: "Investment ($B)".into(),
                values: data.iter().map(|d| d.investment).collect(),
                color: "#1FB8CD".into(),
                kind: SeriesKind::Bar,
                axis: "y".into(),
                fill: false,
                tension: 0.0,
            },
            Dataset {
                label: "Projects".into(),
                values: data.iter().map(|d| f64::from(d.projects)).collect(),
                color: "#FFC185".into(),
                kind: SeriesKind::Line,
                axis: "y1".into(),
                fill: false,
                tension: 0.4,
            },
        ],
        axes: vec![
            Axis {
                id: "y".into(),
                title: "Investment ($B)".into(),
                position: AxisPosition::Left,
                begin_at_zero: true,
                ticks: TickFormat::Plain,
                grid: true,
            },
            Axis {
                id: "y1".into(),
                title: "Number of Projects".into(),
                position: AxisPosition::Right,
                begin_at_zero: true,
                ticks: TickFormat::Plain,
                grid: false,
            },
        ],
    }
}

/// Filled dual-line chart of current versus required workforce.
pub fn workforce_chart(data: &[WorkforcePoint]) -> SeriesChart {
    let line = |label: &str, color: &str, values: Vec<f64>| Dataset {
        label: label.into(),
        values,
        color: color.into(),
        kind: SeriesKind::Line,
        axis: "y".into(),
        fill: true,
        tension: 0.4,
    };
    SeriesChart {
        title: "Nuclear Workforce Projections (2024-2050)".into(),
        kind: SeriesKind::Line,
        labels: data.iter().map(|d| d.year.to_string()).collect(),
        datasets: vec![
            line(
                "Current Workforce",
                "#B4413C",
                data.iter().map(|d| d.current as f64).collect(),
            ),
            line(
                "Required Workforce",
                "#1FB8CD",
                data.iter().map(|d| d.required as f64).collect(),
            ),
        ],
        axes: vec![
            Axis {
                id: "y".into(),
                title: "Number of Workers".into(),
                position: AxisPosition::Left,
                begin_at_zero: true,
                ticks: TickFormat::Thousands,
                grid: true,
            },
            Axis {
                id: "x".into(),
                title: "Year".into(),
                position: AxisPosition::Bottom,
                begin_at_zero: false,
                ticks: TickFormat::Plain,
                grid: true,
            },
        ],
    }
}

/// Draws chart specifications into their containers.
pub trait ChartRenderer {
    fn render(&mut self, target: ChartTarget, spec: &ChartSpec) -> Result<()>;
}

/// Draws of one target.
#[derive(Debug, Clone, Default, PartialEq)]
struct DrawSlot {
    draws: usize,
    latest: Option<ChartSpec>,
}

/// Renderer that keeps the latest specification per target.
///
/// Used by hosts that ship specifications to a browser-side charting library.
#[derive(Debug, Clone, Default)]
pub struct ChartLog {
    slots: [DrawSlot; 3],
}

impl ChartLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a target was drawn.
    pub fn count(&self, target: ChartTarget) -> usize {
        self.slots[target.slot()].draws
    }

    /// Most recent specification drawn into a target.
    pub fn latest(&self, target: ChartTarget) -> Option<&ChartSpec> {
        self.slots[target.slot()].latest.as_ref()
    }
}

impl ChartRenderer for ChartLog {
    fn render(&mut self, target: ChartTarget, spec: &ChartSpec) -> Result<()> {
        let slot = &mut self.slots[target.slot()];
        slot.draws += 1;
        slot.latest = Some(spec.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{investments, workforce};

    #[test]
    fn investment_combo_layout() {
        let chart = investment_chart(&investments());
        assert_eq!(chart.labels, vec!["USA", "China", "India", "France", "UK"]);
        assert_eq!(chart.datasets[0].kind, SeriesKind::Bar);
        assert_eq!(chart.datasets[1].kind, SeriesKind::Line);
        assert_eq!(chart.datasets[1].axis, "y1");
        assert_eq!(chart.datasets[1].values, vec![12.0, 18.0, 8.0, 6.0, 5.0]);
        assert!(!chart.axes[1].grid);
    }

    #[test]
    fn chart_log_keeps_only_latest_spec() {
        let mut log = ChartLog::new();
        let first = ChartSpec::Series(investment_chart(&investments()));
        let mut second = investment_chart(&investments());
        second.title = "Redrawn".into();
        let second = ChartSpec::Series(second);

        log.render(ChartTarget::Investment, &first).unwrap();
        for _ in 0..50 {
            log.render(ChartTarget::Investment, &second).unwrap();
        }
        assert_eq!(log.count(ChartTarget::Investment), 51);
        assert_eq!(log.latest(ChartTarget::Investment), Some(&second));
        assert_eq!(log.count(ChartTarget::Workforce), 0);
        assert!(log.latest(ChartTarget::Workforce).is_none());
    }

    #[test]
    fn workforce_area_lines() {
        let chart = workforce_chart(&workforce());
        assert_eq!(chart.labels, vec!["2024", "2030", "2040", "2050"]);
        assert!(chart.datasets.iter().all(|d| d.fill));
        assert_eq!(chart.datasets[1].values[1], 200_000.0);
    }

    #[test]
    fn thousands_ticks() {
        assert_eq!(TickFormat::Thousands.format(150_000.0), "150K");
        assert_eq!(TickFormat::Thousands.format(2_500.0), "2.5K");
    }

    #[test]
    fn log_counts_renders() {
        let mut log = ChartLog::new();
        let spec = ChartSpec::Series(workforce_chart(&workforce()));
        log.render(ChartTarget::Workforce, &spec).unwrap();
        log.render(ChartTarget::Workforce, &spec).unwrap();
        assert_eq!(log.count(ChartTarget::Workforce), 2);
        assert_eq!(log.count(ChartTarget::Investment), 0);
        assert!(log.latest(ChartTarget::Workforce).is_some());
    }

    #[test]
    fn spec_serializes_with_tag() {
        let spec = ChartSpec::Series(investment_chart(&investments()));
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains(r#""type":"series""#));
    }
}
