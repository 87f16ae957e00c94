//! Static datasets behind the deck's charts.

use serde::{Deserialize, Serialize};

/// One edge of the energy flow diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

impl FlowLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

/// Nuclear investment per country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub country: String,
    /// Billions of US dollars
    pub investment: f64,
    pub projects: u32,
}

/// Workforce headcount for a projection year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforcePoint {
    pub year: u32,
    pub current: u64,
    pub required: u64,
}

/// India's energy flow in TWh (2024).
pub fn energy_flow() -> Vec<FlowLink> {
    [
        ("Coal", "Electricity", 720.0),
        ("Oil & Gas", "Transportation", 280.0),
        ("Nuclear", "Electricity", 50.0),
        ("Renewables", "Electricity", 120.0),
        ("Electricity", "Industry", 400.0),
        ("Electricity", "Residential", 300.0),
        ("Electricity", "Commercial", 190.0),
    ]
    .into_iter()
    .map(|(source, target, value)| FlowLink::new(source, target, value))
    .collect()
}

/// Global nuclear investment and project counts (2024).
pub fn investments() -> Vec<Investment> {
    [
        ("USA", 85.0, 12),
        ("China", 120.0, 18),
        ("India", 45.0, 8),
        ("France", 35.0, 6),
        ("UK", 28.0, 5),
    ]
    .into_iter()
    .map(|(country, investment, projects)| Investment {
        country: country.to_string(),
        investment,
        projects,
    })
    .collect()
}

/// Current versus required nuclear workforce, 2024-2050.
pub fn workforce() -> Vec<WorkforcePoint> {
    [
        (2024, 100_000, 100_000),
        (2030, 150_000, 200_000),
        (2040, 250_000, 300_000),
        (2050, 375_000, 375_000),
    ]
    .into_iter()
    .map(|(year, current, required)| WorkforcePoint {
        year,
        current,
        required,
    })
    .collect()
}

/// The datasets a controller draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasets {
    pub energy_flow: Vec<FlowLink>,
    pub investments: Vec<Investment>,
    pub workforce: Vec<WorkforcePoint>,
}

impl Default for Datasets {
    fn default() -> Self {
        Self {
            energy_flow: energy_flow(),
            investments: investments(),
            workforce: workforce(),
        }
    }
}
