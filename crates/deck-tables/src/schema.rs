//! The six presentation tables: where they come from, what they hold.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells in every table row.
pub const COLUMNS: usize = 4;

/// One rendered row.
pub type Row = [String; COLUMNS];

/// Identifies a presentation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    Investments,
    Stages,
    Safety,
    Software,
    Startups,
    Publications,
}

impl TableId {
    /// Every table, in load order.
    pub const ALL: [TableId; 6] = [
        TableId::Investments,
        TableId::Stages,
        TableId::Safety,
        TableId::Software,
        TableId::Startups,
        TableId::Publications,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableId::Investments => "investments",
            TableId::Stages => "stages",
            TableId::Safety => "safety",
            TableId::Software => "software",
            TableId::Startups => "startups",
            TableId::Publications => "publications",
        }
    }

    /// CSV resource path, relative to the data source root.
    pub fn resource(&self) -> String {
        format!("{}.csv", self.name())
    }

    /// DOM id of the table body.
    pub fn body_id(&self) -> String {
        format!("{}TableBody", self.name())
    }

    /// Header names mapped to cell positions, in display order.
    pub fn columns(&self) -> [&'static str; COLUMNS] {
        match self {
            TableId::Investments => ["Country", "Investment", "Projects", "Focus"],
            TableId::Stages => ["Stage", "Duration", "Activities", "Outcome"],
            TableId::Safety => ["System", "Type", "Function", "Status"],
            TableId::Software => ["Software", "Category", "Application", "License"],
            TableId::Startups => ["Company", "Country", "Technology", "Status"],
            TableId::Publications => ["Title", "Authors", "Year", "Venue"],
        }
    }

    /// Column whose emptiness disqualifies a row.
    pub fn key_column(&self) -> &'static str {
        self.columns()[0]
    }

    /// Literal rows shown when the remote dataset is unusable.
    pub fn fallback(&self) -> Vec<Row> {
        let rows: &[[&str; COLUMNS]] = match self {
            TableId::Investments => &INVESTMENTS,
            TableId::Stages => &STAGES,
            TableId::Safety => &SAFETY,
            TableId::Software => &SOFTWARE,
            TableId::Startups => &STARTUPS,
            TableId::Publications => &PUBLICATIONS,
        };
        rows.iter().map(|row| row.map(str::to_string)).collect()
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const INVESTMENTS: [[&str; COLUMNS]; 6] = [
    ["USA", "$85B", "12", "SMRs and advanced reactors"],
    ["China", "$120B", "18", "Large PWRs and HTGRs"],
    ["India", "$45B", "8", "PHWRs and fast breeders"],
    ["France", "$35B", "6", "EPR2 fleet renewal"],
    ["UK", "$28B", "5", "Sizewell C and SMRs"],
    ["Russia", "$40B", "10", "VVER exports"],
];

const STAGES: [[&str; COLUMNS]; 6] = [
    ["Lecture Series", "Months 1-3", "Nuclear physics and reactor theory", "Shared fundamentals"],
    ["Software Training", "Months 4-6", "OpenMC, OpenFOAM, simulation tools", "Hands-on modelling skills"],
    ["Team Formation", "Months 7-9", "Mission mode teams with KPI tracking", "Project teams in place"],
    ["Design Studies", "Months 10-15", "Core neutronics and thermal hydraulics", "Reference design reports"],
    ["Industry Projects", "Months 16-21", "Joint work with utilities and vendors", "Validated case studies"],
    ["Outreach", "Months 22-24", "Publications, talks and public engagement", "Society-wide visibility"],
];

const SAFETY: [[&str; COLUMNS]; 6] = [
    ["Passive Decay Heat Removal", "Passive", "Removes core heat without pumps", "Standard in new builds"],
    ["Core Catcher", "Passive", "Retains molten core debris", "Operational"],
    ["Hydrogen Recombiners", "Passive", "Prevents hydrogen accumulation", "Operational"],
    ["Emergency Core Cooling", "Active", "Injects coolant after a LOCA", "Operational"],
    ["Containment Spray", "Active", "Reduces containment pressure", "Operational"],
    ["Digital I&C", "Active", "Reactor protection and monitoring", "Being deployed"],
];

const SOFTWARE: [[&str; COLUMNS]; 6] = [
    ["OpenMC", "Monte Carlo", "Neutron transport and depletion", "MIT"],
    ["OpenFOAM", "CFD", "Thermal hydraulics", "GPL"],
    ["MOOSE", "Multiphysics", "Coupled reactor simulation", "LGPL"],
    ["Serpent", "Monte Carlo", "Reactor physics and burnup", "Academic"],
    ["RELAP5", "System Code", "Transient and accident analysis", "Restricted"],
    ["Cantera", "Chemistry", "Thermochemistry and kinetics", "BSD"],
];

const STARTUPS: [[&str; COLUMNS]; 6] = [
    ["NuScale Power", "USA", "Light-water SMR", "Design certified"],
    ["TerraPower", "USA", "Sodium fast reactor", "Under construction"],
    ["X-energy", "USA", "High-temperature gas reactor", "Licensing"],
    ["Kairos Power", "USA", "Fluoride salt-cooled reactor", "Test reactor under construction"],
    ["Rolls-Royce SMR", "UK", "Pressurised water SMR", "Generic design assessment"],
    ["newcleo", "France", "Lead-cooled fast reactor", "Development"],
];

const PUBLICATIONS: [[&str; COLUMNS]; 6] = [
    ["Nuclear Reactor Analysis", "Duderstadt & Hamilton", "1976", "Wiley"],
    ["Introduction to Nuclear Engineering", "Lamarsh & Baratta", "2001", "Prentice Hall"],
    ["OpenMC: A State-of-the-Art Monte Carlo Code for Research and Development", "Romano et al.", "2015", "Annals of Nuclear Energy"],
    ["Thorium Fuel Cycle: Potential Benefits and Challenges", "IAEA", "2005", "IAEA-TECDOC-1450"],
    ["Small Modular Reactors: Nuclear Power Fad or Future?", "Ingersoll", "2016", "Woodhead Publishing"],
    ["The Future of Nuclear Energy in a Carbon-Constrained World", "MIT Energy Initiative", "2018", "MIT"],
];
