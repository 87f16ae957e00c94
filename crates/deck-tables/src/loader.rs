//! Startup table population.
//!
//! Each table is fetched, parsed and filtered once. Any failure along the way
//! (network, parse, nothing left after filtering) swaps in the table's literal
//! fallback rows. Nothing is retried and nothing reaches the viewer.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::record::parse_table;
use crate::render::render_rows;
use crate::schema::{Row, TableId};
use crate::source::CsvSource;

/// Where a table's rows came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum RowOrigin {
    Remote,
    Fallback { reason: String },
}

impl RowOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RowOrigin::Fallback { .. })
    }
}

/// Rows for one table body, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedTable {
    pub table: TableId,
    pub rows: Vec<Row>,
    pub origin: RowOrigin,
}

impl LoadedTable {
    pub fn html(&self) -> String {
        render_rows(&self.rows)
    }

    pub fn outcome(&self) -> TableOutcome {
        TableOutcome {
            table: self.table,
            rows: self.rows.len(),
            origin: self.origin.clone(),
        }
    }
}

/// Summary of one table's load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOutcome {
    pub table: TableId,
    pub rows: usize,
    pub origin: RowOrigin,
}

/// Receives table bodies; each call replaces whatever the body held.
pub trait TableSink {
    fn replace_body(&mut self, table: &LoadedTable);
}

/// Loads the presentation tables from a CSV source.
#[derive(Debug, Clone)]
pub struct TableLoader<S> {
    source: S,
}

impl<S: CsvSource> TableLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load one table, substituting its fallback on any failure.
    pub async fn load(&self, table: TableId) -> LoadedTable {
        let fetched = match self.source.fetch(&table.resource()).await {
            Ok(text) => parse_table(table, &text),
            Err(e) => Err(e),
        };
        match fetched {
            Ok(rows) => {
                info!(%table, rows = rows.len(), "table loaded");
                LoadedTable {
                    table,
                    rows,
                    origin: RowOrigin::Remote,
                }
            }
            Err(e) => {
                warn!(%table, error = %e, "using fallback rows");
                LoadedTable {
                    table,
                    rows: table.fallback(),
                    origin: RowOrigin::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Load every table in order, handing each body to `sink` as it completes.
    pub async fn load_all(&self, sink: &mut impl TableSink) -> Vec<TableOutcome> {
        let mut outcomes = Vec::with_capacity(TableId::ALL.len());
        for table in TableId::ALL {
            let loaded = self.load(table).await;
            sink.replace_body(&loaded);
            outcomes.push(loaded.outcome());
        }
        outcomes
    }
}

/// Table bodies keyed by table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tables {
    bodies: BTreeMap<TableId, LoadedTable>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: TableId) -> Option<&LoadedTable> {
        self.bodies.get(&table)
    }

    /// Rendered `<tr>` markup for a table body, empty until loaded.
    pub fn html(&self, table: TableId) -> String {
        self.get(table).map(LoadedTable::html).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedTable> {
        self.bodies.values()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl TableSink for Tables {
    fn replace_body(&mut self, table: &LoadedTable) {
        self.bodies.insert(table.table, table.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    const SOFTWARE_CSV: &str = "Software,Category,Application,License\n\
                                OpenMC,Monte Carlo,Neutron transport,MIT\n\
                                ,CFD,Thermal hydraulics,GPL\n\
                                   ,Multiphysics,Coupled,LGPL\n";

    #[tokio::test]
    async fn failed_fetch_uses_fallback() {
        let loader = TableLoader::new(MemorySource::new());
        let loaded = loader.load(TableId::Safety).await;
        assert!(loaded.origin.is_fallback());
        assert_eq!(loaded.rows, TableId::Safety.fallback());
        assert_eq!(loaded.rows.len(), 6);
        assert_eq!(loaded.rows[0][0], "Passive Decay Heat Removal");
    }

    #[tokio::test]
    async fn filtered_rows_are_dropped() {
        let loader = TableLoader::new(MemorySource::new().with("software.csv", SOFTWARE_CSV));
        let loaded = loader.load(TableId::Software).await;
        assert_eq!(loaded.origin, RowOrigin::Remote);
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(loaded.html().matches("<tr>").count(), 1);
    }

    #[tokio::test]
    async fn unparseable_csv_falls_back() {
        let bad = "Country,Investment\n\"unterminated,1\n";
        let loader = TableLoader::new(MemorySource::new().with("investments.csv", bad));
        let loaded = loader.load(TableId::Investments).await;
        assert!(loaded.origin.is_fallback());
        assert_eq!(loaded.rows, TableId::Investments.fallback());
    }

    #[tokio::test]
    async fn empty_after_filter_falls_back() {
        let csv = "Company,Country,Technology,Status\nundefined,USA,SMR,Design\n";
        let loader = TableLoader::new(MemorySource::new().with("startups.csv", csv));
        let loaded = loader.load(TableId::Startups).await;
        assert!(matches!(loaded.origin, RowOrigin::Fallback { ref reason } if reason.contains("no usable rows")));
    }

    #[tokio::test]
    async fn load_all_fills_every_body() {
        let loader = TableLoader::new(MemorySource::new().with("software.csv", SOFTWARE_CSV));
        let mut tables = Tables::new();
        let outcomes = loader.load_all(&mut tables).await;

        assert_eq!(outcomes.len(), 6);
        assert_eq!(tables.len(), 6);
        let remote: Vec<_> = outcomes
            .iter()
            .filter(|o| o.origin == RowOrigin::Remote)
            .map(|o| o.table)
            .collect();
        assert_eq!(remote, vec![TableId::Software]);
        assert_eq!(tables.get(TableId::Publications).unwrap().rows.len(), 6);
    }

    #[tokio::test]
    async fn reload_replaces_previous_body() {
        let mut tables = Tables::new();
        TableLoader::new(MemorySource::new())
            .load_all(&mut tables)
            .await;
        assert_eq!(tables.get(TableId::Software).unwrap().rows.len(), 6);

        TableLoader::new(MemorySource::new().with("software.csv", SOFTWARE_CSV))
            .load_all(&mut tables)
            .await;
        assert_eq!(tables.get(TableId::Software).unwrap().rows.len(), 1);
    }
}
