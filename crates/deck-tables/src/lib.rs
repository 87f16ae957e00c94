//! Reactor Deck Tables
//!
//! Populates the presentation's six data tables from CSV files, once, at
//! startup. A table whose file cannot be fetched, parsed, or yields no row
//! with a usable key column shows its built-in rows instead.
//!
//! Sources are pluggable through [`CsvSource`]: [`HttpSource`] for a remote
//! base URL, [`DirSource`] for a local directory and [`MemorySource`] for
//! tests.
//!
//! # Usage
//!
//! ```
//! use deck_tables::{MemorySource, TableId, TableLoader, Tables};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut tables = Tables::new();
//! TableLoader::new(MemorySource::new()).load_all(&mut tables).await;
//! assert_eq!(tables.get(TableId::Stages).unwrap().rows.len(), 6);
//! # });
//! ```

pub mod error;
pub mod flow;
pub mod loader;
pub mod record;
pub mod render;
pub mod schema;
pub mod source;

pub use error::{Error, Result};
pub use flow::{load_flow_links, parse_flow_links, FLOW_RESOURCE};
pub use loader::{LoadedTable, RowOrigin, TableLoader, TableOutcome, TableSink, Tables};
pub use record::{is_valid_key, parse_table, TableRecord};
pub use render::render_rows;
pub use schema::{Row, TableId, COLUMNS};
pub use source::{CsvSource, DataSource, DirSource, HttpSource, MemorySource};
