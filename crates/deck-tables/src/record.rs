//! Typed CSV rows and the key-column filter.

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Row, TableId};

/// Placeholder some spreadsheet exports write into blank cells.
pub const PLACEHOLDER: &str = "undefined";

/// A CSV row with one named optional field per column.
pub trait TableRecord: DeserializeOwned {
    const TABLE: TableId;

    /// Value of the key column.
    fn key(&self) -> Option<&str>;

    /// Cells in display order; absent fields render empty.
    fn into_row(self) -> Row;
}

/// Whether a key column value marks a real row.
pub fn is_valid_key(key: Option<&str>) -> bool {
    match key.map(str::trim) {
        None => false,
        Some(k) => !k.is_empty() && k != PLACEHOLDER,
    }
}

macro_rules! table_record {
    (
        $(#[$meta:meta])*
        $name:ident for $table:expr, key = $key:ident {
            $($field:ident => $header:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
        pub struct $name {
            $(
                #[serde(rename = $header, default)]
                pub $field: Option<String>,
            )+
        }

        impl TableRecord for $name {
            const TABLE: TableId = $table;

            fn key(&self) -> Option<&str> {
                self.$key.as_deref()
            }

            fn into_row(self) -> Row {
                [$(self.$field.unwrap_or_default()),+]
            }
        }
    };
}

table_record! {
    /// Nuclear investment by country.
    InvestmentRecord for TableId::Investments, key = country {
        country => "Country",
        investment => "Investment",
        projects => "Projects",
        focus => "Focus",
    }
}

table_record! {
    /// Programme stage.
    StageRecord for TableId::Stages, key = stage {
        stage => "Stage",
        duration => "Duration",
        activities => "Activities",
        outcome => "Outcome",
    }
}

table_record! {
    /// Reactor safety system.
    SafetyRecord for TableId::Safety, key = system {
        system => "System",
        kind => "Type",
        function => "Function",
        status => "Status",
    }
}

table_record! {
    /// Simulation software package.
    SoftwareRecord for TableId::Software, key = software {
        software => "Software",
        category => "Category",
        application => "Application",
        license => "License",
    }
}

table_record! {
    /// Advanced reactor company.
    StartupRecord for TableId::Startups, key = company {
        company => "Company",
        country => "Country",
        technology => "Technology",
        status => "Status",
    }
}

table_record! {
    /// Reference publication.
    PublicationRecord for TableId::Publications, key = title {
        title => "Title",
        authors => "Authors",
        year => "Year",
        venue => "Venue",
    }
}

pub(crate) fn reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes())
}

/// Parse CSV text into rows of `T`, dropping rows with an invalid key.
///
/// Zero surviving rows is an error.
pub fn parse_records<T: TableRecord>(text: &str) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader(text).deserialize::<T>() {
        let record = record?;
        if is_valid_key(record.key()) {
            rows.push(record.into_row());
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        debug!(table = %T::TABLE, skipped, "dropped rows without a key");
    }
    if rows.is_empty() {
        return Err(Error::Empty { table: T::TABLE });
    }
    Ok(rows)
}

/// Parse CSV text for a table identified at runtime.
pub fn parse_table(table: TableId, text: &str) -> Result<Vec<Row>> {
    match table {
        TableId::Investments => parse_records::<InvestmentRecord>(text),
        TableId::Stages => parse_records::<StageRecord>(text),
        TableId::Safety => parse_records::<SafetyRecord>(text),
        TableId::Software => parse_records::<SoftwareRecord>(text),
        TableId::Startups => parse_records::<StartupRecord>(text),
        TableId::Publications => parse_records::<PublicationRecord>(text),
    }
}
