//! Flow diagram links from a `Source,Target,Value` CSV.

use deck_core::data::{energy_flow, FlowLink};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::record::{is_valid_key, reader};
use crate::source::CsvSource;

/// Default resource holding the flow diagram links.
pub const FLOW_RESOURCE: &str = "energy_flow.csv";

#[derive(Debug, Deserialize)]
struct FlowRecord {
    #[serde(rename = "Source", default)]
    source: Option<String>,
    #[serde(rename = "Target", default)]
    target: Option<String>,
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

impl FlowRecord {
    fn into_link(self) -> Option<FlowLink> {
        if !is_valid_key(self.source.as_deref()) || !is_valid_key(self.target.as_deref()) {
            return None;
        }
        let value: f64 = self.value?.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(FlowLink::new(self.source?, self.target?, value))
    }
}

/// Parse flow links, dropping rows without both endpoints and a numeric value.
pub fn parse_flow_links(text: &str) -> Result<Vec<FlowLink>> {
    let mut links = Vec::new();
    for record in reader(text).deserialize::<FlowRecord>() {
        if let Some(link) = record?.into_link() {
            links.push(link);
        }
    }
    if links.is_empty() {
        return Err(Error::EmptyFlow);
    }
    Ok(links)
}

/// Load flow links from `resource`, falling back to the static energy flow.
pub async fn load_flow_links(source: &impl CsvSource, resource: &str) -> Vec<FlowLink> {
    let fetched = match source.fetch(resource).await {
        Ok(text) => parse_flow_links(&text),
        Err(e) => Err(e),
    };
    match fetched {
        Ok(links) => {
            info!(resource, links = links.len(), "flow links loaded");
            links
        }
        Err(e) => {
            warn!(resource, error = %e, "using static flow links");
            energy_flow()
        }
    }
}
