//! Host configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use deck_core::ControllerConfig;

use crate::error::{Error, Result};

/// Configuration for the presentation host.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen address
    pub addr: SocketAddr,

    /// Base URL or directory holding the CSV files
    pub data_location: String,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Deck behaviour
    pub deck: ControllerConfig,
}

impl ServerConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr: SocketAddr = lookup("DECK_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()?;

        let data_location = lookup("DECK_DATA_URL").unwrap_or_else(|| "./data".to_string());
        if data_location.trim().is_empty() {
            return Err(Error::Config("DECK_DATA_URL is empty".to_string()));
        }

        let static_dir = PathBuf::from(
            lookup("DECK_STATIC_DIR").unwrap_or_else(|| "./static".to_string()),
        );

        Ok(Self {
            addr,
            data_location,
            static_dir,
            deck: ControllerConfig::default(),
        })
    }

    /// Local directory holding the CSV files, when the data is not remote.
    pub fn data_dir(&self) -> Option<PathBuf> {
        let remote = self.data_location.starts_with("http://")
            || self.data_location.starts_with("https://");
        (!remote).then(|| PathBuf::from(&self.data_location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.data_location, "./data");
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert_eq!(config.data_dir(), Some(PathBuf::from("./data")));
    }

    #[test]
    fn remote_data_has_no_dir() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DECK_DATA_URL", "https://example.org/csv")]))
                .unwrap();
        assert_eq!(config.data_dir(), None);
    }

    #[test]
    fn bad_address_is_an_error() {
        let result = ServerConfig::from_lookup(lookup(&[("DECK_ADDR", "not-an-addr")]));
        assert!(matches!(result, Err(Error::AddrParse(_))));
    }

    #[test]
    fn empty_data_location_is_an_error() {
        let result = ServerConfig::from_lookup(lookup(&[("DECK_DATA_URL", " ")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
