//! Where CSV text comes from.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use reqwest::Url;
use tracing::debug;

use crate::error::{Error, Result};

/// Fetches CSV text by resource path.
pub trait CsvSource {
    fn fetch(&self, resource: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches resources over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| Error::Url(format!("{base}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    fn url(&self, resource: &str) -> Result<Url> {
        self.base
            .join(resource)
            .map_err(|e| Error::Url(format!("{resource}: {e}")))
    }
}

impl CsvSource for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<String> {
        let url = self.url(resource)?;
        debug!(%url, "fetching CSV");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Reads resources from a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, resource: &str) -> Result<PathBuf> {
        let relative = Path::new(resource);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::NotFound(resource.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl CsvSource for DirSource {
    async fn fetch(&self, resource: &str) -> Result<String> {
        let path = self.path(resource)?;
        debug!(path = %path.display(), "reading CSV");
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })
    }
}

/// Resources held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(resource, text);
        self
    }

    pub fn insert(&mut self, resource: impl Into<String>, text: impl Into<String>) {
        self.files.insert(resource.into(), text.into());
    }
}

impl CsvSource for MemorySource {
    async fn fetch(&self, resource: &str) -> Result<String> {
        self.files
            .get(resource)
            .cloned()
            .ok_or_else(|| Error::NotFound(resource.to_string()))
    }
}

/// A source picked at runtime from a location string.
#[derive(Debug, Clone)]
pub enum DataSource {
    Http(HttpSource),
    Dir(DirSource),
}

impl DataSource {
    /// `http://` and `https://` locations fetch remotely; anything else is a directory.
    pub fn from_location(location: &str) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(DataSource::Http(HttpSource::new(location)?))
        } else {
            Ok(DataSource::Dir(DirSource::new(location)))
        }
    }
}

impl CsvSource for DataSource {
    async fn fetch(&self, resource: &str) -> Result<String> {
        match self {
            DataSource::Http(source) => source.fetch(resource).await,
            DataSource::Dir(source) => source.fetch(resource).await,
        }
    }
}
