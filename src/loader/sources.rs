//! Places a catalog document can be fetched from

use crate::core::error::LoadError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Encoding of a catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Infer the format from a file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        ext.parse().map_err(|_| {
            LoadError::UnsupportedFormat(format!(
                "cannot infer format of '{}' from its extension",
                path.display()
            ))
        })
    }
}

impl FromStr for DocumentFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => f.write_str("json"),
            DocumentFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Somewhere a catalog document can be fetched from
///
/// Implementations only fetch text; decoding and validation are shared.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Location for logs and error messages
    fn describe(&self) -> String;

    fn format(&self) -> DocumentFormat;

    /// Fetch the raw document
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// A document on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileSource {
    /// Format is inferred from the file extension
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn with_format(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn format(&self) -> DocumentFormat {
        self.format
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io {
                path: self.describe(),
                message: e.to_string(),
            })
    }
}

/// A document already in memory (embedded data, tests)
#[derive(Debug, Clone)]
pub struct StaticSource {
    document: String,
    format: DocumentFormat,
}

impl StaticSource {
    pub fn new(document: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            document: document.into(),
            format,
        }
    }

    pub fn json(document: impl Into<String>) -> Self {
        Self::new(document, DocumentFormat::Json)
    }

    pub fn yaml(document: impl Into<String>) -> Self {
        Self::new(document, DocumentFormat::Yaml)
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        format!("<static {}>", self.format)
    }

    fn format(&self) -> DocumentFormat {
        self.format
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.document.clone())
    }
}

/// A document served over HTTP
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    format: DocumentFormat,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            url: url.into(),
            format,
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn format(&self) -> DocumentFormat {
        self.format
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        let fetch_error = |message: String| LoadError::Fetch {
            url: self.url.clone(),
            message,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("server responded with {}", status)));
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}
