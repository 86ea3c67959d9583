//! Configuration loading and management

use crate::core::browser::DEFAULT_PAGE_SIZE;
use crate::core::error::{ConfigError, LoadError};
use crate::loader::{DocumentFormat, FileSource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Configuration for a catalog browser
///
/// # Example
/// ```yaml
/// page_size: 12
/// source: data/tools.json
/// format: json   # optional, inferred from the extension when absent
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CatalogConfig {
    /// Items revealed per "load more"
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 200, message = "page_size must be between 1 and 200"))]
    pub page_size: usize,

    /// Path of the catalog document
    pub source: PathBuf,

    /// Document format; inferred from `source` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DocumentFormat>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
    }

    /// The file source described by this configuration
    pub fn file_source(&self) -> Result<FileSource, LoadError> {
        match self.format {
            Some(format) => Ok(FileSource::with_format(&self.source, format)),
            None => FileSource::new(&self.source),
        }
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            source: PathBuf::from("data/tools.json"),
            format: None,
        }
    }
}
