//! Startup session: load once, then browse or offer a retry
//!
//! A failed load leaves the session [`SessionState::Unavailable`]. That state
//! is reported as [`ViewState::Unavailable`], never as an empty result, so
//! the presentation layer offers "retry" rather than "clear filters".

use crate::config::CatalogConfig;
use crate::core::browser::{CatalogBrowser, ViewState};
use crate::core::error::{CatalogError, ErrorReport, LoadError};
use crate::loader::{CatalogSource, load_catalog};

/// Outcome of the most recent load attempt
#[derive(Debug)]
pub enum SessionState {
    Ready(CatalogBrowser),
    Unavailable(LoadError),
}

/// Owns the catalog source and whatever the last load produced
pub struct BrowseSession {
    source: Box<dyn CatalogSource>,
    page_size: usize,
    state: SessionState,
}

impl BrowseSession {
    /// Load the catalog from `source`
    pub async fn open(source: Box<dyn CatalogSource>, page_size: usize) -> Self {
        let state = Self::load(source.as_ref(), page_size).await;
        Self {
            source,
            page_size,
            state,
        }
    }

    /// Load the catalog named by `config`
    ///
    /// Fails only if the configuration does not describe a usable source;
    /// load failures still produce an unavailable session.
    pub async fn from_config(config: &CatalogConfig) -> Result<Self, LoadError> {
        let source = config.file_source()?;
        Ok(Self::open(Box::new(source), config.page_size).await)
    }

    /// Read a YAML configuration file and load the catalog it names
    pub async fn from_config_file(path: &str) -> Result<Self, CatalogError> {
        let config = CatalogConfig::from_yaml_file(path)?;
        Ok(Self::from_config(&config).await?)
    }

    /// Try loading again after a failure
    ///
    /// Does nothing if the catalog is already loaded. Returns whether the
    /// session is ready afterwards.
    pub async fn retry(&mut self) -> bool {
        if let SessionState::Unavailable(_) = self.state {
            self.state = Self::load(self.source.as_ref(), self.page_size).await;
        }
        self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn browser(&self) -> Result<&CatalogBrowser, &LoadError> {
        match &self.state {
            SessionState::Ready(browser) => Ok(browser),
            SessionState::Unavailable(err) => Err(err),
        }
    }

    pub fn browser_mut(&mut self) -> Result<&mut CatalogBrowser, &LoadError> {
        match &mut self.state {
            SessionState::Ready(browser) => Ok(browser),
            SessionState::Unavailable(err) => Err(err),
        }
    }

    pub fn view_state(&self) -> ViewState {
        match &self.state {
            SessionState::Ready(browser) => browser.view_state(),
            SessionState::Unavailable(_) => ViewState::Unavailable,
        }
    }

    /// Error to display when the catalog is unavailable
    pub fn error_report(&self) -> Option<ErrorReport> {
        match &self.state {
            SessionState::Ready(_) => None,
            SessionState::Unavailable(err) => Some(err.to_report()),
        }
    }

    async fn load(source: &dyn CatalogSource, page_size: usize) -> SessionState {
        match load_catalog(source).await {
            Ok(catalog) => SessionState::Ready(CatalogBrowser::new(catalog, page_size)),
            Err(err) => {
                tracing::warn!(
                    source = %source.describe(),
                    error = %err,
                    "Failed to load catalog"
                );
                SessionState::Unavailable(err)
            }
        }
    }
}
