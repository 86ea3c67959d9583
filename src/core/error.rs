//! Typed error handling for the catalog browser
//!
//! Errors are grouped by the boundary they come from so callers can pick the
//! right recovery action:
//!
//! - [`LoadError`]: the catalog could not be fetched or decoded (offer a retry)
//! - [`ConfigError`]: the browser configuration is unreadable or invalid
//! - [`QueryError`]: a presentation control produced a value the query state
//!   does not recognise (a UI bug, reported instead of silently defaulting)
//!
//! Zero matches is *not* an error. It is reported through
//! [`ViewState::NoMatches`](crate::core::browser::ViewState::NoMatches).
//!
//! # Example
//!
//! ```rust,ignore
//! match BrowseSession::from_config_file("catalog.yaml").await {
//!     Ok(session) => run(session),
//!     Err(err) if err.is_retryable() => show_retry(err.to_report()),
//!     Err(err) => eprintln!("{} ({})", err, err.error_code()),
//! }
//! ```

use serde::Serialize;

/// The main error type for the catalog browser
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog document could not be fetched or decoded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A query control produced an unrecognised value
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Serializable error summary handed to the presentation layer
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorReport {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Whether reloading the catalog may fix the problem
    pub retryable: bool,
}

impl CatalogError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Load(e) => e.error_code(),
            CatalogError::Config(_) => "CONFIG_ERROR",
            CatalogError::Query(e) => e.error_code(),
        }
    }

    /// Whether a retry of the catalog load is a sensible recovery
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Load(e) => e.is_retryable(),
            CatalogError::Config(_) | CatalogError::Query(_) => false,
        }
    }

    /// Convert to a report for display
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.error_code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors raised while fetching or decoding the catalog document
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be read from disk
    #[error("Failed to read catalog '{path}': {message}")]
    Io { path: String, message: String },

    /// The document could not be fetched from a remote source
    #[error("Failed to fetch catalog from '{url}': {message}")]
    Fetch { url: String, message: String },

    /// The document is not well-formed JSON/YAML or has the wrong shape
    #[error("Failed to decode catalog document: {message}")]
    Decode { message: String },

    /// A record carries a value that cannot be turned into a valid item
    #[error("Invalid catalog record #{index} field '{field}': {message}")]
    InvalidRecord {
        index: usize,
        field: String,
        message: String,
    },

    /// Two records share the same id
    #[error("Duplicate item id {id} (records #{first} and #{second})")]
    DuplicateId { id: u64, first: usize, second: usize },

    /// The document format cannot be determined or is not supported
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "CATALOG_IO_ERROR",
            LoadError::Fetch { .. } => "CATALOG_FETCH_ERROR",
            LoadError::Decode { .. } => "CATALOG_DECODE_ERROR",
            LoadError::InvalidRecord { .. } => "CATALOG_INVALID_RECORD",
            LoadError::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            LoadError::UnsupportedFormat(_) => "CATALOG_UNSUPPORTED_FORMAT",
        }
    }

    /// Transport failures may succeed on retry, bad data will not
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Io { .. } | LoadError::Fetch { .. })
    }

    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.error_code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }

    pub(crate) fn invalid(index: usize, field: &str, message: impl Into<String>) -> Self {
        LoadError::InvalidRecord {
            index,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    /// A configuration value is out of range
    #[error("Invalid config: {message}")]
    Invalid { message: String },
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised when presentation input cannot be mapped onto the query state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Unknown sort key: '{0}'")]
    UnknownSortKey(String),

    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    #[error("Unknown price tier: '{0}'")]
    UnknownPriceTier(String),

    /// Minimum rating must be an integer between 0 and 5
    #[error("Invalid minimum rating: '{0}'")]
    InvalidRating(String),

    #[error("Unknown query field: '{0}'")]
    UnknownField(String),
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownSortKey(_) => "UNKNOWN_SORT_KEY",
            QueryError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            QueryError::UnknownPriceTier(_) => "UNKNOWN_PRICE_TIER",
            QueryError::InvalidRating(_) => "INVALID_RATING",
            QueryError::UnknownField(_) => "UNKNOWN_QUERY_FIELD",
        }
    }
}
