//! # Catalog Browser
//!
//! Search, filter, sort and paginate a static catalog of tool listings.
//!
//! ## Features
//!
//! - **Validated Loading**: JSON or YAML documents decoded into typed items;
//!   malformed records are rejected, never passed through as `NaN` or unknown
//!   strings
//! - **Composable Filters**: search, category, price tier and minimum rating
//!   combined as a conjunction
//! - **Stable Sorting**: popular, rating, name and newest orderings
//! - **Cumulative Pagination**: "load more" appends a page; any query change
//!   starts over at page 1
//! - **Distinct Failure States**: "catalog unavailable" is never confused with
//!   "no matches"
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let catalog = load_catalog(&FileSource::new("data/tools.json")?).await?;
//! let mut browser = CatalogBrowser::new(catalog, DEFAULT_PAGE_SIZE);
//!
//! browser.set_query(
//!     QueryUpdate::new()
//!         .search("seo")
//!         .min_rating(Selection::parse("4")?)
//!         .sort(SortKey::Rating),
//! );
//!
//! for item in browser.visible_items() {
//!     println!("{} ({})", item.name, item.rating);
//! }
//! if browser.has_more() {
//!     browser.load_more();
//! }
//! ```

pub mod config;
pub mod core;
pub mod loader;
pub mod session;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{Category, Item, ItemId, PriceTier, Rating};

    // === Query ===
    pub use crate::core::{MinRating, QueryParams, QueryState, QueryUpdate, Selection, SortKey};

    // === Pipeline ===
    pub use crate::core::pipeline;
    pub use crate::core::{
        Catalog, CatalogBrowser, CatalogStats, DEFAULT_PAGE_SIZE, PageView, QueryableStore,
        ViewState,
    };

    // === Detail View ===
    pub use crate::core::{ItemDetail, StarBreakdown};

    // === Errors ===
    pub use crate::core::{CatalogError, ConfigError, ErrorReport, LoadError, QueryError};

    // === Loading ===
    #[cfg(feature = "http")]
    pub use crate::loader::HttpSource;
    pub use crate::loader::{
        CatalogSource, DocumentFormat, FileSource, StaticSource, decode_catalog, load_catalog,
    };

    // === Config & Session ===
    pub use crate::config::CatalogConfig;
    pub use crate::session::{BrowseSession, SessionState};

    // === External dependencies ===
    pub use async_trait::async_trait;
}
