//! Core module: item model, query state and the filter/sort/page pipeline

pub mod browser;
pub mod detail;
pub mod error;
pub mod item;
pub mod pipeline;
pub mod query;
pub mod store;

pub use browser::{CatalogBrowser, DEFAULT_PAGE_SIZE, PageView, ViewState};
pub use detail::{ItemDetail, StarBreakdown};
pub use error::{CatalogError, ConfigError, ErrorReport, LoadError, QueryError};
pub use item::{Category, Item, ItemId, PriceTier, Rating};
pub use query::{MinRating, QueryParams, QueryState, QueryUpdate, Selection, SortKey};
pub use store::{Catalog, CatalogStats, QueryableStore};
