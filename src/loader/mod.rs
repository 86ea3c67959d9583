//! Catalog loading
//!
//! A [`CatalogSource`] fetches the raw document; [`decode_catalog`] parses it
//! and validates every record. The catalog is loaded once at startup. A
//! failure here is a [`LoadError`], which callers must keep distinct from an
//! empty match list.

pub mod record;
pub mod sources;

pub use record::{CatalogDocument, ItemRecord, split_tags};
#[cfg(feature = "http")]
pub use sources::HttpSource;
pub use sources::{CatalogSource, DocumentFormat, FileSource, StaticSource};

use crate::core::error::LoadError;
use crate::core::item::Item;
use crate::core::store::Catalog;

/// Fetch, decode and validate a catalog
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog, LoadError> {
    let document = source.fetch().await?;
    let catalog = decode_catalog(&document, source.format())?;
    tracing::info!(
        source = %source.describe(),
        items = catalog.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Parse a document and validate every record
///
/// The first invalid record fails the whole document.
pub fn decode_catalog(document: &str, format: DocumentFormat) -> Result<Catalog, LoadError> {
    let parsed: CatalogDocument = match format {
        DocumentFormat::Json => serde_json::from_str(document).map_err(|e| LoadError::Decode {
            message: e.to_string(),
        })?,
        DocumentFormat::Yaml => serde_yaml::from_str(document).map_err(|e| LoadError::Decode {
            message: e.to_string(),
        })?,
    };

    let items = parsed
        .items
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_item(index))
        .collect::<Result<Vec<Item>, _>>()?;

    Catalog::new(items)
}
