//! Immutable catalog store with filtering and sorting

use crate::core::error::LoadError;
use crate::core::item::{Category, Item, ItemId, PriceTier};
use crate::core::pipeline;
use crate::core::query::{QueryState, SortKey};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Trait for stores that support filtering and sorting
///
/// Results are indices into [`list_all`](QueryableStore::list_all), so they
/// stay valid for as long as the store does.
pub trait QueryableStore<T>: Send + Sync {
    /// Indices of the entities passing every active filter, in store order
    fn apply_filters(&self, query: &QueryState) -> Vec<usize>;

    /// Stable sort of previously filtered indices
    fn apply_sort(&self, indices: Vec<usize>, sort: SortKey) -> Vec<usize>;

    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> &[T];
}

/// The loaded item list
///
/// Cheap to clone; the items themselves are shared and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Arc<[Item]>,
    by_id: Arc<HashMap<ItemId, usize>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(items: Vec<Item>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(first) = by_id.insert(item.id, index) {
                return Err(LoadError::DuplicateId {
                    id: item.id.0,
                    first,
                    second: index,
                });
            }
        }

        Ok(Self {
            items: items.into(),
            by_id: Arc::new(by_id),
        })
    }

    /// A catalog with no items
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.by_id.get(&id).map(|&index| &self.items[index])
    }

    /// Counters shown next to the catalog (totals and per-category counts)
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.items.len(),
            ..CatalogStats::default()
        };

        for item in self.items.iter() {
            if item.popular {
                stats.popular += 1;
            }
            if item.featured {
                stats.featured += 1;
            }
            *stats.per_price.entry(item.price).or_default() += 1;
            *stats.per_category.entry(item.category).or_default() += 1;
        }

        stats
    }
}

impl QueryableStore<Item> for Catalog {
    fn apply_filters(&self, query: &QueryState) -> Vec<usize> {
        pipeline::filter_indices(&self.items, query)
    }

    fn apply_sort(&self, mut indices: Vec<usize>, sort: SortKey) -> Vec<usize> {
        pipeline::sort_indices(&self.items, &mut indices, sort);
        indices
    }

    fn list_all(&self) -> &[Item] {
        &self.items
    }
}

/// Aggregate counts over the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub popular: usize,
    pub featured: usize,
    pub per_price: BTreeMap<PriceTier, usize>,
    pub per_category: BTreeMap<Category, usize>,
}

impl CatalogStats {
    pub fn count_for(&self, category: Category) -> usize {
        self.per_category.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{QueryUpdate, Selection};

    fn sample() -> Catalog {
        Catalog::new(vec![
            Item::new(1, "Jasper", Category::Writing).with_price(PriceTier::Paid),
            Item::new(2, "Yoast", Category::Plugins)
                .with_popular(true)
                .with_reviews(40),
            Item::new(3, "Rank Math", Category::Plugins)
                .with_popular(true)
                .with_featured(true)
                .with_reviews(90),
        ])
        .expect("unique ids")
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![
            Item::new(5, "a", Category::Seo),
            Item::new(6, "b", Category::Seo),
            Item::new(5, "c", Category::Seo),
        ])
        .unwrap_err();

        match err {
            LoadError::DuplicateId { id, first, second } => {
                assert_eq!(id, 5);
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_by_id() {
        let catalog = sample();
        assert_eq!(catalog.get(ItemId(2)).map(|i| i.name.as_str()), Some("Yoast"));
        assert!(catalog.get(ItemId(99)).is_none());
    }

    #[test]
    fn test_queryable_store_filters_then_sorts() {
        let catalog = sample();
        let mut query = QueryState::default();
        query.apply(QueryUpdate::new().category(Selection::Only(Category::Plugins)));

        let filtered = catalog.apply_filters(&query);
        assert_eq!(filtered, vec![1, 2]);

        let sorted = catalog.apply_sort(filtered, SortKey::Popular);
        assert_eq!(sorted, vec![2, 1]);
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.popular, 2);
        assert_eq!(stats.featured, 1);
        assert_eq!(stats.count_for(Category::Plugins), 2);
        assert_eq!(stats.count_for(Category::Security), 0);
        assert_eq!(stats.per_price.get(&PriceTier::Free), Some(&2));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.apply_filters(&QueryState::default()).is_empty());
        assert_eq!(catalog.stats().total, 0);
    }
}
