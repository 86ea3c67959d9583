//! The catalog browser: one catalog, one query state, cached results
//!
//! [`CatalogBrowser`] is the API the presentation layer talks to. Every
//! mutation of the query state re-runs the pipeline in full and caches the
//! ordered match list until the next mutation, so reads are cheap.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut browser = CatalogBrowser::new(catalog, 12);
//! browser.set_query(QueryUpdate::new().search("seo"));
//! render(browser.visible_items());
//! if browser.has_more() {
//!     browser.load_more();
//!     append(browser.newly_visible());
//! }
//! ```

use crate::config::CatalogConfig;
use crate::core::item::{Item, ItemId};
use crate::core::pipeline;
use crate::core::query::{QueryState, QueryUpdate};
use crate::core::store::{Catalog, QueryableStore};
use serde::Serialize;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// What the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// At least one item matches
    Results,
    /// The catalog is loaded but nothing matches: offer "clear filters"
    NoMatches,
    /// The catalog could not be loaded: offer "retry"
    Unavailable,
}

/// Snapshot of everything needed to render the grid
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub items: Vec<&'a Item>,
    pub page: usize,
    pub page_size: usize,
    pub visible_count: usize,
    pub total_match_count: usize,
    pub catalog_size: usize,
    pub has_more: bool,
    /// Whether "clear filters" would change the result
    pub filters_active: bool,
    pub state: ViewState,
}

/// Owns the immutable catalog and the single mutable query state
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    catalog: Catalog,
    query: QueryState,
    page_size: usize,
    matches: Vec<usize>,
}

impl CatalogBrowser {
    /// Create a browser showing the default query
    ///
    /// A `page_size` of zero is treated as one.
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        let mut browser = Self {
            catalog,
            query: QueryState::default(),
            page_size: page_size.max(1),
            matches: Vec::new(),
        };
        browser.refresh();
        browser
    }

    pub fn from_config(catalog: Catalog, config: &CatalogConfig) -> Self {
        Self::new(catalog, config.page_size)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items in the whole catalog, ignoring filters
    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    /// Apply a partial query update
    ///
    /// Returns `true` if the query changed. Any change resets to page 1.
    pub fn set_query(&mut self, update: QueryUpdate) -> bool {
        if update.is_empty() || !self.query.apply(update) {
            return false;
        }
        self.refresh();
        tracing::debug!(
            search = %self.query.search_term(),
            category = %self.query.category(),
            price = %self.query.price(),
            min_rating = %self.query.min_rating(),
            sort = %self.query.sort(),
            matches = self.matches.len(),
            "Query updated"
        );
        true
    }

    /// Reveal the next page
    ///
    /// Returns `false` (and leaves the page unchanged) when everything is
    /// already visible.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.query.next_page();
        tracing::debug!(
            page = self.query.page(),
            visible = self.visible_count(),
            total = self.matches.len(),
            "Loaded more items"
        );
        true
    }

    /// Clear search, filters and sort, back to page 1
    pub fn reset_to_defaults(&mut self) {
        if self.query == QueryState::default() {
            return;
        }
        self.query.reset();
        self.refresh();
        tracing::debug!(matches = self.matches.len(), "Query reset to defaults");
    }

    /// Number of items matching every active filter
    pub fn total_match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn visible_count(&self) -> usize {
        pipeline::visible_len(self.query.page(), self.page_size, self.matches.len())
    }

    /// Whether another page of matches remains
    pub fn has_more(&self) -> bool {
        pipeline::has_more(self.query.page(), self.page_size, self.matches.len())
    }

    /// The visible prefix of the filtered and sorted matches
    pub fn visible_items(&self) -> Vec<&Item> {
        self.resolve(&self.matches[..self.visible_count()])
    }

    /// Only the items revealed by the current page
    pub fn newly_visible(&self) -> Vec<&Item> {
        let end = self.visible_count();
        let start = (self.query.page() - 1)
            .saturating_mul(self.page_size)
            .min(end);
        self.resolve(&self.matches[start..end])
    }

    /// Look up an item for the detail view
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.catalog.get(id)
    }

    pub fn view_state(&self) -> ViewState {
        if self.matches.is_empty() {
            ViewState::NoMatches
        } else {
            ViewState::Results
        }
    }

    pub fn view(&self) -> PageView<'_> {
        PageView {
            items: self.visible_items(),
            page: self.query.page(),
            page_size: self.page_size,
            visible_count: self.visible_count(),
            total_match_count: self.total_match_count(),
            catalog_size: self.catalog_size(),
            has_more: self.has_more(),
            filters_active: self.query.has_active_filters(),
            state: self.view_state(),
        }
    }

    fn refresh(&mut self) {
        let filtered = self.catalog.apply_filters(&self.query);
        self.matches = self.catalog.apply_sort(filtered, self.query.sort());
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Item> {
        let items = self.catalog.list_all();
        indices.iter().map(|&index| &items[index]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::Category;
    use crate::core::query::{Selection, SortKey};

    fn browser_with(count: u64, page_size: usize) -> CatalogBrowser {
        let items = (1..=count)
            .map(|id| Item::new(id, format!("tool-{id:02}"), Category::Productivity))
            .collect();
        CatalogBrowser::new(Catalog::new(items).unwrap(), page_size)
    }

    #[test]
    fn test_initial_view() {
        let browser = browser_with(30, 12);
        assert_eq!(browser.total_match_count(), 30);
        assert_eq!(browser.visible_items().len(), 12);
        assert!(browser.has_more());
        assert_eq!(browser.view_state(), ViewState::Results);
    }

    #[test]
    fn test_load_more_until_exhausted() {
        let mut browser = browser_with(30, 12);
        assert!(browser.load_more());
        assert_eq!(browser.visible_count(), 24);
        assert!(browser.load_more());
        assert_eq!(browser.visible_count(), 30);
        assert!(!browser.has_more());
        assert!(!browser.load_more());
        assert_eq!(browser.query().page(), 3);
    }

    #[test]
    fn test_newly_visible_is_last_page_only() {
        let mut browser = browser_with(30, 12);
        assert_eq!(browser.newly_visible().len(), 12);
        browser.load_more();
        browser.load_more();

        let fresh: Vec<&str> = browser
            .newly_visible()
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(fresh.len(), 6);
        assert_eq!(fresh.first(), Some(&"tool-25"));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let browser = browser_with(3, 0);
        assert_eq!(browser.page_size(), 1);
        assert_eq!(browser.visible_count(), 1);
    }

    #[test]
    fn test_no_matches_state() {
        let mut browser = browser_with(5, 12);
        browser.set_query(QueryUpdate::new().category(Selection::Only(Category::Security)));
        assert_eq!(browser.total_match_count(), 0);
        assert!(!browser.has_more());
        assert!(browser.visible_items().is_empty());
        assert_eq!(browser.view().state, ViewState::NoMatches);
    }

    #[test]
    fn test_unchanged_query_keeps_pages() {
        let mut browser = browser_with(30, 12);
        browser.load_more();
        assert!(!browser.set_query(QueryUpdate::new().sort(SortKey::Popular)));
        assert_eq!(browser.visible_count(), 24);
    }

    #[test]
    fn test_empty_update_is_not_a_change() {
        let mut browser = browser_with(30, 12);
        browser.load_more();
        assert!(!browser.set_query(QueryUpdate::new()));
        assert_eq!(browser.query().page(), 2);
    }

    #[test]
    fn test_view_reports_active_filters() {
        let mut browser = browser_with(30, 12);
        assert!(!browser.view().filters_active);

        browser.set_query(QueryUpdate::new().sort(SortKey::Name));
        assert!(!browser.view().filters_active);

        browser.set_query(QueryUpdate::new().search("tool-1"));
        assert!(browser.view().filters_active);

        browser.reset_to_defaults();
        assert!(!browser.view().filters_active);
    }

    #[test]
    fn test_view_snapshot() {
        let mut browser = browser_with(13, 12);
        browser.load_more();
        let view = browser.view();
        assert_eq!(view.page, 2);
        assert_eq!(view.visible_count, 13);
        assert_eq!(view.items.len(), 13);
        assert_eq!(view.catalog_size, 13);
        assert!(!view.has_more);
    }
}
