//! Filter, sort and paginate
//!
//! Pure functions over an immutable item slice and a [`QueryState`]. They
//! work on indices into the slice so an owner can cache the ordered match
//! list between interactions without borrowing from itself.
//!
//! The pipeline has three steps:
//!
//! 1. **Filter**: conjunction of the search, category, price and rating
//!    predicates. Inactive predicates (`All`, empty search) accept everything.
//! 2. **Sort**: one stable strategy per [`SortKey`]; ties keep input order.
//! 3. **Paginate**: the visible prefix is `page * page_size` long. Pages
//!    accumulate, they are not windows.

use crate::core::item::Item;
use crate::core::query::{QueryState, Selection, SortKey};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Whether `item` passes every active predicate of `query`
pub fn matches(item: &Item, query: &QueryState) -> bool {
    matches_with(item, query, &query.normalized_search())
}

fn matches_with(item: &Item, query: &QueryState, needle: &str) -> bool {
    matches_search(item, needle)
        && query.category().accepts(&item.category)
        && query.price().accepts(&item.price)
        && meets_min_rating(item, query)
}

/// Case-insensitive substring match over name, description, category and tags
///
/// `needle` must already be trimmed and lower-cased. An empty needle matches.
pub fn matches_search(item: &Item, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.category.slug().contains(needle)
        || item
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn meets_min_rating(item: &Item, query: &QueryState) -> bool {
    match query.min_rating() {
        Selection::All => true,
        Selection::Only(min) => item.rating.value() >= f64::from(min.stars()),
    }
}

/// Indices of the items matching `query`, in input order
pub fn filter_indices(items: &[Item], query: &QueryState) -> Vec<usize> {
    let needle = query.normalized_search();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_with(item, query, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// Stable sort of `indices` by the given strategy
pub fn sort_indices(items: &[Item], indices: &mut [usize], sort: SortKey) {
    indices.sort_by(|&a, &b| compare(&items[a], &items[b], sort));
}

/// Comparison used for `sort`; `Equal` means "keep input order"
pub fn compare(a: &Item, b: &Item, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Popular => b
            .popular
            .cmp(&a.popular)
            .then_with(|| b.review_count.cmp(&a.review_count)),
        SortKey::Rating => b.rating.value().total_cmp(&a.rating.value()),
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Newest => b.id.cmp(&a.id),
    }
}

/// Alphabetical order ignoring case and accents
///
/// Compared level by level: base letters first (so "Élégant" sorts between
/// "E" and "F"), then accents, then case with the lower-case form first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| b.cmp(a))
}

/// Lower-cased letters with combining marks removed
fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    accented(name).filter(|&c| !is_combining_mark(c))
}

/// Lower-cased canonical decomposition
fn accented(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

/// Filtered and sorted indices for `query`
pub fn select(items: &[Item], query: &QueryState) -> Vec<usize> {
    let mut indices = filter_indices(items, query);
    sort_indices(items, &mut indices, query.sort());
    indices
}

/// Length of the visible prefix: `min(page * page_size, total)`
pub fn visible_len(page: usize, page_size: usize, total: usize) -> usize {
    page.saturating_mul(page_size).min(total)
}

/// Whether matches remain beyond the visible prefix
pub fn has_more(page: usize, page_size: usize, total: usize) -> bool {
    page.saturating_mul(page_size) < total
}

/// One-shot pipeline run returning the visible items for `query`
pub fn visible_items<'a>(
    items: &'a [Item],
    query: &QueryState,
    page_size: usize,
) -> Vec<&'a Item> {
    let selected = select(items, query);
    let len = visible_len(query.page(), page_size, selected.len());
    selected[..len].iter().map(|&i| &items[i]).collect()
}
