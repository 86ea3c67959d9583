//! Query state and the partial updates the presentation layer sends
//!
//! [`QueryState`] is owned by a single [`CatalogBrowser`](crate::core::browser::CatalogBrowser)
//! and only changes through [`QueryUpdate`], `next_page` and `reset`, which
//! keeps the page-reset rule in one place.
//!
//! Raw control values (dropdown values, the search box) arrive as strings and
//! are parsed by [`QueryParams`]. Unrecognised values are rejected with a
//! [`QueryError`] instead of being ignored.
//!
//! # Example
//! ```rust,ignore
//! let params: QueryParams = serde_json::from_str(r#"{"category": "seo", "rating": "4"}"#)?;
//! browser.set_query(params.into_update()?);
//! ```

use crate::core::error::QueryError;
use crate::core::item::{Category, PriceTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal used by form controls for "no filter"
pub const ALL: &str = "all";

/// A filter choice: either every value or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this selection
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> Selection<T>
where
    T: FromStr<Err = QueryError>,
{
    /// Parse a control value, where `"all"` means no filter
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let raw = raw.trim();
        if raw == ALL {
            Ok(Selection::All)
        } else {
            raw.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Inclusive minimum rating threshold (0 to 5 stars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MinRating(u8);

impl MinRating {
    pub fn new(stars: u8) -> Option<Self> {
        (stars <= 5).then_some(Self(stars))
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for MinRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MinRating {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(MinRating::new)
            .ok_or_else(|| QueryError::InvalidRating(s.to_string()))
    }
}

/// Ordering strategy applied to the filtered items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Popular items first, then by review count (descending)
    #[default]
    Popular,
    /// Highest rating first
    Rating,
    /// Alphabetical, ignoring case
    Name,
    /// Highest id first
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Popular,
        SortKey::Rating,
        SortKey::Name,
        SortKey::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
            SortKey::Newest => "newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| QueryError::UnknownSortKey(s.to_string()))
    }
}

/// The active search, filter, sort and page parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState {
    search_term: String,
    category: Selection<Category>,
    price: Selection<PriceTier>,
    min_rating: Selection<MinRating>,
    sort: SortKey,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: Selection::All,
            price: Selection::All,
            min_rating: Selection::All,
            sort: SortKey::Popular,
            page: 1,
        }
    }
}

impl QueryState {
    /// Raw search term as typed
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Trimmed, lower-cased search term; empty means "no search filter"
    pub fn normalized_search(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    pub fn category(&self) -> Selection<Category> {
        self.category
    }

    pub fn price(&self) -> Selection<PriceTier> {
        self.price
    }

    pub fn min_rating(&self) -> Selection<MinRating> {
        self.min_rating
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current page, 1-based
    pub fn page(&self) -> usize {
        self.page
    }

    /// Whether any filter or search term narrows the result
    pub fn has_active_filters(&self) -> bool {
        !self.normalized_search().is_empty()
            || !self.category.is_all()
            || !self.price.is_all()
            || !self.min_rating.is_all()
    }

    /// Apply a partial update
    ///
    /// Returns `true` when any field actually changed, in which case the page
    /// goes back to 1.
    pub fn apply(&mut self, update: QueryUpdate) -> bool {
        let mut changed = false;

        if let Some(term) = update.search_term
            && term != self.search_term
        {
            self.search_term = term;
            changed = true;
        }
        if let Some(category) = update.category
            && category != self.category
        {
            self.category = category;
            changed = true;
        }
        if let Some(price) = update.price
            && price != self.price
        {
            self.price = price;
            changed = true;
        }
        if let Some(min_rating) = update.min_rating
            && min_rating != self.min_rating
        {
            self.min_rating = min_rating;
            changed = true;
        }
        if let Some(sort) = update.sort
            && sort != self.sort
        {
            self.sort = sort;
            changed = true;
        }

        if changed {
            self.page = 1;
        }
        changed
    }

    /// Advance to the next page
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Back to defaults ("clear all filters")
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A partial change to [`QueryState`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryUpdate {
    pub search_term: Option<String>,
    pub category: Option<Selection<Category>>,
    pub price: Option<Selection<PriceTier>>,
    pub min_rating: Option<Selection<MinRating>>,
    pub sort: Option<SortKey>,
}

impl QueryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn category(mut self, category: Selection<Category>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn price(mut self, price: Selection<PriceTier>) -> Self {
        self.price = Some(price);
        self
    }

    pub fn min_rating(mut self, min_rating: Selection<MinRating>) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Whether the update leaves every field untouched
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Build an update from `(control, value)` pairs as sent by a form
    ///
    /// Recognised controls: `search`, `category`, `price`, `rating`, `sort`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::new();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "search" => update.search_term = Some(value.to_string()),
                "category" => update.category = Some(Selection::parse(value)?),
                "price" => update.price = Some(Selection::parse(value)?),
                "rating" => update.min_rating = Some(Selection::parse(value)?),
                "sort" => update.sort = Some(value.trim().parse()?),
                other => return Err(QueryError::UnknownField(other.to_string())),
            }
        }
        Ok(update)
    }
}

/// Raw query parameters as strings, e.g. decoded from a URL or form state
///
/// # Format
/// ```text
/// {"search": "seo", "category": "seo", "price": "free", "rating": "4", "sort": "name"}
/// ```
/// Any field may be omitted. `"all"` clears the corresponding filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub sort: Option<String>,
}

impl QueryParams {
    /// Validate every present value and turn the parameters into an update
    pub fn into_update(self) -> Result<QueryUpdate, QueryError> {
        Ok(QueryUpdate {
            search_term: self.search,
            category: self.category.as_deref().map(Selection::parse).transpose()?,
            price: self.price.as_deref().map(Selection::parse).transpose()?,
            min_rating: self.rating.as_deref().map(Selection::parse).transpose()?,
            sort: self.sort.as_deref().map(|s| s.trim().parse()).transpose()?,
        })
    }
}
