//! Catalog item model
//!
//! Items are validated once at the loader boundary and never mutated
//! afterwards. Closed sets (category, price tier) are enums and the rating is
//! a range-checked newtype, so the pipeline never sees free-form strings or
//! `NaN`.

use crate::core::error::QueryError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog item
///
/// Ids are integers so that the `newest` sort has a defined order. Higher ids
/// are assumed to have been assigned later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Writing,
    Seo,
    Design,
    Social,
    Email,
    Monetization,
    Hosting,
    Productivity,
    Plugins,
    Security,
    Backup,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 11] = [
        Category::Writing,
        Category::Seo,
        Category::Design,
        Category::Social,
        Category::Email,
        Category::Monetization,
        Category::Hosting,
        Category::Productivity,
        Category::Plugins,
        Category::Security,
        Category::Backup,
    ];

    /// Slug used in documents and query controls (e.g. "seo")
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Writing => "writing",
            Category::Seo => "seo",
            Category::Design => "design",
            Category::Social => "social",
            Category::Email => "email",
            Category::Monetization => "monetization",
            Category::Hosting => "hosting",
            Category::Productivity => "productivity",
            Category::Plugins => "plugins",
            Category::Security => "security",
            Category::Backup => "backup",
        }
    }

    /// Human-readable name shown on cards and in the detail view
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Writing => "Writing & Editing",
            Category::Seo => "SEO & Analytics",
            Category::Design => "Design & Graphics",
            Category::Social => "Social Media",
            Category::Email => "Email Marketing",
            Category::Monetization => "Monetization",
            Category::Hosting => "Hosting & Domain",
            Category::Productivity => "Productivity",
            Category::Plugins => "WordPress Plugins",
            Category::Security => "Security",
            Category::Backup => "Backup & Recovery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| QueryError::UnknownCategory(s.to_string()))
    }
}

/// Pricing model of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Free,
    Paid,
    Freemium,
}

impl PriceTier {
    pub const ALL: [PriceTier; 3] = [PriceTier::Free, PriceTier::Paid, PriceTier::Freemium];

    pub fn slug(&self) -> &'static str {
        match self {
            PriceTier::Free => "free",
            PriceTier::Paid => "paid",
            PriceTier::Freemium => "freemium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Free => "Free",
            PriceTier::Paid => "Paid",
            PriceTier::Freemium => "Freemium",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PriceTier {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceTier::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| QueryError::UnknownPriceTier(s.to_string()))
    }
}

/// Average user rating, always finite and within `0.0..=5.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    pub const MAX: f64 = 5.0;

    /// Returns `None` for `NaN`, infinities and values outside `0.0..=5.0`
    ///
    /// `-0.0` is stored as `0.0`.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=Self::MAX).contains(&value)).then_some(Self(value + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    /// Icon class name, a presentation hint
    pub icon: String,
    /// Icon background (CSS colour or gradient), a presentation hint
    pub icon_bg: String,
    pub description: String,
    pub link: String,
    pub price: PriceTier,
    pub rating: Rating,
    pub review_count: u64,
    pub popular: bool,
    /// Part of the record, not used by filtering or sorting
    pub featured: bool,
    pub tags: Vec<String>,
}

impl Item {
    /// Create an item with empty text fields, a free price tier and a zero rating
    pub fn new(id: u64, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            category,
            icon: String::new(),
            icon_bg: String::new(),
            description: String::new(),
            link: String::new(),
            price: PriceTier::Free,
            rating: Rating(0.0),
            review_count: 0,
            popular: false,
            featured: false,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_price(mut self, price: PriceTier) -> Self {
        self.price = price;
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_reviews(mut self, review_count: u64) -> Self {
        self.review_count = review_count;
        self
    }

    pub fn with_popular(mut self, popular: bool) -> Self {
        self.popular = popular;
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>, icon_bg: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.icon_bg = icon_bg.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
