//! Raw catalog records and their conversion into validated items
//!
//! Records carry every field as text, the way the catalog document is
//! authored. Conversion trims values, validates them and rejects the record
//! with a [`LoadError::InvalidRecord`] instead of letting bad values through.

use crate::core::error::LoadError;
use crate::core::item::{Category, Item, ItemId, PriceTier, Rating};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

/// Top-level shape of a catalog document
///
/// ```yaml
/// items:
///   - id: "1"
///     name: Grammarly
///     category: writing
///     ...
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(alias = "tools")]
    pub items: Vec<ItemRecord>,
}

/// One undecoded record; every field is text
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ItemRecord {
    #[serde(deserialize_with = "text")]
    pub id: String,

    #[serde(deserialize_with = "text")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,

    #[serde(deserialize_with = "text")]
    pub category: String,

    #[serde(deserialize_with = "text")]
    pub icon: String,

    #[serde(deserialize_with = "text")]
    pub icon_bg: String,

    #[serde(deserialize_with = "text")]
    pub description: String,

    #[serde(deserialize_with = "text")]
    #[validate(
        url(message = "must be a valid URL"),
        custom(function = "web_scheme")
    )]
    pub link: String,

    #[serde(deserialize_with = "text")]
    pub price: String,

    #[serde(deserialize_with = "text")]
    pub rating: String,

    #[serde(deserialize_with = "text")]
    pub reviews: String,

    #[serde(deserialize_with = "text")]
    pub popular: String,

    #[serde(deserialize_with = "text")]
    pub featured: String,

    /// Comma-separated; a list is accepted too
    #[serde(deserialize_with = "text")]
    pub tags: String,
}

impl ItemRecord {
    /// Validate and convert; `index` is the record's position in the document
    pub fn into_item(self, index: usize) -> Result<Item, LoadError> {
        let record = self.trimmed();
        record
            .validate()
            .map_err(|errors| first_violation(index, &errors))?;

        let id = record.id.parse::<u64>().map_err(|_| {
            LoadError::invalid(
                index,
                "id",
                format!("expected a non-negative integer, got '{}'", record.id),
            )
        })?;

        let category = record
            .category
            .parse::<Category>()
            .map_err(|e| LoadError::invalid(index, "category", e.to_string()))?;

        let price = record
            .price
            .parse::<PriceTier>()
            .map_err(|e| LoadError::invalid(index, "price", e.to_string()))?;

        let rating = record
            .rating
            .parse::<f64>()
            .ok()
            .and_then(Rating::new)
            .ok_or_else(|| {
                LoadError::invalid(
                    index,
                    "rating",
                    format!("expected a number between 0 and 5, got '{}'", record.rating),
                )
            })?;

        let review_count = record.reviews.parse::<u64>().map_err(|_| {
            LoadError::invalid(
                index,
                "reviews",
                format!("expected a non-negative integer, got '{}'", record.reviews),
            )
        })?;

        let popular = parse_flag(&record.popular)
            .ok_or_else(|| flag_error(index, "popular", &record.popular))?;
        let featured = parse_flag(&record.featured)
            .ok_or_else(|| flag_error(index, "featured", &record.featured))?;

        Ok(Item {
            id: ItemId(id),
            name: record.name,
            category,
            icon: record.icon,
            icon_bg: record.icon_bg,
            description: record.description,
            link: record.link,
            price,
            rating,
            review_count,
            popular,
            featured,
            tags: split_tags(&record.tags),
        })
    }

    fn trimmed(self) -> Self {
        fn trim(s: String) -> String {
            let t = s.trim();
            if t.len() == s.len() { s } else { t.to_string() }
        }

        Self {
            id: trim(self.id),
            name: trim(self.name),
            category: trim(self.category),
            icon: trim(self.icon),
            icon_bg: trim(self.icon_bg),
            description: trim(self.description),
            link: trim(self.link),
            price: trim(self.price),
            rating: trim(self.rating),
            reviews: trim(self.reviews),
            popular: trim(self.popular),
            featured: trim(self.featured),
            tags: trim(self.tags),
        }
    }
}

/// Split a comma-separated tag list, dropping empty entries
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"true"` / `"false"`, with an absent value meaning `false`
fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" | "" => Some(false),
        _ => None,
    }
}

fn flag_error(index: usize, field: &str, raw: &str) -> LoadError {
    LoadError::invalid(
        index,
        field,
        format!("expected 'true' or 'false', got '{}'", raw),
    )
}

fn web_scheme(link: &str) -> Result<(), ValidationError> {
    if link.starts_with("http://") || link.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("scheme");
        err.message = Some("must use http or https".into());
        Err(err)
    }
}

fn first_violation(index: usize, errors: &ValidationErrors) -> LoadError {
    let mut violations: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    violations.sort();

    match violations.into_iter().next() {
        Some((field, message)) => LoadError::invalid(index, &field, message),
        None => LoadError::invalid(index, "record", errors.to_string()),
    }
}

/// Accept strings, numbers, booleans, null and lists of those as text
///
/// Lists are joined with commas so `tags: [a, b]` reads like `tags: "a,b"`.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<String, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut parts = Vec::new();
            while let Some(part) = seq.next_element::<String>()? {
                parts.push(part);
            }
            Ok(parts.join(","))
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
