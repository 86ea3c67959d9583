//! Presentation-neutral view models for a single item

use crate::core::item::{Item, ItemId, Rating};
use serde::Serialize;

/// How many full, half and empty stars represent a rating out of five
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarBreakdown {
    pub fn for_rating(rating: Rating) -> Self {
        let value = rating.value();
        // Rating is bounded to 0..=5, so these casts cannot truncate.
        let full = value.floor() as u8;
        let half = value.fract() != 0.0;
        let empty = 5 - value.ceil() as u8;
        Self { full, half, empty }
    }

    pub fn total(&self) -> u8 {
        self.full + u8::from(self.half) + self.empty
    }
}

/// Everything the detail view shows for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub id: ItemId,
    pub name: String,
    pub icon: String,
    pub icon_bg: String,
    pub category: String,
    pub price: String,
    pub rating_text: String,
    pub stars: StarBreakdown,
    pub description: String,
    pub tags: Vec<String>,
    pub link: String,
    pub share_text: String,
}

impl From<&Item> for ItemDetail {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            icon: item.icon.clone(),
            icon_bg: item.icon_bg.clone(),
            category: item.category.display_name().to_string(),
            price: item.price.label().to_string(),
            rating_text: format!(
                "{} ({} reviews)",
                item.rating,
                group_thousands(item.review_count)
            ),
            stars: StarBreakdown::for_rating(item.rating),
            description: item.description.clone(),
            tags: item.tags.clone(),
            link: item.link.clone(),
            share_text: share_text(item),
        }
    }
}

/// Text copied when an item is shared
pub fn share_text(item: &Item) -> String {
    format!("Check out {}: {}", item.name, item.link)
}

/// `1234567` becomes `"1,234,567"`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
