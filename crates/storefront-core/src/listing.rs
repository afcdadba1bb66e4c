//! Product listing pipeline.
//!
//! The listing view is a pure derivation of the full product collection, a
//! [`Filters`] set, a free-text search term and a [`SortKey`]. Nothing is
//! cached; callers recompute the view whenever any input changes.
//!
//! Dimensions combine with AND; values inside one dimension combine with OR.
//! An empty selection in a dimension places no constraint on it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::products::Product;
use crate::CoreError;

/// Upper bound of the price slider on the listing page.
pub const DEFAULT_MAX_PRICE: f64 = 300.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    /// New arrivals first, otherwise the incoming order. This is a partition
    /// on the `newArrival` flag, not a chronological sort.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
        }
    }

    /// Parses a sort key, treating anything unrecognized as [`SortKey::Name`].
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSortKey(s.to_string()))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[min, max]` price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_MAX_PRICE)
    }
}

/// The multi-valued filter dimensions, used to address a selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Category,
    Collection,
    Size,
    Color,
    Tag,
}

/// Filter side-panel state for the listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub categories: Vec<String>,
    pub collections: Vec<String>,
    pub price_range: PriceRange,
    pub sizes: Vec<String>,
    /// Color codes.
    pub colors: Vec<String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
}

impl Filters {
    fn selection_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Category => &mut self.categories,
            Dimension::Collection => &mut self.collections,
            Dimension::Size => &mut self.sizes,
            Dimension::Color => &mut self.colors,
            Dimension::Tag => &mut self.tags,
        }
    }

    /// Adds `value` to the selection for `dimension`, or removes it if it is
    /// already selected.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let selection = self.selection_mut(dimension);
        if let Some(pos) = selection.iter().position(|v| v == value) {
            selection.remove(pos);
        } else {
            selection.push(value.to_string());
        }
    }

    /// Resets every dimension to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if `product` satisfies every non-empty dimension.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        selected(&self.categories, |c| *c == product.category)
            && selected(&self.collections, |c| {
                product.collection.as_deref() == Some(c.as_str())
            })
            && self.price_range.contains(product.price)
            && selected(&self.sizes, |s| product.sizes.contains(s))
            && selected(&self.colors, |code| {
                product.colors.iter().any(|c| c.code == *code)
            })
            && selected(&self.tags, |t| product.tags.contains(t))
            && (!self.in_stock || product.is_available())
    }
}

/// Empty selection means "all"; otherwise any selected value may match.
fn selected<F>(selection: &[String], pred: F) -> bool
where
    F: Fn(&String) -> bool,
{
    selection.is_empty() || selection.iter().any(pred)
}

/// Case-insensitive match of `term` against name, description, or any tag.
#[must_use]
pub fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
        || product
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
}

/// Sorts in place. All orderings are stable.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::PriceLow => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Newest => products.sort_by_key(|p| !p.new_arrival),
        SortKey::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
    }
}

/// Derives the listing view: search, then filters, then sort.
#[must_use]
pub fn apply<'a>(
    products: &'a [Product],
    filters: &Filters,
    search: &str,
    sort: SortKey,
) -> Vec<&'a Product> {
    let mut view: Vec<&Product> = products
        .iter()
        .filter(|p| search.is_empty() || matches_search(p, search))
        .filter(|p| filters.matches(p))
        .collect();
    sort_products(&mut view, sort);
    view
}

/// Distinct values offered in the filter side panel, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub collections: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut facets = Self::default();
        for p in products {
            if let Some(collection) = &p.collection {
                push_unique(&mut facets.collections, collection);
            }
            for size in &p.sizes {
                push_unique(&mut facets.sizes, size);
            }
            for color in &p.colors {
                push_unique(&mut facets.colors, &color.code);
            }
            for tag in &p.tags {
                push_unique(&mut facets.tags, tag);
            }
        }
        facets
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
