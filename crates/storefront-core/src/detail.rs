//! Product detail page: size/color selection, variant resolution, and the
//! add-to-cart and wishlist actions.
//!
//! Actions never mutate state on failure; every outcome maps to a
//! user-visible [`Notice`].

use thiserror::Error;
use uuid::Uuid;

use crate::cart::{Cart, CartItem};
use crate::products::{Product, Variant};

/// A short user-facing message, rendered as a toast by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("please select a size and a color")]
    SelectionRequired,

    #[error("the selected combination ({size}, {color}) is not available")]
    VariantUnavailable { size: String, color: String },

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("{name} ({size}, {color}) is sold out")]
    OutOfStock {
        name: String,
        size: String,
        color: String,
    },

    #[error("only {available} more in stock (requested {requested})")]
    ExceedsStock { requested: u32, available: u32 },
}

impl CartError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        let title = match self {
            CartError::SelectionRequired => "Selection required",
            CartError::VariantUnavailable { .. } => "Variant not available",
            CartError::InvalidQuantity => "Invalid quantity",
            CartError::OutOfStock { .. } => "Sold out",
            CartError::ExceedsStock { .. } => "Not enough stock",
        };
        Notice::new(title, self.to_string())
    }
}

/// The shopper's current choice on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub size: Option<String>,
    /// Color code.
    pub color: Option<String>,
    pub quantity: u32,
}

impl Selection {
    /// First listed size and color, quantity one: what the page preselects.
    #[must_use]
    pub fn default_for(product: &Product) -> Self {
        Self {
            size: product.sizes.first().cloned(),
            color: product.colors.first().map(|c| c.code.clone()),
            quantity: 1,
        }
    }

    fn size(&self) -> Option<&str> {
        self.size.as_deref().filter(|s| !s.is_empty())
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.is_empty())
    }
}

/// Finds the variant bound to `(size, color)`, if the product offers it.
#[must_use]
pub fn resolve_variant<'a>(product: &'a Product, size: &str, color: &str) -> Option<&'a Variant> {
    product
        .variants
        .iter()
        .find(|v| v.size == size && v.color == color)
}

/// Stock of the selected variant, `0` when the selection is incomplete or
/// does not exist.
#[must_use]
pub fn max_stock(product: &Product, selection: &Selection) -> u32 {
    match (selection.size(), selection.color()) {
        (Some(size), Some(color)) => resolve_variant(product, size, color).map_or(0, |v| v.stock),
        _ => 0,
    }
}

#[must_use]
pub fn is_in_stock(product: &Product, selection: &Selection) -> bool {
    max_stock(product, selection) > 0
}

/// Adds the selected variant to `cart`.
///
/// # Errors
///
/// Returns a [`CartError`] and leaves `cart` untouched when size or color is
/// missing, the pair has no variant, the quantity is zero, the variant is
/// sold out, or the cart would end up holding more than the variant's stock.
pub fn add_to_cart(
    cart: &mut Cart,
    product: &Product,
    selection: &Selection,
) -> Result<Notice, CartError> {
    let (Some(size), Some(color)) = (selection.size(), selection.color()) else {
        return Err(CartError::SelectionRequired);
    };

    let variant =
        resolve_variant(product, size, color).ok_or_else(|| CartError::VariantUnavailable {
            size: size.to_string(),
            color: color.to_string(),
        })?;

    if selection.quantity == 0 {
        return Err(CartError::InvalidQuantity);
    }

    let color_name = product
        .color_by_code(color)
        .map_or_else(|| color.to_string(), |c| c.name.clone());

    if variant.stock == 0 {
        return Err(CartError::OutOfStock {
            name: product.name.clone(),
            size: size.to_string(),
            color: color_name,
        });
    }

    let available = variant.stock.saturating_sub(cart.quantity_of(&variant.id));
    if selection.quantity > available {
        return Err(CartError::ExceedsStock {
            requested: selection.quantity,
            available,
        });
    }

    cart.add(CartItem {
        line_id: Uuid::new_v4(),
        product_id: product.id.clone(),
        variant_id: variant.id.clone(),
        name: product.name.clone(),
        price: product.price,
        size: size.to_string(),
        color: color_name.clone(),
        image: product.primary_image().map(str::to_string),
        quantity: selection.quantity,
        max_stock: variant.stock,
    });

    Ok(Notice::new(
        "Added to cart",
        format!("{} ({size}, {color_name}) was added.", product.name),
    ))
}

/// Wishlisted product ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    product_ids: Vec<String>,
}

impl Wishlist {
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }

    /// Adds the product if absent, removes it otherwise.
    pub fn toggle(&mut self, product: &Product) -> Notice {
        if let Some(pos) = self.product_ids.iter().position(|id| *id == product.id) {
            self.product_ids.remove(pos);
            Notice::new("Removed from wishlist", product.name.clone())
        } else {
            self.product_ids.push(product.id.clone());
            Notice::new("Added to wishlist", product.name.clone())
        }
    }
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
