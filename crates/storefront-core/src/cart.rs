use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line in the shopping cart.
///
/// Carries its own copy of the display fields so a cart can be rendered
/// without the product documents at hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default = "Uuid::new_v4")]
    pub line_id: Uuid,
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub price: f64,
    pub size: String,
    /// Color display name, not the code.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    /// Stock of the variant when the line was added; `quantity` never exceeds it.
    pub max_stock: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// In-memory cart. Lines for the same variant are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units of `variant_id` already in the cart.
    #[must_use]
    pub fn quantity_of(&self, variant_id: &str) -> u32 {
        self.items
            .iter()
            .filter(|i| i.variant_id == variant_id)
            .map(|i| i.quantity)
            .sum()
    }

    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Appends `item`, or adds its quantity to an existing line for the same
    /// variant. Stock bounds are checked by the caller.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.variant_id == item.variant_id)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            existing.max_stock = item.max_stock;
        } else {
            self.items.push(item);
        }
    }

    pub fn remove(&mut self, line_id: Uuid) -> Option<CartItem> {
        let pos = self.items.iter().position(|i| i.line_id == line_id)?;
        Some(self.items.remove(pos))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(variant_id: &str, quantity: u32, price: f64) -> CartItem {
        CartItem {
            line_id: Uuid::new_v4(),
            product_id: "1".to_string(),
            variant_id: variant_id.to_string(),
            name: "Atlanta Street Shirt".to_string(),
            price,
            size: "M".to_string(),
            color: "Schwarz".to_string(),
            image: None,
            quantity,
            max_stock: 10,
        }
    }

    #[test]
    fn add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(item("v1", 1, 39.99));
        cart.add(item("v1", 2, 39.99));
        cart.add(item("v2", 1, 39.99));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.quantity_of("v1"), 3);
        assert_eq!(cart.quantity_of("v2"), 1);
        assert_eq!(cart.quantity_of("missing"), 0);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add(item("v1", 2, 10.0));
        cart.add(item("v2", 1, 5.5));
        assert!((cart.subtotal() - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_by_line_id() {
        let mut cart = Cart::new();
        let line = item("v1", 1, 10.0);
        let id = line.line_id;
        cart.add(line);
        assert!(cart.remove(Uuid::new_v4()).is_none());
        let removed = cart.remove(id).expect("line should be removed");
        assert_eq!(removed.variant_id, "v1");
        assert!(cart.is_empty());
    }
}
