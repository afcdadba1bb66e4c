use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A catalog product as served by the REST API or the static `products.json`
/// document.
///
/// The two sources disagree on shape (the REST API sends colors as bare
/// names and omits variants), so everything beyond identity, name and price
/// is defaulted on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Pre-sale price, shown struck through next to `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Discount in percent, as delivered by the backend.
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_info: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<ProductLabel>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub new_arrival: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// A product with only identity, name and price set; every other field
    /// takes its wire default.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            original_price: None,
            discount: 0.0,
            images: Vec::new(),
            category: String::new(),
            collection: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            tags: Vec::new(),
            material: String::new(),
            care_instructions: None,
            sustainability_info: None,
            in_stock: false,
            stock_count: 0,
            label: None,
            featured: false,
            new_arrival: false,
            bestseller: false,
            variants: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns `true` when the product is flagged in stock or any variant
    /// still has stock left.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.in_stock || self.variants.iter().any(|v| v.stock > 0)
    }

    /// Looks up a color option by its code.
    #[must_use]
    pub fn color_by_code(&self, code: &str) -> Option<&ColorOption> {
        self.colors.iter().find(|c| c.code == code)
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Checks that no two variants share the same `(size, color)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateVariant`] for the first repeated pair.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert((variant.size.as_str(), variant.color.as_str())) {
                return Err(CoreError::DuplicateVariant {
                    product_id: self.id.clone(),
                    size: variant.size.clone(),
                    color: variant.color.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Badge shown on product tiles. The wire values are the storefront's
/// German labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductLabel {
    #[serde(rename = "Neu")]
    New,
    Bestseller,
    Sale,
}

impl std::fmt::Display for ProductLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductLabel::New => write!(f, "Neu"),
            ProductLabel::Bestseller => write!(f, "Bestseller"),
            ProductLabel::Sale => write!(f, "Sale"),
        }
    }
}

/// A selectable color: display `name`, CSS `value`, and the `code` that
/// variants and filters refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct ColorOption {
    pub name: String,
    pub value: String,
    pub code: String,
}

impl ColorOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            code: code.into(),
        }
    }
}

/// Colors arrive either as a bare name (REST API) or as a full
/// `{name, value, code}` object (static documents).
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        value: String,
        #[serde(default)]
        code: String,
    },
}

impl From<ColorRepr> for ColorOption {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Name(name) => Self {
                value: name.clone(),
                code: name.clone(),
                name,
            },
            ColorRepr::Full { name, value, code } => {
                let value = if value.is_empty() { name.clone() } else { value };
                let code = if code.is_empty() { name.clone() } else { code };
                Self { name, value, code }
            }
        }
    }
}

/// A purchasable `(size, color)` combination with its own stock and SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub size: String,
    /// Color code, matching [`ColorOption::code`].
    pub color: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
