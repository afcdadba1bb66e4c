//! Request and response envelopes of the storefront REST API.

use serde::{Deserialize, Serialize};
use storefront_core::Product;

/// Server-side filters accepted by `GET /products`. Unset fields are left
/// out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub collection: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Query-string pairs in wire order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(collection) = &self.collection {
            pairs.push(("collection", collection.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push(("inStock", in_stock.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// Evaluates the non-paging fields against a product, for data sources
    /// that filter locally.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.as_ref().is_none_or(|c| *c == product.category)
            && self
                .collection
                .as_ref()
                .is_none_or(|c| product.collection.as_ref() == Some(c))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self
                .in_stock
                .is_none_or(|wanted| product.is_available() == wanted)
    }
}

/// `GET /products` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: usize,
    pub page: u32,
}

impl ProductPage {
    /// A single page holding all of `products`.
    #[must_use]
    pub fn single(products: Vec<Product>) -> Self {
        Self {
            total: products.len(),
            products,
            page: 1,
        }
    }
}

/// `GET /products/search` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub total: usize,
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub database: String,
}

impl Health {
    /// What the storefront shows when the health endpoint is unreachable.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            status: "mock".to_string(),
            database: "disconnected".to_string(),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status == "ok" && self.database == "connected"
    }
}

/// `POST /payments/create-intent` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentConfirmation<'a> {
    pub payment_intent_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewsletterSignup<'a> {
    pub email: &'a str,
}

/// `POST /contact` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// `{ "success": bool }` returned by the newsletter and contact endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
}
