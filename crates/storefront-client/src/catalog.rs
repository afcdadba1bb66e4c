//! Read-side data sources for the storefront.
//!
//! [`Catalog`] is the seam between the views and where products come from:
//! the REST API, the static JSON documents shipped with the site, or the
//! in-memory demo fixtures.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use storefront_core::listing::matches_search;
use storefront_core::{fixtures, Category, Collection, Product};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{ProductPage, ProductQuery, SearchResults};

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError>;

    async fn product(&self, id: &str) -> Result<Product, ApiError>;

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError>;

    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn collections(&self) -> Result<Vec<Collection>, ApiError>;

    async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        self.categories()
            .await?
            .into_iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| ApiError::NotFound(format!("category '{slug}'")))
    }

    async fn collection(&self, slug: &str) -> Result<Collection, ApiError> {
        self.collections()
            .await?
            .into_iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| ApiError::NotFound(format!("collection '{slug}'")))
    }
}

#[async_trait]
impl Catalog for ApiClient {
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        ApiClient::products(self, query).await
    }

    async fn product(&self, id: &str) -> Result<Product, ApiError> {
        ApiClient::product(self, id).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.search_products(query).await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        ApiClient::categories(self).await
    }

    async fn collections(&self) -> Result<Vec<Collection>, ApiError> {
        ApiClient::collections(self).await
    }

    async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        ApiClient::category(self, slug).await
    }

    async fn collection(&self, slug: &str) -> Result<Collection, ApiError> {
        ApiClient::collection(self, slug).await
    }
}

/// In-memory catalog, used for demos and as the offline data source.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    collections: Vec<Collection>,
}

impl FixtureCatalog {
    #[must_use]
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        collections: Vec<Collection>,
    ) -> Self {
        Self {
            products,
            categories,
            collections,
        }
    }

    /// The bundled demo shop.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(
            fixtures::products(),
            fixtures::categories(),
            fixtures::collections(),
        )
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        Ok(query_local(&self.products, query))
    }

    async fn product(&self, id: &str) -> Result<Product, ApiError> {
        find_product(&self.products, id)
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        Ok(search_local(&self.products, query))
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories.clone())
    }

    async fn collections(&self) -> Result<Vec<Collection>, ApiError> {
        Ok(self.collections.clone())
    }
}

/// Reads `products.json` and `categories.json` from a data directory on
/// every call. Collections are derived from the products' `collection`
/// slugs.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    data_dir: PathBuf,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_products(&self) -> Result<Vec<Product>, ApiError> {
        read_json(&self.data_dir.join("products.json")).await
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let products = self.read_products().await?;
        Ok(query_local(&products, query))
    }

    async fn product(&self, id: &str) -> Result<Product, ApiError> {
        let products = self.read_products().await?;
        find_product(&products, id)
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let products = self.read_products().await?;
        Ok(search_local(&products, query))
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        read_json(&self.data_dir.join("categories.json")).await
    }

    async fn collections(&self) -> Result<Vec<Collection>, ApiError> {
        let products = self.read_products().await?;
        Ok(derive_collections(products))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    tracing::debug!(path = %path.display(), "reading static data");
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    serde_json::from_str(&raw).map_err(|e| ApiError::Deserialize {
        context: path.display().to_string(),
        source: e,
    })
}

/// Applies the non-paging filters, then `page`/`limit`. Pages are 1-based;
/// no limit means a single page with everything.
fn query_local(products: &[Product], query: &ProductQuery) -> ProductPage {
    let matching: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    let total = matching.len();
    let page = query.page.unwrap_or(1).max(1);

    let products = match query.limit {
        Some(limit) => {
            let skip = (page as usize - 1).saturating_mul(limit as usize);
            matching
                .into_iter()
                .skip(skip)
                .take(limit as usize)
                .cloned()
                .collect()
        }
        None => matching.into_iter().cloned().collect(),
    };

    ProductPage {
        products,
        total,
        page,
    }
}

fn search_local(products: &[Product], query: &str) -> SearchResults {
    let products: Vec<Product> = products
        .iter()
        .filter(|p| matches_search(p, query.trim()))
        .cloned()
        .collect();
    SearchResults {
        total: products.len(),
        products,
    }
}

fn find_product(products: &[Product], id: &str) -> Result<Product, ApiError> {
    products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("product '{id}'")))
}

fn derive_collections(products: Vec<Product>) -> Vec<Collection> {
    let mut collections: Vec<Collection> = Vec::new();
    for product in products {
        let Some(slug) = product.collection.clone() else {
            continue;
        };
        match collections.iter_mut().find(|c| c.slug == slug) {
            Some(existing) => existing.products.push(product),
            None => collections.push(Collection {
                id: slug.clone(),
                name: title_from_slug(&slug),
                slug,
                description: String::new(),
                image: String::new(),
                products: vec![product],
            }),
        }
    }
    collections
}

/// `berlin-collection` -> `Berlin Collection`
fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
