//! Ready-made resources for the storefront views.

use std::sync::Arc;

use storefront_core::{fixtures, Category, Collection, Product};

use crate::catalog::Catalog;
use crate::client::ApiClient;
use crate::resource::{producer, Resource};
use crate::types::{Health, ProductPage, ProductQuery};

/// Product listing keyed by its server-side query.
pub fn products(
    catalog: Arc<dyn Catalog>,
    fallback: Option<Vec<Product>>,
) -> Resource<ProductQuery, ProductPage> {
    Resource::new(
        producer(move |query: ProductQuery| {
            let catalog = Arc::clone(&catalog);
            async move { catalog.products(&query).await }
        }),
        fallback.map(ProductPage::single),
    )
}

/// Single product keyed by id. Falls back to a placeholder carrying the
/// requested id.
pub fn product(catalog: Arc<dyn Catalog>) -> Resource<String, Product> {
    Resource::with_fallback_fn(
        producer(move |id: String| {
            let catalog = Arc::clone(&catalog);
            async move { catalog.product(&id).await }
        }),
        |id: &String| fixtures::placeholder_product(id),
    )
}

pub fn categories(
    catalog: Arc<dyn Catalog>,
    fallback: Option<Vec<Category>>,
) -> Resource<(), Vec<Category>> {
    Resource::new(
        producer(move |()| {
            let catalog = Arc::clone(&catalog);
            async move { catalog.categories().await }
        }),
        fallback,
    )
}

pub fn collections(
    catalog: Arc<dyn Catalog>,
    fallback: Option<Vec<Collection>>,
) -> Resource<(), Vec<Collection>> {
    Resource::new(
        producer(move |()| {
            let catalog = Arc::clone(&catalog);
            async move { catalog.collections().await }
        }),
        fallback,
    )
}

/// Backend health. Reports [`Health::offline`] when the API is unreachable.
pub fn health(client: ApiClient) -> Resource<(), Health> {
    Resource::new(
        producer(move |()| {
            let client = client.clone();
            async move { client.health().await }
        }),
        Some(Health::offline()),
    )
}
