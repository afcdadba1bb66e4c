//! Data access for the storefront: the REST client, the `Catalog` data
//! sources, and the fetch and search primitives the views are built on.

pub mod catalog;
pub mod client;
pub mod error;
pub mod resource;
pub mod resources;
pub mod search;
pub mod types;

pub use catalog::{Catalog, FixtureCatalog, StaticCatalog};
pub use client::ApiClient;
pub use error::ApiError;
pub use resource::{producer, Resource, ResourceState};
pub use search::{DebouncedSearch, SearchState};
pub use types::{
    Acknowledgement, ContactMessage, Health, PaymentIntent, PaymentIntentRequest, PaymentStatus,
    ProductPage, ProductQuery, SearchResults,
};
