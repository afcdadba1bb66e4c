pub mod app_config;
pub mod cart;
pub mod config;
pub mod detail;
pub mod error;
pub mod fixtures;
pub mod listing;
pub mod orders;
pub mod products;
pub mod taxonomy;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartItem};
pub use config::{load_app_config, load_app_config_from_env};
pub use detail::{add_to_cart, resolve_variant, CartError, Notice, Selection, Wishlist};
pub use error::{ConfigError, CoreError};
pub use listing::{Dimension, Facets, Filters, PriceRange, SortKey};
pub use orders::{CustomerInfo, NewOrder, Order, OrderItem, OrderStatus};
pub use products::{ColorOption, Product, ProductLabel, Variant};
pub use taxonomy::{Category, Collection};
