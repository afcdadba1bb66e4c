//! `products list` and `products show`.
//!
//! `list` mirrors the listing page: the full catalog is loaded once and the
//! filter/search/sort pipeline runs locally. `show` mirrors the detail page,
//! including variant selection and add-to-cart.

use std::sync::Arc;

use anyhow::bail;
use clap::{Args, Subcommand};
use storefront_client::{resources, ProductQuery};
use storefront_core::listing::{self, DEFAULT_MAX_PRICE};
use storefront_core::{
    add_to_cart, detail, fixtures, Cart, Category, Facets, Filters, PriceRange, Product,
    Selection, SortKey, Wishlist,
};

use crate::Context;

#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// List products, filtered and sorted like the shop listing
    List(ListArgs),
    /// Show one product, optionally adding a variant to the cart
    Show(ShowArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Category slug (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Collection slug (repeatable)
    #[arg(long = "collection")]
    pub collections: Vec<String>,
    /// Size (repeatable)
    #[arg(long = "size")]
    pub sizes: Vec<String>,
    /// Color code (repeatable)
    #[arg(long = "color")]
    pub colors: Vec<String>,
    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long, default_value_t = 0.0)]
    pub min_price: f64,
    #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
    pub max_price: f64,
    /// Only products that can be bought
    #[arg(long)]
    pub in_stock: bool,
    /// Free-text search on name, description and tags
    #[arg(long)]
    pub search: Option<String>,
    /// name, price-low, price-high or newest
    #[arg(long, default_value = "name")]
    pub sort: SortKey,
    /// Also print the values available for each filter
    #[arg(long)]
    pub facets: bool,
}

impl ListArgs {
    pub(crate) fn filters(&self) -> Filters {
        Filters {
            categories: self.categories.clone(),
            collections: self.collections.clone(),
            price_range: PriceRange::new(self.min_price, self.max_price),
            sizes: self.sizes.clone(),
            colors: self.colors.clone(),
            tags: self.tags.clone(),
            in_stock: self.in_stock,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    pub id: String,
    /// Size to select (defaults to the first listed size)
    #[arg(long)]
    pub size: Option<String>,
    /// Color code to select (defaults to the first listed color)
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
    /// Add the selection to a cart and print the cart
    #[arg(long)]
    pub add: bool,
    /// Toggle the product on the wishlist
    #[arg(long)]
    pub wishlist: bool,
}

impl ShowArgs {
    pub(crate) fn selection(&self, product: &Product) -> Selection {
        let defaults = Selection::default_for(product);
        Selection {
            size: self.size.clone().or(defaults.size),
            color: self.color.clone().or(defaults.color),
            quantity: self.quantity,
        }
    }
}

pub(crate) fn fmt_price(price: f64) -> String {
    format!("\u{20ac}{price:.2}")
}

/// List products through the local listing pipeline.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded and no offline data is
/// available.
pub(crate) async fn run_products_list(ctx: &Context, args: &ListArgs) -> anyhow::Result<()> {
    let resource = resources::products(Arc::clone(&ctx.catalog), ctx.fallback(fixtures::products));
    resource.activate(ProductQuery::default());

    let (state, categories) = futures::join!(resource.settled(), ctx.catalog.categories());

    if let Some(err) = &state.error {
        if state.data.is_none() {
            bail!("{err}");
        }
        eprintln!("warning: {err}; showing the offline catalog");
    }
    let Some(page) = state.data else {
        bail!("no products loaded");
    };

    let search = args.search.as_deref().unwrap_or_default().trim();
    let view = listing::apply(&page.products, &args.filters(), search, args.sort);

    if view.is_empty() {
        println!("no products match the current filters");
    } else {
        println!("{:<6}{:<28}{:>10}  {:<12}STOCK", "ID", "NAME", "PRICE", "CATEGORY");
        for product in &view {
            println!(
                "{:<6}{:<28}{:>10}  {:<12}{}",
                product.id,
                product.name,
                fmt_price(product.price),
                product.category,
                if product.is_available() { "yes" } else { "no" }
            );
        }
    }
    println!("{} of {} products", view.len(), page.products.len());

    if args.facets {
        let categories = categories.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "categories unavailable");
            Vec::new()
        });
        print_facets(&categories, &Facets::from_products(&page.products));
    }
    Ok(())
}

fn print_facets(categories: &[Category], facets: &Facets) {
    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    println!();
    println!("categories:  {}", slugs.join(", "));
    println!("collections: {}", facets.collections.join(", "));
    println!("sizes:       {}", facets.sizes.join(", "));
    println!("colors:      {}", facets.colors.join(", "));
    println!("tags:        {}", facets.tags.join(", "));
}

/// Show one product and apply the detail-page actions.
///
/// # Errors
///
/// Returns an error when `--add` is rejected; the message is the notice the
/// shop would display.
pub(crate) async fn run_products_show(ctx: &Context, args: &ShowArgs) -> anyhow::Result<()> {
    let resource = resources::product(Arc::clone(&ctx.catalog));
    resource.activate(args.id.clone());
    let state = resource.settled().await;

    if let Some(err) = &state.error {
        eprintln!("warning: {err}; showing a placeholder");
    }
    let Some(product) = state.data else {
        bail!("product '{}' could not be loaded", args.id);
    };
    if let Err(e) = product.validate() {
        tracing::warn!(product_id = %product.id, error = %e, "inconsistent product data");
    }

    print_product(&product);

    let selection = args.selection(&product);
    println!();
    println!(
        "selected: {} / {} x{} ({} in stock)",
        selection.size.as_deref().unwrap_or("-"),
        selection.color.as_deref().unwrap_or("-"),
        selection.quantity,
        detail::max_stock(&product, &selection)
    );

    if args.wishlist {
        let mut wishlist = Wishlist::default();
        println!("{}", wishlist.toggle(&product));
    }

    if args.add {
        let mut cart = Cart::new();
        match add_to_cart(&mut cart, &product, &selection) {
            Ok(notice) => {
                println!("{notice}");
                for item in cart.items() {
                    println!(
                        "  {} x{} {} / {}  {}",
                        item.name,
                        item.quantity,
                        item.size,
                        item.color,
                        fmt_price(item.line_total())
                    );
                }
                println!("subtotal: {}", fmt_price(cart.subtotal()));
            }
            Err(e) => bail!("{}", e.notice()),
        }
    }
    Ok(())
}

fn print_product(product: &Product) {
    let label = product
        .label
        .map(|l| format!(" [{l}]"))
        .unwrap_or_default();
    println!("{} ({}){label}", product.name, product.id);

    match product.original_price {
        Some(original) if original > product.price => println!(
            "price: {} (was {}, -{:.0}%)",
            fmt_price(product.price),
            fmt_price(original),
            product.discount
        ),
        _ => println!("price: {}", fmt_price(product.price)),
    }
    if !product.description.is_empty() {
        println!("{}", product.description);
    }
    if !product.material.is_empty() {
        println!("material: {}", product.material);
    }
    if let Some(care) = &product.care_instructions {
        println!("care: {care}");
    }
    println!("sizes: {}", product.sizes.join(", "));
    let colors: Vec<String> = product
        .colors
        .iter()
        .map(|c| format!("{} ({})", c.name, c.code))
        .collect();
    println!("colors: {}", colors.join(", "));

    if !product.variants.is_empty() {
        println!();
        println!("{:<6}{:<12}{:<20}STOCK", "SIZE", "COLOR", "SKU");
        for v in &product.variants {
            println!("{:<6}{:<12}{:<20}{}", v.size, v.color, v.sku, v.stock);
        }
    }
}
