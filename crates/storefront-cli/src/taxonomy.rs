//! `categories` and `collections` command handlers.

use std::sync::Arc;

use anyhow::bail;
use storefront_client::resources;
use storefront_core::{fixtures, Category, Collection};

use crate::Context;

fn print_category(category: &Category) {
    println!("{} ({})", category.name, category.slug);
    if !category.description.is_empty() {
        println!("{}", category.description);
    }
    if let Some(count) = category.product_count {
        println!("{count} products");
    }
}

/// List categories, or show the one matching `slug`.
///
/// # Errors
///
/// Returns an error if the slug lookup fails, or if the listing fails with
/// no offline data to show.
pub(crate) async fn run_categories(ctx: &Context, slug: Option<&str>) -> anyhow::Result<()> {
    if let Some(slug) = slug {
        let category = ctx.catalog.category(slug).await?;
        print_category(&category);
        return Ok(());
    }

    let resource = resources::categories(
        Arc::clone(&ctx.catalog),
        ctx.fallback(fixtures::categories),
    );
    resource.activate(());
    let state = resource.settled().await;
    let categories = match (state.data, state.error) {
        (Some(categories), error) => {
            if let Some(err) = error {
                eprintln!("warning: {err}; showing offline categories");
            }
            categories
        }
        (None, Some(err)) => bail!("{err}"),
        (None, None) => Vec::new(),
    };

    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }
    println!("{:<16}{:<16}DESCRIPTION", "SLUG", "NAME");
    for category in &categories {
        println!(
            "{:<16}{:<16}{}",
            category.slug, category.name, category.description
        );
    }
    Ok(())
}

fn print_collection(collection: &Collection) {
    println!("{} ({})", collection.name, collection.slug);
    if !collection.description.is_empty() {
        println!("{}", collection.description);
    }
    if collection.products.is_empty() {
        return;
    }
    println!();
    for product in &collection.products {
        println!(
            "  {:<6}{:<28}{:>10}",
            product.id,
            product.name,
            crate::products::fmt_price(product.price)
        );
    }
}

/// List collections, or show the one matching `slug` with its products.
///
/// # Errors
///
/// Returns an error if the slug lookup fails, or if the listing fails with
/// no offline data to show.
pub(crate) async fn run_collections(ctx: &Context, slug: Option<&str>) -> anyhow::Result<()> {
    if let Some(slug) = slug {
        let collection = ctx.catalog.collection(slug).await?;
        print_collection(&collection);
        return Ok(());
    }

    let resource = resources::collections(
        Arc::clone(&ctx.catalog),
        ctx.fallback(fixtures::collections),
    );
    resource.activate(());
    let state = resource.settled().await;
    if let Some(err) = &state.error {
        if state.data.is_none() {
            bail!("{err}");
        }
        eprintln!("warning: {err}; showing offline collections");
    }

    let collections = state.data.unwrap_or_default();
    if collections.is_empty() {
        println!("no collections found");
        return Ok(());
    }
    println!("{:<22}{:<22}PRODUCTS", "SLUG", "NAME");
    for collection in &collections {
        println!(
            "{:<22}{:<22}{}",
            collection.slug,
            collection.name,
            collection.products.len()
        );
    }
    Ok(())
}
