//! Order and payment command handlers. These always talk to the REST API,
//! whatever `--source` says.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::Subcommand;
use storefront_client::PaymentIntentRequest;
use storefront_core::{NewOrder, Order};

use crate::products::fmt_price;
use crate::Context;

#[derive(Debug, Subcommand)]
pub enum OrdersCommands {
    /// Place an order from a JSON file (`items`, `customerInfo`, `paymentMethod`)
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Look up an order by id
    Get { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommands {
    /// Create a payment intent for an amount
    CreateIntent {
        #[arg(long)]
        amount: f64,
        /// ISO currency code; the backend default applies when omitted
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        order_id: Option<String>,
    },
    /// Confirm a payment intent
    Confirm { id: String },
}

/// Reads and checks an order document.
pub(crate) async fn load_order(path: &Path) -> anyhow::Result<NewOrder> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read order file {}", path.display()))?;
    let order: NewOrder = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse order file {}", path.display()))?;

    if order.items.is_empty() {
        bail!("order has no items");
    }
    if let Some(item) = order.items.iter().find(|i| i.quantity == 0) {
        bail!("item {} has quantity 0", item.product_id);
    }
    Ok(order)
}

fn print_order(order: &Order) {
    println!("order {}: {}", order.id, order.status);
    println!("customer: {} <{}>", order.customer_info.name, order.customer_info.email);
    if let Some(created_at) = order.created_at {
        println!("placed: {}", created_at.format("%Y-%m-%d %H:%M"));
    }
    for item in &order.items {
        println!(
            "  {} x{} {} / {}",
            item.product_id, item.quantity, item.size, item.color
        );
    }
    println!("total: {}", fmt_price(order.total));
}

/// Place an order.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid, or the API rejects
/// the order.
pub(crate) async fn run_order_create(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let order = load_order(file).await?;
    tracing::info!(items = order.items.len(), "placing order");
    let created = ctx.client.create_order(&order).await?;
    print_order(&created);
    Ok(())
}

/// Look up an order.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub(crate) async fn run_order_get(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let order = ctx.client.order(id).await?;
    print_order(&order);
    Ok(())
}

/// Create a payment intent.
///
/// # Errors
///
/// Returns an error for a non-positive amount or a failed API request.
pub(crate) async fn run_payment_intent(
    ctx: &Context,
    amount: f64,
    currency: Option<String>,
    order_id: Option<String>,
) -> anyhow::Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        bail!("amount must be a positive number, got {amount}");
    }
    let intent = ctx
        .client
        .create_payment_intent(&PaymentIntentRequest {
            amount,
            currency,
            order_id,
        })
        .await?;
    println!("payment intent: {}", intent.payment_intent_id);
    println!("client secret:  {}", intent.client_secret);
    Ok(())
}

/// Confirm a payment intent.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub(crate) async fn run_payment_confirm(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let status = ctx.client.confirm_payment(id).await?;
    println!("payment {id}: {}", status.status);
    Ok(())
}
