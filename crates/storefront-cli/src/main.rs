mod checkout;
mod products;
mod search;
mod support;
mod taxonomy;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use storefront_client::{ApiClient, Catalog, FixtureCatalog, StaticCatalog};
use storefront_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::checkout::{OrdersCommands, PaymentsCommands};
use crate::products::ProductsCommands;

/// Where catalog reads are served from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Source {
    /// The REST API, with the demo catalog as offline fallback
    #[default]
    Api,
    /// `products.json` / `categories.json` in the data directory
    Static,
    /// The bundled demo catalog
    Fixtures,
}

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront command line client")]
struct Cli {
    /// Catalog data source
    #[arg(long, global = true, value_enum, default_value_t = Source::Api)]
    source: Source,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check API and database connectivity
    Health,
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Search products by name, description or tag
    Search {
        /// Search term
        #[arg(required_unless_present = "interactive")]
        query: Option<String>,
        /// Read queries from stdin, one per line, with debounced execution
        #[arg(long, conflicts_with = "query")]
        interactive: bool,
    },
    /// List categories, or show one by slug
    Categories { slug: Option<String> },
    /// List collections, or show one by slug
    Collections { slug: Option<String> },
    /// Place and look up orders
    Orders {
        #[command(subcommand)]
        command: OrdersCommands,
    },
    /// Create and confirm payment intents
    Payments {
        #[command(subcommand)]
        command: PaymentsCommands,
    },
    /// Subscribe an email address to the newsletter
    Newsletter { email: String },
    /// Send a message to the shop
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

/// Data handed to every command handler.
pub(crate) struct Context {
    pub client: ApiClient,
    pub catalog: Arc<dyn Catalog>,
    pub source: Source,
    pub search_delay: Duration,
}

impl Context {
    fn new(source: Source, config: &AppConfig) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(config)?;
        let catalog: Arc<dyn Catalog> = match source {
            Source::Api => Arc::new(client.clone()),
            Source::Static => Arc::new(StaticCatalog::new(&config.data_dir)),
            Source::Fixtures => Arc::new(FixtureCatalog::demo()),
        };
        Ok(Self {
            client,
            catalog,
            source,
            search_delay: Duration::from_millis(config.search_debounce_ms),
        })
    }

    /// Offline data substituted when the live API fails. Local sources have
    /// none.
    pub fn fallback<T>(&self, data: impl FnOnce() -> T) -> Option<T> {
        (self.source == Source::Api).then(data)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, source = ?cli.source, api_url = %config.api_url, "starting");
    let ctx = Context::new(cli.source, &config)?;

    match cli.command {
        Commands::Health => support::run_health(&ctx).await,
        Commands::Products { command } => match command {
            ProductsCommands::List(args) => products::run_products_list(&ctx, &args).await,
            ProductsCommands::Show(args) => products::run_products_show(&ctx, &args).await,
        },
        Commands::Search { query, interactive } => {
            if interactive {
                search::run_search_interactive(&ctx).await
            } else {
                search::run_search(&ctx, query.as_deref().unwrap_or_default()).await
            }
        }
        Commands::Categories { slug } => taxonomy::run_categories(&ctx, slug.as_deref()).await,
        Commands::Collections { slug } => taxonomy::run_collections(&ctx, slug.as_deref()).await,
        Commands::Orders { command } => match command {
            OrdersCommands::Create { file } => checkout::run_order_create(&ctx, &file).await,
            OrdersCommands::Get { id } => checkout::run_order_get(&ctx, &id).await,
        },
        Commands::Payments { command } => match command {
            PaymentsCommands::CreateIntent {
                amount,
                currency,
                order_id,
            } => checkout::run_payment_intent(&ctx, amount, currency, order_id).await,
            PaymentsCommands::Confirm { id } => checkout::run_payment_confirm(&ctx, &id).await,
        },
        Commands::Newsletter { email } => support::run_newsletter(&ctx, &email).await,
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let message = storefront_client::ContactMessage {
                name,
                email,
                subject,
                message,
            };
            support::run_contact(&ctx, &message).await
        }
    }
}

#[cfg(test)]
mod tests;
