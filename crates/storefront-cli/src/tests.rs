use std::path::PathBuf;

use storefront_core::SortKey;

use super::*;

#[test]
fn parses_health_command() {
    let cli = Cli::try_parse_from(["storefront", "health"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Health));
    assert_eq!(cli.source, Source::Api);
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["storefront"]).is_err());
}

#[test]
fn source_flag_is_global() {
    let cli = Cli::try_parse_from(["storefront", "categories", "--source", "fixtures"]).unwrap();
    assert_eq!(cli.source, Source::Fixtures);
    assert!(matches!(cli.command, Commands::Categories { slug: None }));

    let cli = Cli::try_parse_from(["storefront", "--source", "static", "health"]).unwrap();
    assert_eq!(cli.source, Source::Static);
}

#[test]
fn unknown_source_is_rejected() {
    assert!(Cli::try_parse_from(["storefront", "--source", "ftp", "health"]).is_err());
}

#[test]
fn products_list_defaults() {
    let cli = Cli::try_parse_from(["storefront", "products", "list"]).unwrap();
    let Commands::Products {
        command: ProductsCommands::List(args),
    } = cli.command
    else {
        panic!("expected products list");
    };
    assert_eq!(args.sort, SortKey::Name);
    assert!(args.categories.is_empty());
    assert!(!args.in_stock);
    assert!((args.max_price - 300.0).abs() < f64::EPSILON);
}

#[test]
fn products_list_repeatable_filters() {
    let cli = Cli::try_parse_from([
        "storefront",
        "products",
        "list",
        "--category",
        "shirts",
        "--category",
        "jackets",
        "--color",
        "black",
        "--in-stock",
        "--sort",
        "price-high",
        "--search",
        "urban",
    ])
    .unwrap();
    let Commands::Products {
        command: ProductsCommands::List(args),
    } = cli.command
    else {
        panic!("expected products list");
    };
    assert_eq!(args.categories, vec!["shirts", "jackets"]);
    assert_eq!(args.colors, vec!["black"]);
    assert!(args.in_stock);
    assert_eq!(args.sort, SortKey::PriceHigh);
    assert_eq!(args.search.as_deref(), Some("urban"));
}

#[test]
fn products_list_rejects_unknown_sort() {
    let result = Cli::try_parse_from(["storefront", "products", "list", "--sort", "popular"]);
    assert!(result.is_err());
}

#[test]
fn products_show_with_selection() {
    let cli = Cli::try_parse_from([
        "storefront",
        "products",
        "show",
        "2",
        "--size",
        "M",
        "--color",
        "navy",
        "--quantity",
        "2",
        "--add",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products {
            command: ProductsCommands::Show(ref args)
        } if args.id == "2"
            && args.size.as_deref() == Some("M")
            && args.color.as_deref() == Some("navy")
            && args.quantity == 2
            && args.add
            && !args.wishlist
    ));
}

#[test]
fn search_requires_query_or_interactive() {
    assert!(Cli::try_parse_from(["storefront", "search"]).is_err());

    let cli = Cli::try_parse_from(["storefront", "search", "jacket"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search { query: Some(ref q), interactive: false } if q == "jacket"
    ));

    let cli = Cli::try_parse_from(["storefront", "search", "--interactive"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            query: None,
            interactive: true
        }
    ));
}

#[test]
fn search_query_conflicts_with_interactive() {
    assert!(Cli::try_parse_from(["storefront", "search", "jacket", "--interactive"]).is_err());
}

#[test]
fn parses_collection_slug() {
    let cli =
        Cli::try_parse_from(["storefront", "collections", "berlin-collection"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Collections { slug: Some(ref s) } if s == "berlin-collection"
    ));
}

#[test]
fn parses_orders_create() {
    let cli =
        Cli::try_parse_from(["storefront", "orders", "create", "--file", "order.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Orders {
            command: OrdersCommands::Create { ref file }
        } if *file == PathBuf::from("order.json")
    ));
}

#[test]
fn parses_payment_intent() {
    let cli = Cli::try_parse_from([
        "storefront",
        "payments",
        "create-intent",
        "--amount",
        "79.98",
        "--order-id",
        "ord-1",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Payments {
            command: PaymentsCommands::CreateIntent {
                currency: None,
                order_id: Some(ref id),
                ..
            }
        } if id == "ord-1"
    ));
}

#[test]
fn contact_requires_every_field() {
    assert!(Cli::try_parse_from([
        "storefront",
        "contact",
        "--name",
        "Kim",
        "--email",
        "kim@example.com"
    ])
    .is_err());

    let cli = Cli::try_parse_from([
        "storefront",
        "contact",
        "--name",
        "Kim",
        "--email",
        "kim@example.com",
        "--subject",
        "Sizing",
        "--message",
        "Hello",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Contact { .. }));
}

#[test]
fn fallback_only_for_api_source() {
    let config = AppConfig {
        env: storefront_core::Environment::Test,
        api_url: "http://localhost:3000/api".to_string(),
        log_level: "info".to_string(),
        data_dir: PathBuf::from("./public/data"),
        request_timeout_secs: 30,
        user_agent: "storefront-test".to_string(),
        search_debounce_ms: 300,
    };

    let api = Context::new(Source::Api, &config).unwrap();
    assert_eq!(api.fallback(|| 1), Some(1));

    let fixtures = Context::new(Source::Fixtures, &config).unwrap();
    assert_eq!(fixtures.fallback(|| 1), None);
}
