use super::*;
use crate::products::ColorOption;

fn product(id: &str, name: &str, price: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "price": price,
        "category": "shirts",
        "inStock": true
    }))
    .expect("test product should decode")
}

fn names(view: &[&Product]) -> Vec<String> {
    view.iter().map(|p| p.name.clone()).collect()
}

fn catalog() -> Vec<Product> {
    let mut shirt = product("1", "Atlanta Street Shirt", 39.99);
    shirt.description = "Urban shirt".to_string();
    shirt.collection = Some("atlanta-collection".to_string());
    shirt.sizes = vec!["S".into(), "M".into(), "L".into()];
    shirt.colors = vec![ColorOption::new("Schwarz", "#000", "black")];
    shirt.tags = vec!["streetwear".into(), "basic".into()];

    let mut dress = product("2", "Berlin Urban Dress", 129.99);
    dress.description = "Elegant dress".to_string();
    dress.category = "dresses".to_string();
    dress.collection = Some("berlin-collection".to_string());
    dress.sizes = vec!["XS".into(), "S".into()];
    dress.colors = vec![ColorOption::new("Navy", "#001f3f", "navy")];
    dress.tags = vec!["elegant".into()];
    dress.new_arrival = true;

    let mut jacket = product("3", "Premium Urban Jacket", 199.99);
    jacket.description = "Softshell jacket".to_string();
    jacket.category = "jackets".to_string();
    jacket.collection = Some("premium-collection".to_string());
    jacket.sizes = vec!["L".into(), "XL".into()];
    jacket.colors = vec![
        ColorOption::new("Schwarz", "#000", "black"),
        ColorOption::new("Khaki", "#c3b091", "khaki"),
    ];
    jacket.tags = vec!["outdoor".into()];
    jacket.in_stock = false;

    vec![shirt, dress, jacket]
}

#[test]
fn empty_filters_keep_everything_within_default_price() {
    let products = catalog();
    let view = apply(&products, &Filters::default(), "", SortKey::Name);
    assert_eq!(view.len(), 3);
}

#[test]
fn price_filter_example_from_listing_page() {
    let products = vec![product("a", "A Shirt", 20.0), product("b", "B Dress", 150.0)];
    let filters = Filters {
        price_range: PriceRange::new(0.0, 100.0),
        ..Filters::default()
    };
    let view = apply(&products, &filters, "", SortKey::Name);
    assert_eq!(names(&view), vec!["A Shirt"]);
}

#[test]
fn price_high_sort_example() {
    let products = vec![product("a", "A", 20.0), product("b", "B", 150.0)];
    let view = apply(&products, &Filters::default(), "", SortKey::PriceHigh);
    assert_eq!(names(&view), vec!["B", "A"]);
    assert_eq!(view[0].price, 150.0);
}

#[test]
fn search_matches_description_case_insensitively() {
    let mut a = product("a", "First", 10.0);
    a.description = "Urban shirt".to_string();
    let mut b = product("b", "Second", 10.0);
    b.description = "Elegant dress".to_string();
    let products = vec![a, b];

    let view = apply(&products, &Filters::default(), "shirt", SortKey::Name);
    assert_eq!(names(&view), vec!["First"]);

    let upper = apply(&products, &Filters::default(), "SHIRT", SortKey::Name);
    assert_eq!(names(&upper), vec!["First"]);
}

#[test]
fn search_matches_tags() {
    let products = catalog();
    let view = apply(&products, &Filters::default(), "OUTDOOR", SortKey::Name);
    assert_eq!(names(&view), vec!["Premium Urban Jacket"]);
}

#[test]
fn price_bounds_are_inclusive() {
    let products = vec![
        product("lo", "Low", 10.0),
        product("mid", "Mid", 15.0),
        product("hi", "High", 20.0),
        product("out", "Out", 20.01),
    ];
    let filters = Filters {
        price_range: PriceRange::new(10.0, 20.0),
        ..Filters::default()
    };
    let view = apply(&products, &filters, "", SortKey::PriceLow);
    assert_eq!(names(&view), vec!["Low", "Mid", "High"]);
}

#[test]
fn category_selection_is_or_within_dimension() {
    let products = catalog();
    let mut filters = Filters::default();
    filters.price_range = PriceRange::new(0.0, 1000.0);
    filters.toggle(Dimension::Category, "shirts");
    filters.toggle(Dimension::Category, "jackets");
    let view = apply(&products, &filters, "", SortKey::Name);
    assert_eq!(names(&view), vec!["Atlanta Street Shirt", "Premium Urban Jacket"]);
}

#[test]
fn dimensions_combine_with_and() {
    let products = catalog();
    let mut filters = Filters::default();
    filters.price_range = PriceRange::new(0.0, 1000.0);
    filters.toggle(Dimension::Color, "black");
    filters.toggle(Dimension::Size, "XL");
    let view = apply(&products, &filters, "", SortKey::Name);
    assert_eq!(names(&view), vec!["Premium Urban Jacket"]);
}

#[test]
fn membership_matches_independent_predicate_check() {
    let products = catalog();
    let mut filters = Filters::default();
    filters.price_range = PriceRange::new(30.0, 150.0);
    filters.toggle(Dimension::Size, "S");
    filters.toggle(Dimension::Tag, "elegant");
    filters.toggle(Dimension::Tag, "basic");

    let view = apply(&products, &filters, "", SortKey::Name);
    for p in &products {
        let expected = filters.price_range.contains(p.price)
            && p.sizes.iter().any(|s| s == "S")
            && p.tags.iter().any(|t| t == "elegant" || t == "basic");
        assert_eq!(
            view.iter().any(|v| v.id == p.id),
            expected,
            "membership mismatch for {}",
            p.name
        );
    }
}

#[test]
fn empty_selection_is_identity_for_every_dimension() {
    let products = catalog();
    let wide = Filters {
        price_range: PriceRange::new(0.0, 1000.0),
        ..Filters::default()
    };
    let baseline = apply(&products, &wide, "", SortKey::Name);
    for dimension in [
        Dimension::Category,
        Dimension::Collection,
        Dimension::Size,
        Dimension::Color,
        Dimension::Tag,
    ] {
        let mut filters = wide.clone();
        filters.toggle(dimension, "anything");
        filters.toggle(dimension, "anything");
        assert_eq!(apply(&products, &filters, "", SortKey::Name), baseline);
    }
}

#[test]
fn collection_filter_skips_products_without_collection() {
    let mut products = catalog();
    products[0].collection = None;
    let mut filters = Filters::default();
    filters.toggle(Dimension::Collection, "atlanta-collection");
    assert!(apply(&products, &filters, "", SortKey::Name).is_empty());
}

#[test]
fn in_stock_toggle_hides_unavailable_products() {
    let products = catalog();
    let filters = Filters {
        price_range: PriceRange::new(0.0, 1000.0),
        in_stock: true,
        ..Filters::default()
    };
    let view = apply(&products, &filters, "", SortKey::Name);
    assert_eq!(names(&view), vec!["Atlanta Street Shirt", "Berlin Urban Dress"]);
}

#[test]
fn newest_puts_new_arrivals_first_and_keeps_order_otherwise() {
    let mut a = product("a", "A", 1.0);
    let b = product("b", "B", 2.0);
    let mut c = product("c", "C", 3.0);
    let d = product("d", "D", 4.0);
    a.new_arrival = false;
    c.new_arrival = true;
    let products = vec![a, b, c, d];
    let view = apply(&products, &Filters::default(), "", SortKey::Newest);
    assert_eq!(names(&view), vec!["C", "A", "B", "D"]);
}

#[test]
fn name_sort_ignores_case() {
    let products = vec![
        product("1", "bravo", 1.0),
        product("2", "Alpha", 1.0),
        product("3", "charlie", 1.0),
    ];
    let view = apply(&products, &Filters::default(), "", SortKey::Name);
    assert_eq!(names(&view), vec!["Alpha", "bravo", "charlie"]);
}

#[test]
fn price_low_keeps_ties_in_original_order() {
    let products = vec![
        product("1", "Second", 10.0),
        product("2", "First", 5.0),
        product("3", "Third", 10.0),
    ];
    let view = apply(&products, &Filters::default(), "", SortKey::PriceLow);
    assert_eq!(names(&view), vec!["First", "Second", "Third"]);
}

#[test]
fn sort_key_parsing() {
    assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
    assert_eq!("price-high".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
    assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::Newest);
    assert_eq!(
        "rating".parse::<SortKey>(),
        Err(CoreError::UnknownSortKey("rating".to_string()))
    );
    assert_eq!(SortKey::parse_lenient("rating"), SortKey::Name);
    assert_eq!(SortKey::default(), SortKey::Name);
}

#[test]
fn toggle_adds_then_removes() {
    let mut filters = Filters::default();
    filters.toggle(Dimension::Tag, "basic");
    filters.toggle(Dimension::Tag, "elegant");
    assert_eq!(filters.tags, vec!["basic", "elegant"]);
    filters.toggle(Dimension::Tag, "basic");
    assert_eq!(filters.tags, vec!["elegant"]);
}

#[test]
fn clear_restores_defaults() {
    let mut filters = Filters::default();
    filters.toggle(Dimension::Size, "M");
    filters.in_stock = true;
    filters.price_range = PriceRange::new(50.0, 60.0);
    filters.clear();
    assert_eq!(filters, Filters::default());
    assert_eq!(filters.price_range, PriceRange::new(0.0, DEFAULT_MAX_PRICE));
}

#[test]
fn facets_are_distinct_in_first_seen_order() {
    let facets = Facets::from_products(&catalog());
    assert_eq!(
        facets.collections,
        vec!["atlanta-collection", "berlin-collection", "premium-collection"]
    );
    assert_eq!(facets.sizes, vec!["S", "M", "L", "XS", "XL"]);
    assert_eq!(facets.colors, vec!["black", "navy", "khaki"]);
    assert_eq!(facets.tags, vec!["streetwear", "basic", "elegant", "outdoor"]);
}
