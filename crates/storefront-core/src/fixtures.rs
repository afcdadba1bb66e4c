//! Bundled demo catalog.
//!
//! Served by the fixture data source and passed explicitly as fallback data
//! when the live backend is unreachable. Nothing in the fetch path reaches
//! for these on its own.

use crate::products::{ColorOption, Product, ProductLabel, Variant};
use crate::taxonomy::{Category, Collection};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn variants(prefix: &str, sizes: &[&str], colors: &[ColorOption], stock: u32) -> Vec<Variant> {
    sizes
        .iter()
        .flat_map(|size| {
            colors.iter().map(move |color| Variant {
                id: format!("{prefix}-{size}-{}", color.code).to_lowercase(),
                size: (*size).to_string(),
                color: color.code.clone(),
                sku: format!("{prefix}-{size}-{}", color.code).to_uppercase(),
                stock,
                price: None,
            })
        })
        .collect()
}

fn black() -> ColorOption {
    ColorOption::new("Schwarz", "#000000", "black")
}

fn navy() -> ColorOption {
    ColorOption::new("Navy", "#1f2a44", "navy")
}

/// The demo listing: a shirt, a dress and a jacket.
#[must_use]
pub fn products() -> Vec<Product> {
    let shirt_colors = vec![
        black(),
        ColorOption::new("Weiß", "#ffffff", "white"),
        ColorOption::new("Grau", "#808080", "grey"),
    ];
    let dress_colors = vec![
        black(),
        navy(),
        ColorOption::new("Bordeaux", "#5f021f", "bordeaux"),
    ];
    let jacket_colors = vec![
        black(),
        ColorOption::new("Khaki", "#c3b091", "khaki"),
        navy(),
    ];

    vec![
        Product {
            description: "Urban shirt with Atlanta street style, made for easy everyday wear."
                .to_string(),
            original_price: Some(49.99),
            discount: 20.0,
            images: strings(&["/images/products/shirt-1.jpg"]),
            category: "shirts".to_string(),
            collection: Some("atlanta-collection".to_string()),
            sizes: strings(&["S", "M", "L", "XL"]),
            variants: variants("ass", &["S", "M", "L", "XL"], &shirt_colors, 5),
            colors: shirt_colors,
            tags: strings(&["streetwear", "organic", "basics"]),
            material: "100% organic cotton".to_string(),
            in_stock: true,
            stock_count: 15,
            label: Some(ProductLabel::New),
            new_arrival: true,
            ..Product::new("1", "Atlanta Street Shirt", 39.99)
        },
        Product {
            description: "Elegant dress with an urban Berlin flair, for special occasions."
                .to_string(),
            original_price: Some(159.99),
            discount: 19.0,
            images: strings(&["/images/products/dress-1.jpg"]),
            category: "dresses".to_string(),
            collection: Some("berlin-collection".to_string()),
            sizes: strings(&["XS", "S", "M", "L"]),
            variants: variants("bud", &["XS", "S", "M", "L"], &dress_colors, 2),
            colors: dress_colors,
            tags: strings(&["elegant", "evening"]),
            material: "Premium polyester blend".to_string(),
            in_stock: true,
            stock_count: 8,
            label: Some(ProductLabel::New),
            featured: true,
            new_arrival: true,
            ..Product::new("2", "Berlin Urban Dress", 129.99)
        },
        Product {
            description: "High-quality jacket for the urban lifestyle. Berlin meets Atlanta."
                .to_string(),
            images: strings(&["/images/products/jacket-1.jpg"]),
            category: "jackets".to_string(),
            collection: Some("premium-collection".to_string()),
            sizes: strings(&["S", "M", "L", "XL", "XXL"]),
            variants: variants("puj", &["S", "M", "L", "XL", "XXL"], &jacket_colors, 3),
            colors: jacket_colors,
            tags: strings(&["outdoor", "waterproof"]),
            material: "Waterproof softshell".to_string(),
            in_stock: true,
            stock_count: 12,
            label: Some(ProductLabel::Bestseller),
            bestseller: true,
            ..Product::new("3", "Premium Urban Jacket", 199.99)
        },
    ]
}

/// Stand-in for a single product that could not be fetched.
#[must_use]
pub fn placeholder_product(id: &str) -> Product {
    let colors = vec![black(), ColorOption::new("Weiß", "#ffffff", "white")];
    Product {
        description: "Placeholder product used while the catalog is unavailable.".to_string(),
        images: strings(&["/images/products/placeholder.jpg"]),
        category: "general".to_string(),
        sizes: strings(&["S", "M", "L"]),
        variants: variants("tmp", &["S", "M", "L"], &colors, 10),
        colors,
        material: "Cotton".to_string(),
        in_stock: true,
        stock_count: 10,
        ..Product::new(id, "Placeholder product", 99.99)
    }
}

/// Static result set searched when the search endpoint fails.
#[must_use]
pub fn search_results() -> Vec<Product> {
    vec![Product {
        description: "Offline search result".to_string(),
        images: strings(&["/images/products/shirt-1.jpg"]),
        category: "shirts".to_string(),
        sizes: strings(&["S", "M", "L"]),
        colors: vec![black()],
        material: "Cotton".to_string(),
        in_stock: true,
        stock_count: 10,
        ..Product::new("1", "Atlanta Street Shirt", 39.99)
    }]
}

#[must_use]
pub fn categories() -> Vec<Category> {
    let category = |id: &str, name: &str, slug: &str, description: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        image: format!("/images/categories/{slug}.jpg"),
        product_count: None,
    };
    vec![
        category("1", "Shirts", "shirts", "Urban shirts for every occasion"),
        category("2", "Dresses", "dresses", "Elegant dresses with urban flair"),
        category("3", "Jackets", "jackets", "Premium jackets for urban style"),
    ]
}

#[must_use]
pub fn collections() -> Vec<Collection> {
    let collection = |id: &str, name: &str, slug: &str, description: &str, image: &str| Collection {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        image: format!("/images/collections/{image}.jpg"),
        products: Vec::new(),
    };
    vec![
        collection(
            "1",
            "Berlin Collection",
            "berlin-collection",
            "Urban style from the capital",
            "berlin",
        ),
        collection(
            "2",
            "Atlanta Collection",
            "atlanta-collection",
            "Street style from the American South",
            "atlanta",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_products_have_unique_variant_pairs() {
        for product in products() {
            assert!(product.validate().is_ok(), "{} has duplicates", product.id);
            assert_eq!(
                product.variants.len(),
                product.sizes.len() * product.colors.len()
            );
        }
    }

    #[test]
    fn placeholder_keeps_requested_id() {
        let p = placeholder_product("42");
        assert_eq!(p.id, "42");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn category_slugs_match_demo_products() {
        let slugs: Vec<String> = categories().into_iter().map(|c| c.slug).collect();
        for product in products() {
            assert!(slugs.contains(&product.category));
        }
    }
}
