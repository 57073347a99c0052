//! Core data models for the storefront
//!
//! This module contains the product records served by the catalog API and the
//! client used to fetch them.

pub mod catalog;

pub use catalog::{categories_of, parse_catalog, CatalogClient, CatalogError, DEFAULT_CATALOG_URL};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog API
///
/// Products are read-only to the storefront: they are fetched once per load,
/// held in memory and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier assigned by the API
    pub id: u64,
    /// Display title
    pub title: String,
    /// Unit price in the store currency
    pub price: Decimal,
    /// URL of the product picture
    pub image: String,
    /// Category label used for filtering
    pub category: String,
    /// Long description, when the API provides one
    #[serde(default)]
    pub description: Option<String>,
    /// Customer rating, when the API provides one
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Aggregated customer rating for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score (0-5)
    pub rate: f64,
    /// Number of ratings
    pub count: u32,
}

/// Formats a price the way product cards show it: `$` followed by the stored value.
pub fn format_price(price: Decimal) -> String {
    format!("${}", price)
}

/// Formats a money amount with exactly two decimal places (e.g. `$0.00`).
pub fn format_total(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("${}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_product_deserializes_numeric_price() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "image": "https://example.com/1.jpg",
            "category": "men's clothing"
        }"#;

        let product: Product = serde_json::from_str(json).expect("Failed to deserialize Product");

        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Fjallraven Backpack");
        assert_eq!(product.price, Decimal::from_str("109.95").unwrap());
        assert_eq!(product.category, "men's clothing");
        assert!(product.description.is_none());
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_product_deserializes_optional_fields() {
        let json = r#"{
            "id": 2,
            "title": "Slim Fit T-Shirt",
            "price": 22,
            "image": "https://example.com/2.jpg",
            "category": "men's clothing",
            "description": "Slim-fitting style",
            "rating": { "rate": 4.1, "count": 259 }
        }"#;

        let product: Product = serde_json::from_str(json).expect("Failed to deserialize Product");

        assert_eq!(product.price, Decimal::from(22));
        assert_eq!(product.description.as_deref(), Some("Slim-fitting style"));
        let rating = product.rating.expect("rating should be present");
        assert!((rating.rate - 4.1).abs() < 0.001);
        assert_eq!(rating.count, 259);
    }

    #[test]
    fn test_format_price_keeps_stored_precision() {
        assert_eq!(format_price(Decimal::from_str("109.95").unwrap()), "$109.95");
        assert_eq!(format_price(Decimal::from_str("22.3").unwrap()), "$22.3");
        assert_eq!(format_price(Decimal::from(10)), "$10");
    }

    #[test]
    fn test_format_total_uses_two_decimals() {
        assert_eq!(format_total(Decimal::ZERO), "$0.00");
        assert_eq!(format_total(Decimal::from(30)), "$30.00");
        assert_eq!(format_total(Decimal::from_str("22.3").unwrap()), "$22.30");
        assert_eq!(format_total(Decimal::from_str("10.005").unwrap()), "$10.00");
    }
}
