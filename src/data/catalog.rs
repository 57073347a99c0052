//! Product catalog API client
//!
//! Fetches the full product list from the catalog endpoint with a single GET
//! and extracts the category labels that drive the category filter.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use thiserror::Error;

use super::Product;

/// Default catalog endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Errors that can occur when fetching the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Catalog API responded with status {0}")]
    Status(StatusCode),

    /// Response body is not a well-formed product list
    #[error("Failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product carries a price below zero
    #[error("Product {id} has a negative price: {price}")]
    NegativePrice { id: u64, price: Decimal },
}

/// Client for fetching the product catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Create a client for the default endpoint
    pub fn new() -> Self {
        Self::with_client(Client::new(), DEFAULT_CATALOG_URL)
    }

    /// Create a client with a custom HTTP client and endpoint
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Create a client for `url`, optionally bounding each request by `timeout`.
    ///
    /// Without a timeout a hung request simply never completes.
    pub fn from_config(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, url))
    }

    /// The endpoint this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full product list
    ///
    /// # Returns
    /// * `Ok(Vec<Product>)` - Products in the order the API returned them
    /// * `Err(CatalogError::Status)` - If the API answered with a non-success status
    /// * `Err(CatalogError::Parse)` - If the body is not a JSON array of products
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let text = response.text().await?;
        parse_catalog(&text)
    }
}

/// Parses a catalog response body into products
///
/// The whole catalog is rejected if any product has a negative price.
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(body)?;
    if let Some(product) = products.iter().find(|p| p.price < Decimal::ZERO) {
        return Err(CatalogError::NegativePrice {
            id: product.id,
            price: product.price,
        });
    }
    Ok(products)
}

/// Distinct category labels in order of first appearance
pub fn categories_of(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.iter().any(|c| c == &product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const CATALOG_BODY: &str = r#"[
        {"id": 1, "title": "Backpack", "price": 109.95, "image": "https://example.com/1.jpg", "category": "men's clothing"},
        {"id": 2, "title": "Gold Ring", "price": 168, "image": "https://example.com/2.jpg", "category": "jewelery"},
        {"id": 3, "title": "Cotton Jacket", "price": 55.99, "image": "https://example.com/3.jpg", "category": "men's clothing"}
    ]"#;

    /// Serves a single canned HTTP response on a local port and returns its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener should have an address");

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("Failed to accept");
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/products", addr)
    }

    fn test_client(url: String) -> CatalogClient {
        let http = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build HTTP client");
        CatalogClient::with_client(http, url)
    }

    fn product(id: u64, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: Decimal::from(id),
            image: String::new(),
            category: category.to_string(),
            description: None,
            rating: None,
        }
    }

    #[test]
    fn test_default_client_targets_fakestore() {
        let client = CatalogClient::default();
        assert_eq!(client.url(), DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_parse_catalog_valid_body() {
        let products = parse_catalog(CATALOG_BODY).expect("Body should parse");

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].title, "Backpack");
        assert_eq!(products[1].price, Decimal::from(168));
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_body() {
        let result = parse_catalog("{\"not\": \"a list\"");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_parse_catalog_rejects_missing_fields() {
        let result = parse_catalog(r#"[{"id": 1, "title": "No price"}]"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_parse_catalog_rejects_negative_price() {
        let body = r#"[
            {"id": 1, "title": "Backpack", "price": 109.95, "image": "i", "category": "bags"},
            {"id": 7, "title": "Refund", "price": -5, "image": "i", "category": "bags"}
        ]"#;

        match parse_catalog(body) {
            Err(CatalogError::NegativePrice { id, price }) => {
                assert_eq!(id, 7);
                assert_eq!(price, Decimal::from(-5));
            }
            other => panic!("Expected negative price error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_catalog_accepts_free_product() {
        let body = r#"[{"id": 1, "title": "Sticker", "price": 0, "image": "i", "category": "misc"}]"#;
        let products = parse_catalog(body).expect("Zero price should be accepted");
        assert_eq!(products[0].price, Decimal::ZERO);
    }

    #[test]
    fn test_categories_of_keeps_first_seen_order() {
        let products = vec![
            product(1, "electronics"),
            product(2, "jewelery"),
            product(3, "electronics"),
            product(4, "women's clothing"),
        ];

        assert_eq!(
            categories_of(&products),
            vec!["electronics", "jewelery", "women's clothing"]
        );
    }

    #[test]
    fn test_categories_of_empty_catalog() {
        assert!(categories_of(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_products_success() {
        let url = serve_once("200 OK", CATALOG_BODY).await;
        let client = test_client(url);

        let products = client.fetch_products().await.expect("Fetch should succeed");

        assert_eq!(products.len(), 3);
        assert_eq!(categories_of(&products), vec!["men's clothing", "jewelery"]);
    }

    #[tokio::test]
    async fn test_fetch_products_non_success_status() {
        let url = serve_once("503 Service Unavailable", "[]").await;
        let client = test_client(url);

        let result = client.fetch_products().await;

        match result {
            Err(CatalogError::Status(status)) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_products_malformed_body() {
        let url = serve_once("200 OK", "<html>oops</html>").await;
        let client = test_client(url);

        let result = client.fetch_products().await;

        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_from_config_with_timeout() {
        let client = CatalogClient::from_config("http://localhost/products", Some(Duration::from_secs(5)))
            .expect("Client should build");
        assert_eq!(client.url(), "http://localhost/products");
    }
}
