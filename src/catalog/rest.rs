use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::CatalogSource;
use crate::config::ClientConfig;
use crate::core::{CheapestOption, Market, MarketMap, Product, ProductPrices, Route, SearchResponse};
use crate::error::{PazarError, Result};
use crate::session::Session;

/// Market REST API as a catalog source
pub struct RestCatalog {
    client: Client,
    base_url: String,
    market_id: String,
    session: Option<Arc<Session>>,
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn search_path(query: &str, market_id: &str) -> String {
    format!(
        "/products/search?query={}&marketId={}",
        segment(query.trim()),
        segment(market_id)
    )
}

fn product_path(product_id: &str, view: &str, market_id: &str) -> String {
    format!("/products/{}/{}?marketId={}", segment(product_id), view, segment(market_id))
}

fn route_path(market_id: &str, stall_number: &str) -> String {
    format!("/markets/{}/route/{}", segment(market_id), segment(stall_number))
}

impl RestCatalog {
    /// Create new REST catalog
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            market_id: config.market_id.clone(),
            session: None,
        })
    }

    /// Send the session's bearer token with every request
    pub fn with_session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        match self.session.as_ref().and_then(|s| s.bearer_header()) {
            Some(header) => request.header(reqwest::header::AUTHORIZATION, header),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .get(path)
            .send()
            .await
            .map_err(|e| self.error(format!("Request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(self.error(format!("HTTP {} from {}", response.status(), path)));
        }

        response
            .json()
            .await
            .map_err(|e| self.error(format!("Invalid JSON from {}: {}", path, e)))
    }

    fn error(&self, message: String) -> PazarError {
        PazarError::Catalog {
            source_name: self.name().to_string(),
            message,
        }
    }

    /// All markets
    pub async fn markets(&self) -> Result<Vec<Market>> {
        self.fetch("/markets").await
    }

    /// One market by id
    pub async fn market(&self, market_id: &str) -> Result<Market> {
        self.fetch(&format!("/markets/{}", segment(market_id))).await
    }

    /// Server-side search in one market; results carry that market's
    /// cheapest stall, location and price list
    pub async fn search(&self, query: &str, market_id: &str) -> Result<SearchResponse> {
        self.fetch(&search_path(query, market_id)).await
    }

    /// Every stall price for a product in a market, cheapest first
    pub async fn prices(&self, product_id: &str, market_id: &str) -> Result<ProductPrices> {
        self.fetch(&product_path(product_id, "prices", market_id)).await
    }

    /// Cheapest stall for a product with a route to it (needs a session)
    pub async fn cheapest(&self, product_id: &str, market_id: &str) -> Result<CheapestOption> {
        self.fetch(&product_path(product_id, "cheapest", market_id)).await
    }

    /// 2D floor plan and 3D settings of a market
    pub async fn market_map(&self, market_id: &str) -> Result<MarketMap> {
        self.fetch(&format!("/markets/{}/map", segment(market_id))).await
    }

    pub async fn route(&self, market_id: &str, stall_number: &str) -> Result<Route> {
        self.fetch(&route_path(market_id, stall_number)).await
    }

    /// Full product list, no market data
    pub async fn all_products(&self) -> Result<Vec<Product>> {
        self.fetch("/products").await
    }
}

#[async_trait]
impl CatalogSource for RestCatalog {
    /// Server search in the configured market. When the server finds
    /// nothing, the full list is returned so the fuzzy pass can run locally.
    async fn products(&self, query: &str) -> Result<Vec<Product>> {
        if !query.trim().is_empty() {
            let response = self.search(query, &self.market_id).await?;
            if !response.results.is_empty() {
                tracing::debug!(
                    "Server search in {} found {} products",
                    self.market_id,
                    response.results.len()
                );
                return Ok(response.results);
            }
        }

        let products = self.all_products().await?;
        tracing::debug!("Fetched {} products from {}", products.len(), self.base_url);
        Ok(products)
    }

    fn name(&self) -> &str {
        "rest"
    }

    async fn is_available(&self) -> bool {
        match self.get("/health").timeout(Duration::from_secs(2)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    #[test]
    fn test_base_url_normalized() {
        let config = ClientConfig {
            api_base_url: "http://localhost:8080/api/".to_string(),
            ..ClientConfig::default()
        };
        let catalog = RestCatalog::new(&config).unwrap();
        assert_eq!(catalog.base_url, "http://localhost:8080/api");
        assert_eq!(catalog.market_id, "market_1");
    }

    #[test]
    fn test_search_path() {
        assert_eq!(
            search_path("  domates ", "market_1"),
            "/products/search?query=domates&marketId=market_1"
        );
        assert_eq!(
            search_path("salkım domates", "market 2"),
            "/products/search?query=salk%C4%B1m%20domates&marketId=market%202"
        );
    }

    #[test]
    fn test_product_and_route_paths() {
        assert_eq!(product_path("p1", "prices", "market_1"), "/products/p1/prices?marketId=market_1");
        assert_eq!(product_path("p/1", "cheapest", "m&1"), "/products/p%2F1/cheapest?marketId=m%261");
        assert_eq!(route_path("market_1", "A-12"), "/markets/market_1/route/A-12");
    }

    #[tokio::test]
    async fn test_unreachable_api() {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_millis(200),
            ..ClientConfig::default()
        };
        let session = Arc::new(Session::initialize(Arc::new(MemoryStore::new())).unwrap());
        let catalog = RestCatalog::new(&config).unwrap().with_session(session);

        assert!(!catalog.is_available().await);
        assert!(matches!(
            catalog.products("domates").await,
            Err(PazarError::Catalog { .. })
        ));
        assert!(matches!(
            catalog.prices("p1", "market_1").await,
            Err(PazarError::Catalog { .. })
        ));
        assert!(catalog.market_map("market_1").await.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires the market API running locally
    async fn test_fetch_products() {
        let catalog = RestCatalog::new(&ClientConfig::default()).unwrap();
        let products = catalog.products("").await.unwrap();
        assert!(products.iter().all(|p| !p.name.is_empty()));

        let response = catalog.search("domates", "market_1").await.unwrap();
        assert_eq!(response.count, response.results.len());
    }
}
