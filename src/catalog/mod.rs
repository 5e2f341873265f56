pub mod rest;
pub mod static_catalog;

use async_trait::async_trait;
use crate::core::Product;
use crate::error::Result;

pub use rest::RestCatalog;
pub use static_catalog::StaticCatalog;

/// Trait for product catalog collaborators (market API, local files)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Catalog snapshot to run a search against.
    ///
    /// Sources may return more than the query needs; the matcher filters.
    async fn products(&self, query: &str) -> Result<Vec<Product>>;

    /// Get source name
    fn name(&self) -> &str;

    /// Check if source is reachable
    async fn is_available(&self) -> bool;
}
