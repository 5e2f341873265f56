use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use crate::catalog::CatalogSource;
use crate::core::Product;
use crate::error::{PazarError, Result};

/// In-memory catalog, typically loaded from a JSON export
pub struct StaticCatalog {
    name: String,
    products: Vec<Product>,
}

/// Accept a bare product array or a saved search response
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Products(Vec<Product>),
    Wrapped { results: Vec<Product> },
}

impl StaticCatalog {
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }

    /// Parse a catalog from JSON text
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let products = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::Products(products) => products,
            CatalogFile::Wrapped { results } => results,
        };

        if let Some(blank) = products.iter().find(|p| p.name.trim().is_empty()) {
            return Err(PazarError::Catalog {
                source_name: "file".to_string(),
                message: format!("product '{}' has an empty name", blank.id),
            });
        }

        Ok(Self::new(name, products))
    }

    /// Load a catalog file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(path.display().to_string(), &json)?;
        tracing::debug!("Loaded {} products from {}", catalog.products.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn products(&self, _query: &str) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        true
    }
}
