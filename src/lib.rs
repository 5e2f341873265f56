//! # Pazar Search
//!
//! Product search and stall mapping for physical markets:
//! - Two-pass product-name matching (substring, then Levenshtein ≤ 3)
//! - Grid ↔ 2D canvas and grid ↔ 3D scene coordinate mapping
//! - Stall placement with occupancy checks
//! - Catalog sources (REST API, JSON files), typed admin requests, login and session state
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pazar_search::{MarketSearch, SearchQuery};
//! use pazar_search::catalog::StaticCatalog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut search = MarketSearch::default();
//!     search.add_source(Arc::new(StaticCatalog::load("catalog.json").await?));
//!
//!     let response = search.search(SearchQuery::new("saltalık")).await?;
//!
//!     for product in &response.results {
//!         println!("{} at {:?}", product.name, product.location);
//!     }
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod markers;
pub mod matching;
pub mod pricing;
pub mod session;

// Re-export primary types
pub use crate::core::{GridPosition, Market, MatchKind, Product, SearchResponse};
pub use crate::engine::{MarketSearch, SearchOptions, SearchQuery};
pub use error::{PazarError, Result};
pub use mapping::{from_pointer, from_scene_point, to_scene, to_screen, MapConfig, Mapped, SceneConfig};
pub use matching::{match_catalog, MatchResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
