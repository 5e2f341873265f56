use crate::catalog::CatalogSource;
use crate::core::{GridPosition, MatchKind, Product, SearchResponse};
use crate::error::{PazarError, Result};
use crate::matching::{CatalogMatcher, SuggestionRanker};
use std::sync::Arc;
use std::time::Instant;

/// Id given to the synthetic "might be around here" entry
pub const PLACEHOLDER_ID: &str = "placeholder";

/// Main search orchestrator: pulls catalog snapshots, matches, and
/// applies the empty-result policy
pub struct MarketSearch {
    matcher: CatalogMatcher,
    suggester: SuggestionRanker,
    sources: Vec<Arc<dyn CatalogSource>>,
    options: SearchOptions,
}

/// Search query parameters
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    /// 0 keeps every match
    pub max_results: usize,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 0,
        }
    }
}

/// Search options/configuration
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Substitute a placeholder product when nothing matched
    pub placeholder_enabled: bool,
    pub placeholder_location: GridPosition,
    pub max_suggestions: usize,
    pub min_suggestion_score: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            placeholder_enabled: true,
            placeholder_location: GridPosition::flat(5, 5),
            max_suggestions: 3,
            min_suggestion_score: 70.0,
        }
    }
}

impl MarketSearch {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            matcher: CatalogMatcher::default(),
            suggester: SuggestionRanker::new(options.min_suggestion_score),
            sources: Vec::new(),
            options,
        }
    }

    /// Swap the matching passes
    pub fn with_matcher(mut self, matcher: CatalogMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Add a catalog source
    pub fn add_source(&mut self, source: Arc<dyn CatalogSource>) {
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Search every source's catalog for a product
    pub async fn search(&self, query: SearchQuery) -> Result<SearchResponse> {
        let start = Instant::now();

        if query.query.trim().is_empty() {
            return Err(PazarError::EmptyQuery);
        }
        if self.sources.is_empty() {
            return Err(PazarError::NoSources);
        }

        let mut catalog = Vec::new();
        let mut answered = Vec::new();
        let mut last_error = None;
        for source in &self.sources {
            match source.products(&query.query).await {
                Ok(mut products) => {
                    tracing::debug!("Source {} returned {} products", source.name(), products.len());
                    answered.push(source.name().to_string());
                    catalog.append(&mut products);
                }
                Err(e) => {
                    tracing::warn!("Source {} failed: {}", source.name(), e);
                    last_error = Some(e);
                }
            }
        }

        if answered.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let matched = self.matcher.run(&query.query, &catalog);
        let mut results = matched.products;
        if query.max_results > 0 {
            results.truncate(query.max_results);
        }

        let mut response = SearchResponse::new(query.query.trim(), results, matched.kind);
        response.sources = answered;

        if response.results.is_empty() {
            response.suggestions = self
                .suggester
                .rank(&query.query, &catalog, self.options.max_suggestions)
                .into_iter()
                .map(|s| s.name)
                .collect();

            if self.options.placeholder_enabled {
                response.results.push(self.placeholder(query.query.trim()));
                response.count = 1;
                response.match_kind = MatchKind::Placeholder;
            }
        }

        response.latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!("{}", response.display());

        Ok(response)
    }

    fn placeholder(&self, query: &str) -> Product {
        Product::new(PLACEHOLDER_ID, format!("{} (Buralarda Olabilir)", query))
            .with_category("Genel", "adet")
            .with_location(self.options.placeholder_location)
            .with_price(0.0)
    }

    /// Names of sources that currently answer
    pub async fn available_sources(&self) -> Vec<String> {
        let mut available = Vec::new();
        for source in &self.sources {
            if source.is_available().await {
                available.push(source.name().to_string());
            }
        }
        available
    }
}

impl Default for MarketSearch {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}
