use serde::{Deserialize, Serialize};
use crate::core::Product;

/// Which stage produced the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Substring match in either direction
    Exact,
    /// Edit-distance fallback
    Fuzzy,
    /// Synthetic entry echoing the query
    Placeholder,
    /// Nothing matched
    #[default]
    None,
}

/// Search response with matched products and metadata.
///
/// Also reads the market API's `/products/search` body, which carries
/// `aiSuggestions` and no match metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The query, trimmed
    pub query: String,

    /// Matched products, discovery order
    pub results: Vec<Product>,

    /// Number of results
    pub count: usize,

    /// Close catalog names offered when nothing matched
    #[serde(default, alias = "aiSuggestions")]
    pub suggestions: Vec<String>,

    #[serde(default)]
    pub match_kind: MatchKind,

    /// Search latency in milliseconds
    #[serde(default)]
    pub latency_ms: f64,

    /// Catalog sources that answered
    #[serde(default)]
    pub sources: Vec<String>,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(query: impl Into<String>, results: Vec<Product>, match_kind: MatchKind) -> Self {
        let count = results.len();
        Self {
            query: query.into(),
            results,
            count,
            suggestions: Vec::new(),
            match_kind,
            latency_ms: 0.0,
            sources: Vec::new(),
        }
    }

    /// Whether results came from the catalog rather than a placeholder
    pub fn is_real_match(&self) -> bool {
        matches!(self.match_kind, MatchKind::Exact | MatchKind::Fuzzy)
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "'{}' -> {} result(s) {:?} [{}] {:.2}ms",
            self.query,
            self.count,
            self.match_kind,
            self.sources.join(","),
            self.latency_ms
        )
    }
}
