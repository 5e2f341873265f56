//! Product-name matching over an in-memory catalog snapshot.
//!
//! A search runs the substring pass first. The edit-distance pass only runs
//! when the substring pass finds nothing. Results keep catalog order and are
//! deduplicated by product id.

pub mod edit_distance;
pub mod substring;
pub mod suggest;

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{MatchKind, Product};

pub use edit_distance::{LevenshteinPass, FUZZY_THRESHOLD};
pub use substring::SubstringPass;
pub use suggest::{Suggestion, SuggestionRanker};

/// One matching strategy applied to a single catalog name.
///
/// Both arguments arrive already normalized (see [`normalize`]).
pub trait MatchPass: Send + Sync {
    /// Whether `name` is accepted for `query`
    fn matches(&self, query: &str, name: &str) -> bool;

    /// Get pass name for logging
    fn name(&self) -> &str;
}

/// Ordered, id-unique products plus the pass that found them
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub products: Vec<Product>,
    pub kind: MatchKind,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            kind: MatchKind::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Trim and lower-case a query or catalog name
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Two-stage matcher: primary pass, then fallback when the primary is empty
#[derive(Clone)]
pub struct CatalogMatcher {
    primary: Arc<dyn MatchPass>,
    fallback: Arc<dyn MatchPass>,
}

impl CatalogMatcher {
    pub fn new(primary: Arc<dyn MatchPass>, fallback: Arc<dyn MatchPass>) -> Self {
        Self { primary, fallback }
    }

    /// Match `query` against `catalog`.
    ///
    /// An empty query or an empty catalog yields an empty result.
    pub fn run(&self, query: &str, catalog: &[Product]) -> MatchResult {
        let query = normalize(query);
        if query.is_empty() || catalog.is_empty() {
            return MatchResult::empty();
        }

        let names: Vec<(usize, String)> = catalog
            .iter()
            .enumerate()
            .map(|(i, p)| (i, normalize(&p.name)))
            .filter(|(_, name)| !name.is_empty())
            .collect();

        let exact = Self::collect(self.primary.as_ref(), &query, catalog, &names);
        if !exact.is_empty() {
            tracing::trace!("{} pass matched {} product(s)", self.primary.name(), exact.len());
            return MatchResult {
                products: exact,
                kind: MatchKind::Exact,
            };
        }

        let fuzzy = Self::collect(self.fallback.as_ref(), &query, catalog, &names);
        if fuzzy.is_empty() {
            return MatchResult::empty();
        }

        tracing::trace!("{} pass matched {} product(s)", self.fallback.name(), fuzzy.len());
        MatchResult {
            products: fuzzy,
            kind: MatchKind::Fuzzy,
        }
    }

    fn collect(
        pass: &dyn MatchPass,
        query: &str,
        catalog: &[Product],
        names: &[(usize, String)],
    ) -> Vec<Product> {
        let mut seen: HashSet<String> = HashSet::new();
        names
            .iter()
            .filter(|(_, name)| pass.matches(query, name))
            .map(|(i, _)| &catalog[*i])
            .filter(|p| seen.insert(p.id.clone()))
            .cloned()
            .collect()
    }
}

impl Default for CatalogMatcher {
    fn default() -> Self {
        Self::new(Arc::new(SubstringPass), Arc::new(LevenshteinPass::default()))
    }
}

/// Match with the default substring + Levenshtein passes
pub fn match_catalog(query: &str, catalog: &[Product]) -> MatchResult {
    CatalogMatcher::default().run(query, catalog)
}
