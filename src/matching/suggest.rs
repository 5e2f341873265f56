use rapidfuzz::distance::jaro_winkler;

use crate::core::Product;
use crate::matching::normalize;

/// Catalog name with similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub score: f64,
}

/// Jaro-Winkler ranking of catalog names, used for "did you mean" hints
/// when neither matching pass found anything.
pub struct SuggestionRanker {
    min_score: f64,
}

impl SuggestionRanker {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// Rank distinct catalog names against `query`, highest score first.
    ///
    /// Scores are percentages; names below `min_score` are dropped.
    pub fn rank(&self, query: &str, catalog: &[Product], limit: usize) -> Vec<Suggestion> {
        let query_lower = normalize(query);
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<Suggestion> = Vec::new();
        for product in catalog {
            let name_lower = normalize(&product.name);
            if name_lower.is_empty() || ranked.iter().any(|s| s.name == product.name) {
                continue;
            }

            // Best of the whole name and its individual words
            let score = std::iter::once(name_lower.as_str())
                .chain(name_lower.split_whitespace())
                .map(|candidate| {
                    jaro_winkler::normalized_similarity(query_lower.chars(), candidate.chars())
                })
                .fold(0.0_f64, f64::max)
                * 100.0;

            if score >= self.min_score {
                ranked.push(Suggestion {
                    name: product.name.clone(),
                    score,
                });
            }
        }

        // Stable sort keeps catalog order between equal scores
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        Self::new(70.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_ranking() {
        let ranker = SuggestionRanker::new(0.0);

        let catalog = vec![
            Product::new("p6", "Patates"),
            Product::new("p1", "Salkım Domates"),
            Product::new("p8", "Maydanoz"),
        ];

        let ranked = ranker.rank("patlıcan", &catalog, 3);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "Patates");
        assert!(ranked[0].score > ranked[2].score);
    }

    #[test]
    fn test_exact_name_scores_100() {
        let ranker = SuggestionRanker::default();
        let catalog = vec![Product::new("p6", "Patates")];

        let ranked = ranker.rank("PATATES", &catalog, 1);
        assert_eq!(ranked[0].score, 100.0);
    }

    #[test]
    fn test_min_score_and_limit() {
        let ranker = SuggestionRanker::new(99.0);
        let catalog = vec![Product::new("p6", "Patates"), Product::new("p8", "Maydanoz")];

        assert!(ranker.rank("karpuz", &catalog, 5).is_empty());

        let loose = SuggestionRanker::new(0.0);
        assert_eq!(loose.rank("karpuz", &catalog, 1).len(), 1);
    }

    #[test]
    fn test_duplicate_names_collapsed() {
        let ranker = SuggestionRanker::new(0.0);
        let catalog = vec![Product::new("a", "Patates"), Product::new("b", "Patates")];
        assert_eq!(ranker.rank("patates", &catalog, 5).len(), 1);
    }
}
