use rapidfuzz::distance::levenshtein;

use crate::matching::MatchPass;

/// Maximum edit distance accepted by the fallback pass.
///
/// Fixed, not scaled by query length: a one or two letter query sits
/// within 3 edits of every short token.
pub const FUZZY_THRESHOLD: usize = 3;

/// Levenshtein fallback over the whole name and each of its tokens
#[derive(Debug, Clone, Copy)]
pub struct LevenshteinPass {
    threshold: usize,
}

impl LevenshteinPass {
    pub fn new() -> Self {
        Self {
            threshold: FUZZY_THRESHOLD,
        }
    }

    /// Smallest distance between `query` and the name or any of its tokens
    pub fn min_distance(query: &str, name: &str) -> usize {
        std::iter::once(name)
            .chain(name.split_whitespace())
            .map(|candidate| distance(query, candidate))
            .min()
            .unwrap_or_else(|| query.chars().count())
    }

    fn within(&self, query: &str, query_len: usize, candidate: &str) -> bool {
        // Length difference is a lower bound on the distance.
        if query_len.abs_diff(candidate.chars().count()) > self.threshold {
            return false;
        }
        distance(query, candidate) <= self.threshold
    }
}

impl Default for LevenshteinPass {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit-cost edit distance counted in characters, not bytes
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

impl MatchPass for LevenshteinPass {
    fn matches(&self, query: &str, name: &str) -> bool {
        let query_len = query.chars().count();
        std::iter::once(name)
            .chain(name.split_whitespace())
            .any(|candidate| self.within(query, query_len, candidate))
    }

    fn name(&self) -> &str {
        "levenshtein"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance("saltalık", "salatalık"), 1);
        assert_eq!(distance("sogan", "soğan"), 1);
        assert_eq!(distance("", "biber"), 5);
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_min_distance_uses_tokens() {
        assert_eq!(LevenshteinPass::min_distance("saltalık", "çengelköy salatalık"), 1);
        assert_eq!(LevenshteinPass::min_distance("saltalık", "salkım domates"), 4);
    }

    #[test]
    fn test_threshold_boundary() {
        let pass = LevenshteinPass::new();
        assert!(pass.matches("kitten", "sitting"));
        assert!(!pass.matches("saltalık", "salkım domates"));
    }

    #[test]
    fn test_length_pruning_agrees_with_distance() {
        let pass = LevenshteinPass::new();
        for (query, name) in [
            ("patatis", "patates"),
            ("maydanozlar", "maydanoz"),
            ("elma", "amasya elması"),
            ("karpuz", "kuru soğan"),
        ] {
            let expected = LevenshteinPass::min_distance(query, name) <= FUZZY_THRESHOLD;
            assert_eq!(pass.matches(query, name), expected, "{query} vs {name}");
        }
    }
}
