use crate::matching::MatchPass;

/// Containment in either direction: the name holds the query, or the
/// query holds the whole name ("taze patates" finds "Patates").
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringPass;

impl MatchPass for SubstringPass {
    fn matches(&self, query: &str, name: &str) -> bool {
        name.contains(query) || query.contains(name)
    }

    fn name(&self) -> &str {
        "substring"
    }
}
