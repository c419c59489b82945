// search/result.rs

use tarn_identity::SymbolId;

use crate::symbols::SymbolTable;

/// A candidate that survived filtering, with its ranking cost (lower is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedMatch {
    pub method: SymbolId,
    pub cost: f64,
}

/// Outcome of demanding a single best match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(SymbolId),
    Absent,
    /// Equally ranked candidates, best first
    Ambiguous(Vec<SymbolId>),
}

impl Resolution {
    pub fn found(&self) -> Option<SymbolId> {
        match self {
            Resolution::Found(id) => Some(*id),
            _ => None,
        }
    }
}

/// Every surviving candidate of one search.
#[derive(Debug, Clone, Default)]
pub struct MethodSearchResult {
    matches: Vec<WeightedMatch>,
}

impl MethodSearchResult {
    pub fn push(&mut self, method: SymbolId, cost: f64) {
        self.matches.push(WeightedMatch { method, cost });
    }

    pub fn matches(&self) -> &[WeightedMatch] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Combine results from unrelated supertypes; neither hides the other.
    pub fn merge_peer(mut self, other: MethodSearchResult) -> Self {
        self.matches.extend(other.matches);
        self
    }

    /// Combine inherited results with a more derived type's own results; a
    /// local method hides any inherited one with the same signature.
    pub fn override_with(self, local: MethodSearchResult, table: &SymbolTable) -> Self {
        let mut matches = local.matches;
        for inherited in self.matches {
            let hidden = matches
                .iter()
                .any(|m| table.same_signature(m.method, inherited.method));
            if !hidden {
                matches.push(inherited);
            }
        }
        Self { matches }
    }

    /// The single best match; candidates whose cost is within `tolerance` of
    /// the best are equally ranked.
    pub fn resolve(&self, tolerance: f64) -> Resolution {
        let mut ranked = self.matches.clone();
        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        match ranked.as_slice() {
            [] => Resolution::Absent,
            [only] => Resolution::Found(only.method),
            [best, second, ..] if (second.cost - best.cost) >= tolerance => {
                Resolution::Found(best.method)
            }
            [best, ..] => Resolution::Ambiguous(
                ranked
                    .iter()
                    .take_while(|m| (m.cost - best.cost) < tolerance)
                    .map(|m| m.method)
                    .collect(),
            ),
        }
    }
}
