// search/resolver.rs

use rustc_hash::FxHashSet;
use tarn_identity::SymbolId;

use super::{MatchMode, MethodSearch, MethodSearchResult, Resolution};
use crate::config::DEFAULT_AMBIGUITY_TOLERANCE;
use crate::symbols::SymbolTable;

/// Finds the single best method on a type (or its hierarchy) for a search key.
///
/// Read-only: the result is a pure function of table, type, key and mode.
#[derive(Debug, Clone, Copy)]
pub struct MethodResolver {
    mode: MatchMode,
    tolerance: f64,
}

impl MethodResolver {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            tolerance: DEFAULT_AMBIGUITY_TOLERANCE,
        }
    }

    pub fn exact() -> Self {
        Self::new(MatchMode::Exact)
    }

    pub fn compatible() -> Self {
        Self::new(MatchMode::Compatible)
    }

    /// Costs closer than `tolerance` rank equally.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Resolve against `ty` and everything it inherits.
    #[tracing::instrument(skip(self, table, search), fields(search = %search.name))]
    pub fn resolve(&self, table: &SymbolTable, ty: SymbolId, search: &MethodSearch) -> Resolution {
        let resolution = self.matches_on_type(table, ty, search).resolve(self.tolerance);
        tracing::trace!(?resolution, "method resolution");
        resolution
    }

    /// Resolve against methods declared directly on `ty` only.
    pub fn resolve_in_this_scope_only(
        &self,
        table: &SymbolTable,
        ty: SymbolId,
        search: &MethodSearch,
    ) -> Resolution {
        self.matches_in(table, table.methods_in_this_scope_only(ty), search)
            .resolve(self.tolerance)
    }

    /// All surviving candidates on `ty`'s hierarchy; derived methods hide the
    /// inherited methods they override.
    pub fn matches_on_type(
        &self,
        table: &SymbolTable,
        ty: SymbolId,
        search: &MethodSearch,
    ) -> MethodSearchResult {
        let mut visited = FxHashSet::default();
        self.collect(table, ty, search, &mut visited)
    }

    fn collect(
        &self,
        table: &SymbolTable,
        ty: SymbolId,
        search: &MethodSearch,
        visited: &mut FxHashSet<SymbolId>,
    ) -> MethodSearchResult {
        if !visited.insert(ty) {
            return MethodSearchResult::default();
        }
        let inherited = table
            .direct_supers(ty)
            .into_iter()
            .fold(MethodSearchResult::default(), |acc, sup| {
                acc.merge_peer(self.collect(table, sup, search, visited))
            });
        let local = self.matches_in(table, table.methods_in_this_scope_only(ty), search);
        inherited.override_with(local, table)
    }

    pub fn matches_in(
        &self,
        table: &SymbolTable,
        candidates: &[SymbolId],
        search: &MethodSearch,
    ) -> MethodSearchResult {
        let mut result = MethodSearchResult::default();
        let Some(name) = table.lookup_name(&search.name) else {
            return result;
        };
        for &method in candidates {
            if table.symbol(method).name != name {
                continue;
            }
            match self.cost(table, method, search) {
                Some(cost) => {
                    tracing::trace!(method = method.index(), cost, "candidate kept");
                    result.push(method, cost);
                }
                None => tracing::trace!(method = method.index(), "candidate rejected"),
            }
        }
        result
    }

    /// Ranking cost of `method` for `search`; `None` when it does not match.
    fn cost(&self, table: &SymbolTable, method: SymbolId, search: &MethodSearch) -> Option<f64> {
        let formals = table.param_types(method);
        if formals.len() != search.params.len() {
            return None;
        }
        let mut total = 0.0;
        for (&arg, formal) in search.params.iter().zip(formals) {
            let formal = formal?;
            total += match self.mode {
                MatchMode::Exact if table.is_exact_same_type(arg, formal) => 0.0,
                MatchMode::Exact => return None,
                MatchMode::Compatible => table.assignable_cost(arg, formal)?,
            };
        }
        if let Some(required) = search.returning {
            let returns = table.return_type(method)?;
            let ok = match self.mode {
                MatchMode::Exact => table.is_exact_same_type(returns, required),
                MatchMode::Compatible => table.is_assignable(returns, required),
            };
            if !ok {
                return None;
            }
        }
        Some(total)
    }
}
