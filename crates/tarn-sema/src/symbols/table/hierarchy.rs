//! Type relationships and method set queries.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tarn_identity::SymbolId;

use super::SymbolTable;
use crate::symbols::SymbolKind;

/// Cost of each step up the inheritance graph.
pub const SUPER_STEP_COST: f64 = 0.05;
/// Cost of a declared coercion.
pub const COERCION_COST: f64 = 0.5;

impl SymbolTable {
    /// Types compare by identity; parameterised instances are canonical so this
    /// holds for them too.
    pub fn is_exact_same_type(&self, a: SymbolId, b: SymbolId) -> bool {
        a == b
    }

    /// Super type, then traits (or the super function for functions).
    pub fn direct_supers(&self, ty: SymbolId) -> SmallVec<[SymbolId; 4]> {
        match &self.symbol(ty).kind {
            SymbolKind::Aggregate(info) => info
                .super_type
                .into_iter()
                .chain(info.traits.iter().copied())
                .collect(),
            SymbolKind::Function(info) => info.super_function.into_iter().collect(),
            _ => SmallVec::new(),
        }
    }

    /// Every super type and trait, nearest first, without repeats.
    pub fn supers_of(&self, ty: SymbolId) -> Vec<SymbolId> {
        self.supers_with_depth(ty)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    fn supers_with_depth(&self, ty: SymbolId) -> Vec<(SymbolId, u32)> {
        let mut seen = FxHashSet::default();
        seen.insert(ty);
        let mut queue: VecDeque<(SymbolId, u32)> = VecDeque::new();
        queue.push_back((ty, 0));
        let mut result = Vec::new();
        while let Some((current, depth)) = queue.pop_front() {
            for sup in self.direct_supers(current) {
                if seen.insert(sup) {
                    result.push((sup, depth + 1));
                    queue.push_back((sup, depth + 1));
                }
            }
        }
        result
    }

    /// Whether `derived` is `base` or inherits from it.
    pub fn is_or_extends(&self, derived: SymbolId, base: SymbolId) -> bool {
        derived == base || self.supers_of(derived).contains(&base)
    }

    /// Ranking cost of passing a `from` value where `to` is expected.
    ///
    /// `Some(0.0)` for the same type, a small cost per inheritance step, a larger
    /// one for a declared coercion; `None` when not assignable at all.
    pub fn assignable_cost(&self, from: SymbolId, to: SymbolId) -> Option<f64> {
        if from == to {
            return Some(0.0);
        }
        if let Some((_, depth)) = self
            .supers_with_depth(from)
            .into_iter()
            .find(|&(id, _)| id == to)
        {
            return Some(SUPER_STEP_COST * depth as f64);
        }
        if self.has_coercion(from, to) {
            return Some(COERCION_COST);
        }
        None
    }

    pub fn is_assignable(&self, from: SymbolId, to: SymbolId) -> bool {
        self.assignable_cost(from, to).is_some()
    }

    // ===== Callables =====

    /// Parameter types of a method or function, `None` where still unresolved.
    pub fn param_types(&self, callable: SymbolId) -> SmallVec<[Option<SymbolId>; 4]> {
        self.symbol(callable)
            .callable()
            .map(|info| info.params.iter().map(|&p| self.type_of(p)).collect())
            .unwrap_or_default()
    }

    /// Return type of a callable; `Void` when it declares no returning binding.
    pub fn return_type(&self, callable: SymbolId) -> Option<SymbolId> {
        match self.symbol(callable).callable()?.returning {
            Some(rtn) => self.type_of(rtn),
            None => Some(self.builtins().void),
        }
    }

    /// Same name and exactly the same parameter types.
    pub fn same_signature(&self, a: SymbolId, b: SymbolId) -> bool {
        self.symbol(a).name == self.symbol(b).name && self.param_types(a) == self.param_types(b)
    }

    // ===== Aggregate method sets =====

    /// Methods declared directly on the aggregate.
    pub fn methods_in_this_scope_only(&self, aggregate: SymbolId) -> &[SymbolId] {
        self.aggregate(aggregate)
            .map_or(&[], |info| info.methods.as_slice())
    }

    pub fn non_abstract_methods_in_this_scope_only(&self, aggregate: SymbolId) -> Vec<SymbolId> {
        self.methods_in_this_scope_only(aggregate)
            .iter()
            .copied()
            .filter(|&m| !self.symbol(m).is_abstract())
            .collect()
    }

    pub fn abstract_methods_in_this_scope_only(&self, aggregate: SymbolId) -> Vec<SymbolId> {
        self.methods_in_this_scope_only(aggregate)
            .iter()
            .copied()
            .filter(|&m| self.symbol(m).is_abstract())
            .collect()
    }

    /// Every method visible on the aggregate, most derived first.
    pub fn all_methods_in_hierarchy(&self, aggregate: SymbolId) -> Vec<SymbolId> {
        std::iter::once(aggregate)
            .chain(self.supers_of(aggregate))
            .flat_map(|ty| self.methods_in_this_scope_only(ty).iter().copied())
            .collect()
    }

    /// Abstract methods across the whole hierarchy.
    ///
    /// A more derived abstract redeclaration of the same signature hides the
    /// inherited one, so each abstract signature appears once.
    pub fn all_abstract_methods(&self, aggregate: SymbolId) -> Vec<SymbolId> {
        let mut result: Vec<SymbolId> = Vec::new();
        for method in self.all_methods_in_hierarchy(aggregate) {
            if !self.symbol(method).is_abstract() {
                continue;
            }
            if result.iter().any(|&seen| self.same_signature(seen, method)) {
                continue;
            }
            result.push(method);
        }
        result
    }

    /// Constructors declared directly on the aggregate.
    pub fn constructors(&self, aggregate: SymbolId) -> Vec<SymbolId> {
        self.methods_in_this_scope_only(aggregate)
            .iter()
            .copied()
            .filter(|&m| self.symbol(m).is_constructor())
            .collect()
    }
}
