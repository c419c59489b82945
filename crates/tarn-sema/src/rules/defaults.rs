// rules/defaults.rs
//
// Operators an aggregate asks to have defaulted must be buildable from what
// its super and properties provide.

use tarn_identity::{Span, SymbolId};

use super::Check;
use crate::diagnostics::ErrorListener;
use crate::errors::Classification;
use crate::operators::is_comparison;
use crate::search::{MethodResolver, MethodSearch};
use crate::symbols::{Genus, SymbolTable};

/// Defaulted comparisons need `<=>` declared on the aggregate and its super;
/// every other defaulted operator needs the same operator on the super and on
/// each property's type. Function-typed properties cannot take part at all.
#[derive(Debug, Clone, Copy)]
pub struct DefaultOperatorsOrError {
    resolver: MethodResolver,
}

impl Default for DefaultOperatorsOrError {
    fn default() -> Self {
        Self::new(MethodResolver::compatible())
    }
}

impl DefaultOperatorsOrError {
    pub fn new(resolver: MethodResolver) -> Self {
        Self { resolver }
    }

    fn delegates_or_error(
        &self,
        table: &SymbolTable,
        aggregate: SymbolId,
        defaulted: &[SymbolId],
        errors: &mut ErrorListener,
    ) -> bool {
        let Some(info) = table.aggregate(aggregate) else {
            return true;
        };
        let mut ok = true;
        for &property in &info.properties {
            let delegate = table
                .type_of(property)
                .and_then(|ty| table.symbol(ty).genus())
                .is_some_and(|genus| matches!(genus, Genus::Function | Genus::FunctionTrait));
            if !delegate {
                continue;
            }
            for &operator in defaulted {
                // `?` is answered by whether the delegate is set.
                if table.name_of(operator) == "?" {
                    continue;
                }
                errors.semantic_error(
                    table.symbol(operator).span,
                    format!("wrt '{}':", table.friendly_name(property)),
                    Classification::FunctionDelegateWithDefaultOperators,
                );
                ok = false;
            }
        }
        ok
    }

    /// `<=>(ty)` declared directly on `ty`.
    fn comparator_or_error(
        &self,
        table: &SymbolTable,
        ty: SymbolId,
        span: Span,
        classification: Classification,
        errors: &mut ErrorListener,
    ) -> bool {
        let search = MethodSearch::new("<=>").with_param(ty);
        let found = self
            .resolver
            .resolve_in_this_scope_only(table, ty, &search)
            .found();
        if found.is_none() {
            missing(table, ty, span, &search, classification, errors);
        }
        found.is_some()
    }

    fn operator_or_error(
        &self,
        table: &SymbolTable,
        aggregate: SymbolId,
        operator: SymbolId,
        errors: &mut ErrorListener,
    ) -> bool {
        // Untyped parameters were reported when the operator was declared.
        let Some(search) = MethodSearch::from_method(table, operator) else {
            return true;
        };
        let span = table.symbol(operator).span;
        let mut ok = true;

        if let Some(sup) = table.aggregate(aggregate).and_then(|info| info.super_type)
            && self
                .resolver
                .resolve_in_this_scope_only(table, sup, &search)
                .found()
                .is_none()
        {
            missing(table, sup, span, &search, Classification::MissingOperatorInSuper, errors);
            ok = false;
        }

        let properties = table
            .aggregate(aggregate)
            .map(|info| info.properties.as_slice())
            .unwrap_or_default();
        for &property in properties {
            let Some(ty) = table.type_of(property) else {
                continue;
            };
            if table.aggregate(ty).is_none() {
                continue;
            }
            if self.resolver.resolve(table, ty, &search).found().is_none() {
                errors.semantic_error(
                    span,
                    format!(
                        "Relating to '{}', it requires operator '{}':",
                        table.friendly_name(property),
                        search.display(table)
                    ),
                    Classification::MissingOperatorInPropertyType,
                );
                ok = false;
            }
        }
        ok
    }
}

fn missing(
    table: &SymbolTable,
    ty: SymbolId,
    span: Span,
    search: &MethodSearch,
    classification: Classification,
    errors: &mut ErrorListener,
) {
    errors.semantic_error(
        span,
        format!(
            "Relating to '{}' requires operator '{}':",
            table.friendly_name(ty),
            search.display(table)
        ),
        classification,
    );
}

impl Check<SymbolId> for DefaultOperatorsOrError {
    fn check(&self, table: &SymbolTable, aggregate: SymbolId, errors: &mut ErrorListener) -> bool {
        let defaulted: Vec<SymbolId> = table
            .methods_in_this_scope_only(aggregate)
            .iter()
            .copied()
            .filter(|&m| table.symbol(m).is_defaulted_operator())
            .collect();
        if defaulted.is_empty() {
            return true;
        }
        tracing::trace!(count = defaulted.len(), "checking defaulted operators");

        let mut ok = self.delegates_or_error(table, aggregate, &defaulted, errors);

        // One report covers every defaulted comparison.
        if let Some(&first) = defaulted
            .iter()
            .find(|&&m| is_comparison(table.name_of(m)))
        {
            let span = table.symbol(first).span;
            ok &= self.comparator_or_error(
                table,
                aggregate,
                span,
                Classification::MissingOperatorInThis,
                errors,
            );
            if let Some(sup) = table.aggregate(aggregate).and_then(|info| info.super_type) {
                ok &= self.comparator_or_error(
                    table,
                    sup,
                    span,
                    Classification::MissingOperatorInSuper,
                    errors,
                );
            }
        }

        for &operator in &defaulted {
            if !is_comparison(table.name_of(operator)) {
                ok &= self.operator_or_error(table, aggregate, operator, errors);
            }
        }
        ok
    }
}
