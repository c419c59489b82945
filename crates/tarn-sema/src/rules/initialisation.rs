// rules/initialisation.rs
//
// Initialisation, reference-usage and recorded-symbol checks.
//
// Inputs are `Option<SymbolId>`: `None` means an earlier phase could not produce
// the symbol and has already reported why, so there is nothing to add.

use tarn_identity::{NodeId, Span, SymbolId};

use super::{Check, report, wrt};
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::errors::Classification;
use crate::symbols::SymbolTable;

#[derive(Debug, Default, Clone, Copy)]
pub struct InitialisedOrError;

impl InitialisedOrError {
    pub fn diagnose(&self, table: &SymbolTable, symbol: Option<SymbolId>) -> Option<Diagnostic> {
        let symbol = symbol?;
        let found = table.symbol(symbol);
        if found.flags.initialised {
            return None;
        }
        Some(Diagnostic::new(
            found.span,
            wrt(table, symbol),
            Classification::NeverInitialised,
        ))
    }
}

impl Check<Option<SymbolId>> for InitialisedOrError {
    fn check(
        &self,
        table: &SymbolTable,
        symbol: Option<SymbolId>,
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, symbol))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReferencedOrError;

impl ReferencedOrError {
    pub fn diagnose(&self, table: &SymbolTable, symbol: Option<SymbolId>) -> Option<Diagnostic> {
        let symbol = symbol?;
        let found = table.symbol(symbol);
        if found.flags.referenced {
            return None;
        }
        Some(Diagnostic::new(
            found.span,
            wrt(table, symbol),
            Classification::NotReferenced,
        ))
    }
}

impl Check<Option<SymbolId>> for ReferencedOrError {
    fn check(
        &self,
        table: &SymbolTable,
        symbol: Option<SymbolId>,
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, symbol))
    }
}

/// Every concrete method declared on an aggregate must initialise its
/// returning binding.
#[derive(Debug, Default, Clone, Copy)]
pub struct MethodReturnsInitialisedOrError;

impl Check<SymbolId> for MethodReturnsInitialisedOrError {
    fn check(&self, table: &SymbolTable, aggregate: SymbolId, errors: &mut ErrorListener) -> bool {
        let returning = table
            .non_abstract_methods_in_this_scope_only(aggregate)
            .into_iter()
            .filter_map(|method| table.symbol(method).callable()?.returning)
            .map(Some);
        InitialisedOrError.check_each(table, returning, errors)
    }
}

/// Fetch the symbol an earlier phase recorded against a parse tree node.
///
/// Unlike the checks above, a missing record here is the finding: the node was
/// never given a symbol.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolFromContext;

impl SymbolFromContext {
    pub fn get(
        &self,
        table: &SymbolTable,
        errors: &mut ErrorListener,
        span: Span,
        node: NodeId,
    ) -> Option<SymbolId> {
        let found = table.recorded(node);
        if found.is_none() {
            errors.semantic_error(
                span,
                format!("node {}:", node.index()),
                Classification::NotResolved,
            );
        }
        found
    }

    /// As [`SymbolFromContext::get`], also requiring the symbol to be typed.
    pub fn typed(
        &self,
        table: &SymbolTable,
        errors: &mut ErrorListener,
        span: Span,
        node: NodeId,
    ) -> Option<SymbolId> {
        let symbol = self.get(table, errors, span, node)?;
        if table.type_of(symbol).is_none() {
            errors.semantic_error(span, wrt(table, symbol), Classification::TypeNotResolved);
            return None;
        }
        Some(symbol)
    }
}

impl Check<(Span, NodeId)> for SymbolFromContext {
    fn check(
        &self,
        table: &SymbolTable,
        (span, node): (Span, NodeId),
        errors: &mut ErrorListener,
    ) -> bool {
        self.get(table, errors, span, node).is_some()
    }
}
