// rules/purity.rs

use tarn_identity::{ScopeId, Span, SymbolId};

use super::{Check, OverridePair, report, wrt};
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::errors::Classification;
use crate::symbols::SymbolTable;

/// A symbol invoked or accessed from within a scope.
#[derive(Debug, Clone, Copy)]
pub struct CallSite {
    pub span: Span,
    pub symbol: SymbolId,
    pub scope: ScopeId,
}

/// Non-pure symbols may not be called from a pure processing context.
#[derive(Debug, Default, Clone, Copy)]
pub struct PureCallInPureScope;

impl PureCallInPureScope {
    pub fn diagnose(&self, table: &SymbolTable, site: CallSite) -> Option<Diagnostic> {
        if table.symbol(site.symbol).is_pure() || !table.is_scope_pure(site.scope) {
            return None;
        }
        Some(Diagnostic::new(
            site.span,
            wrt(table, site.symbol),
            Classification::NonePureCallInPureScope,
        ))
    }
}

impl Check<CallSite> for PureCallInPureScope {
    fn check(&self, table: &SymbolTable, site: CallSite, errors: &mut ErrorListener) -> bool {
        report(errors, self.diagnose(table, site))
    }
}

/// Purity must match exactly between an overridden symbol and its override.
#[derive(Debug, Default, Clone, Copy)]
pub struct PureModifierOrError;

impl PureModifierOrError {
    pub fn diagnose(&self, table: &SymbolTable, pair: OverridePair<'_>) -> Option<Diagnostic> {
        let super_pure = table.symbol(pair.super_symbol).is_pure();
        let this = table.symbol(pair.this_symbol);
        let classification = match (super_pure, this.is_pure()) {
            (true, false) => Classification::SuperIsPure,
            (false, true) => Classification::SuperIsNotPure,
            _ => return None,
        };
        Some(Diagnostic::new(this.span, pair.message, classification))
    }
}

impl<'a> Check<OverridePair<'a>> for PureModifierOrError {
    fn check(
        &self,
        table: &SymbolTable,
        pair: OverridePair<'a>,
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, pair))
    }
}
