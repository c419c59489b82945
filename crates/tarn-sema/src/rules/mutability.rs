// rules/mutability.rs

use tarn_identity::{Span, SymbolId};

use super::{Check, report, wrt};
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::errors::Classification;
use crate::symbols::SymbolTable;

/// The target of a mutation must be mutable, regardless of purity.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutableOrError;

impl MutableOrError {
    pub fn diagnose(
        &self,
        table: &SymbolTable,
        (span, symbol): (Span, SymbolId),
    ) -> Option<Diagnostic> {
        if table.symbol(symbol).is_mutable() {
            return None;
        }
        Some(Diagnostic::new(span, wrt(table, symbol), Classification::NotMutable))
    }
}

impl Check<(Span, SymbolId)> for MutableOrError {
    fn check(
        &self,
        table: &SymbolTable,
        input: (Span, SymbolId),
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, input))
    }
}
