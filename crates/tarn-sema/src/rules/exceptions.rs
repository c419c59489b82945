// rules/exceptions.rs

use tarn_identity::{Span, SymbolId};

use super::{Check, report};
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::errors::Classification;
use crate::symbols::SymbolTable;

/// Anything thrown or caught must be, or extend, the built-in Exception.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionTypeOrError;

impl ExceptionTypeOrError {
    pub fn diagnose(
        &self,
        table: &SymbolTable,
        (span, symbol): (Span, Option<SymbolId>),
    ) -> Option<Diagnostic> {
        let ty = table.type_of(symbol?)?;
        if table.is_or_extends(ty, table.builtins().exception) {
            return None;
        }
        Some(Diagnostic::new(
            span,
            format!("wrt '{}':", table.friendly_name(ty)),
            Classification::TypeMustExtendException,
        ))
    }
}

impl Check<(Span, Option<SymbolId>)> for ExceptionTypeOrError {
    fn check(
        &self,
        table: &SymbolTable,
        input: (Span, Option<SymbolId>),
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, input))
    }
}
