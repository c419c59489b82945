// rules/signatures.rs
//
// Declared operators must take the shape their token implies.

use tarn_identity::SymbolId;

use super::{Check, wrt};
use crate::diagnostics::ErrorListener;
use crate::errors::Classification;
use crate::operators::{OperatorArgs, operator_details};
use crate::symbols::SymbolTable;

/// Purity, argument count and returned value of every operator an aggregate
/// declares. Defaulted operators are shaped by the compiler and skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperatorSemanticsOrError;

impl OperatorSemanticsOrError {
    /// Findings for one declared operator; empty for unknown tokens.
    pub fn diagnose(&self, table: &SymbolTable, operator: SymbolId) -> Vec<Classification> {
        let symbol = table.symbol(operator);
        let Some(details) = operator_details(table.name_of(operator)) else {
            return Vec::new();
        };
        let Some(callable) = symbol.callable() else {
            return Vec::new();
        };
        let mut findings = Vec::new();

        match (details.pure, symbol.is_pure()) {
            (true, false) => findings.push(Classification::OperatorMustBePure),
            (false, true) => findings.push(Classification::OperatorCannotBePure),
            _ => {}
        }

        let count = callable.params.len();
        if !details.args.accepts(count) {
            let fewest = match details.args {
                OperatorArgs::One => 1,
                OperatorArgs::Zero | OperatorArgs::ZeroOrOne => 0,
            };
            findings.push(if count < fewest {
                Classification::TooFewArguments
            } else {
                Classification::TooManyArguments
            });
        }

        match (details.returns_value, callable.returning.is_some()) {
            (true, false) => findings.push(Classification::ReturningMissing),
            (false, true) => findings.push(Classification::ReturnValueNotSupported),
            _ => {}
        }
        findings
    }
}

impl Check<SymbolId> for OperatorSemanticsOrError {
    fn check(&self, table: &SymbolTable, aggregate: SymbolId, errors: &mut ErrorListener) -> bool {
        let mut ok = true;
        for &method in table.methods_in_this_scope_only(aggregate) {
            let symbol = table.symbol(method);
            if !symbol.is_operator() || symbol.is_defaulted_operator() {
                continue;
            }
            for classification in self.diagnose(table, method) {
                errors.semantic_error(symbol.span, wrt(table, method), classification);
                ok = false;
            }
        }
        ok
    }
}
