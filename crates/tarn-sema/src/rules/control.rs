// rules/control.rs
//
// Shape rules for if, switch, while, for and try used as statements or as
// expressions.

use tarn_identity::{Span, SymbolId};

use super::{Check, report, wrt};
use crate::config::ReturningPolicy;
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::errors::Classification;
use crate::symbols::SymbolTable;

/// Kind of the parse tree node enclosing a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Statement,
    Block,
    Assignment,
    Declaration,
    Argument,
    Return,
    Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Statement,
    Expression,
}

impl Position {
    /// Position is structural: only a statement or block parent makes a statement.
    pub fn of(parent: ParentKind) -> Self {
        match parent {
            ParentKind::Statement | ParentKind::Block => Position::Statement,
            _ => Position::Expression,
        }
    }
}

/// A control construct as it appears in the tree.
#[derive(Debug, Clone, Copy)]
pub struct ConstructUse {
    pub span: Span,
    pub control: SymbolId,
    pub parent: ParentKind,
}

impl ConstructUse {
    pub fn position(&self) -> Position {
        Position::of(self.parent)
    }
}

/// A control block guard must be exactly Boolean; assignable is not enough.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanGuardOrError;

impl BooleanGuardOrError {
    pub fn diagnose(
        &self,
        table: &SymbolTable,
        (span, guard): (Span, Option<SymbolId>),
    ) -> Option<Diagnostic> {
        // An untyped guard failed to resolve upstream.
        let ty = table.type_of(guard?)?;
        if table.is_exact_same_type(ty, table.builtins().boolean) {
            return None;
        }
        Some(Diagnostic::new(
            span,
            format!("wrt '{}':", table.friendly_name(ty)),
            Classification::MustResultInABoolean,
        ))
    }
}

impl Check<(Span, Option<SymbolId>)> for BooleanGuardOrError {
    fn check(
        &self,
        table: &SymbolTable,
        input: (Span, Option<SymbolId>),
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, input))
    }
}

/// Expression position requires a returning binding; statement position
/// forbids an explicit one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReturningParamOrError {
    policy: ReturningPolicy,
}

impl ReturningParamOrError {
    pub fn new(policy: ReturningPolicy) -> Self {
        Self { policy }
    }

    pub fn diagnose(&self, table: &SymbolTable, construct: ConstructUse) -> Option<Diagnostic> {
        let returning = table.symbol(construct.control).control()?.returning;
        let synthetic = returning.is_some_and(|r| table.symbol(r).synthesized.synthetic);
        let explicit = returning.is_some() && !synthetic;
        // Only a typed default can stand in for an explicit binding.
        let defaulted = synthetic && returning.and_then(|r| table.type_of(r)).is_some();

        let classification = match construct.position() {
            Position::Expression => {
                let satisfied =
                    explicit || (defaulted && self.policy == ReturningPolicy::AllowDefaulted);
                if satisfied {
                    return None;
                }
                Classification::ReturningRequired
            }
            Position::Statement if explicit => Classification::ReturningNotRequired,
            Position::Statement => return None,
        };
        Some(Diagnostic::new(
            construct.span,
            wrt(table, construct.control),
            classification,
        ))
    }
}

impl Check<ConstructUse> for ReturningParamOrError {
    fn check(
        &self,
        table: &SymbolTable,
        construct: ConstructUse,
        errors: &mut ErrorListener,
    ) -> bool {
        report(errors, self.diagnose(table, construct))
    }
}

/// Types a construct from its returning binding, or `Void` without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeFromReturningParam;

impl TypeFromReturningParam {
    /// Returns the construct's type; `None` while the binding is untyped.
    pub fn apply(&self, table: &mut SymbolTable, control: SymbolId) -> Option<SymbolId> {
        let ty = match table.symbol(control).control()?.returning {
            Some(returning) => table.type_of(returning)?,
            None => table.builtins().void,
        };
        table.set_type(control, ty);
        table.type_of(control)
    }
}
