//! Validation rules run by the full-resolution pass.
//!
//! Every rule is a small struct implementing [`Check`] over one input shape:
//! a symbol, a located symbol, or an override pair. Rules read the symbol
//! table and report through the [`ErrorListener`]; the returned `bool` says
//! whether the input passed, so rules compose with [`Check::and_then`]
//! (short-circuit) and [`Check::and_also`] (run both). Single-finding rules
//! also expose an inherent `diagnose` returning `Option<Diagnostic>`.

mod abstractness;
mod control;
mod defaults;
mod exceptions;
mod initialisation;
mod mutability;
mod operators;
mod overrides;
mod purity;
mod signatures;

pub use abstractness::{AbstractMatch, AbstractMethodsImplemented, NotAbstractOverConcrete};
pub use control::{
    BooleanGuardOrError, ConstructUse, ParentKind, Position, ReturningParamOrError,
    TypeFromReturningParam,
};
pub use defaults::DefaultOperatorsOrError;
pub use exceptions::ExceptionTypeOrError;
pub use initialisation::{
    InitialisedOrError, MethodReturnsInitialisedOrError, ReferencedOrError, SymbolFromContext,
};
pub use mutability::MutableOrError;
pub use operators::{
    CaseUse, OperatorAvailableOrError, OperatorUse, SwitchCasesOrError, SwitchUse,
};
pub use overrides::MethodOverridesOrError;
pub use purity::{CallSite, PureCallInPureScope, PureModifierOrError};
pub use signatures::OperatorSemanticsOrError;

use tarn_identity::SymbolId;

use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::symbols::SymbolTable;

/// A rule over inputs of type `I`.
pub trait Check<I> {
    /// Report findings about `input`; `true` when nothing was reported.
    fn check(&self, table: &SymbolTable, input: I, errors: &mut ErrorListener) -> bool;

    /// Run `next` only if this check passed.
    fn and_then<C>(self, next: C) -> AndThen<Self, C>
    where
        Self: Sized,
        C: Check<I>,
        I: Copy,
    {
        AndThen(self, next)
    }

    /// Run both checks regardless of the first outcome.
    fn and_also<C>(self, next: C) -> AndAlso<Self, C>
    where
        Self: Sized,
        C: Check<I>,
        I: Copy,
    {
        AndAlso(self, next)
    }

    /// Check every input, continuing after failures; `true` if all passed.
    fn check_each(
        &self,
        table: &SymbolTable,
        inputs: impl IntoIterator<Item = I>,
        errors: &mut ErrorListener,
    ) -> bool
    where
        Self: Sized,
    {
        inputs
            .into_iter()
            .fold(true, |ok, input| self.check(table, input, errors) && ok)
    }
}

impl<I, F> Check<I> for F
where
    F: Fn(&SymbolTable, I, &mut ErrorListener) -> bool,
{
    fn check(&self, table: &SymbolTable, input: I, errors: &mut ErrorListener) -> bool {
        self(table, input, errors)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AndThen<A, B>(A, B);

impl<I: Copy, A: Check<I>, B: Check<I>> Check<I> for AndThen<A, B> {
    fn check(&self, table: &SymbolTable, input: I, errors: &mut ErrorListener) -> bool {
        self.0.check(table, input, errors) && self.1.check(table, input, errors)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AndAlso<A, B>(A, B);

impl<I: Copy, A: Check<I>, B: Check<I>> Check<I> for AndAlso<A, B> {
    fn check(&self, table: &SymbolTable, input: I, errors: &mut ErrorListener) -> bool {
        let first = self.0.check(table, input, errors);
        let second = self.1.check(table, input, errors);
        first && second
    }
}

/// A (super, this) pair with the context to report against `this`.
#[derive(Debug, Clone, Copy)]
pub struct OverridePair<'a> {
    pub message: &'a str,
    pub super_symbol: SymbolId,
    pub this_symbol: SymbolId,
}

pub(crate) fn report(errors: &mut ErrorListener, finding: Option<Diagnostic>) -> bool {
    match finding {
        Some(diagnostic) => {
            errors.push(diagnostic);
            false
        }
        None => true,
    }
}

/// `wrt 'name':` context for a symbol.
pub(crate) fn wrt(table: &SymbolTable, symbol: SymbolId) -> String {
    format!("wrt '{}':", table.friendly_name(symbol))
}
