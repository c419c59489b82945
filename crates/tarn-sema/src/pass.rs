// pass.rs
//
// The full-resolution pass: one entry point per event the tree walk reports.

use tarn_identity::{NodeId, ScopeId, Span, SymbolId};

use crate::config::CheckConfig;
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::generic::{ParameterizedKey, ParameterizedTypeResolver, TypeExpr};
use crate::rules::{
    AbstractMethodsImplemented, BooleanGuardOrError, CallSite, Check, ConstructUse,
    DefaultOperatorsOrError, ExceptionTypeOrError, InitialisedOrError, MethodOverridesOrError,
    MethodReturnsInitialisedOrError, MutableOrError, NotAbstractOverConcrete,
    OperatorAvailableOrError, OperatorSemanticsOrError, OperatorUse, OverridePair, Position,
    PureCallInPureScope, PureModifierOrError, ReferencedOrError, ReturningParamOrError,
    SwitchCasesOrError, SwitchUse, SymbolFromContext, TypeFromReturningParam,
};
use crate::search::{MethodResolver, MethodSearch};
use crate::symbols::{SymbolKind, SymbolTable};

/// Drives the rules against a populated symbol table.
///
/// The tree walk supplies spans and pre-resolved symbols; the pass never looks
/// at syntax itself. Diagnostics accumulate until [`ResolutionPass::finish`].
pub struct ResolutionPass<'t> {
    table: &'t mut SymbolTable,
    errors: ErrorListener,
    config: CheckConfig,
    operators: OperatorAvailableOrError,
    switch_cases: SwitchCasesOrError,
    returning: ReturningParamOrError,
    overrides: MethodOverridesOrError,
    defaults: DefaultOperatorsOrError,
}

impl<'t> ResolutionPass<'t> {
    pub fn new(table: &'t mut SymbolTable, config: CheckConfig) -> Self {
        let resolver = MethodResolver::compatible().with_tolerance(config.ambiguity_tolerance);
        let operators = OperatorAvailableOrError::new(resolver);
        Self {
            table,
            errors: ErrorListener::new(),
            operators,
            switch_cases: SwitchCasesOrError::new(operators),
            returning: ReturningParamOrError::new(config.returning_policy),
            overrides: MethodOverridesOrError::new(AbstractMethodsImplemented::new(resolver)),
            defaults: DefaultOperatorsOrError::new(resolver),
            config,
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &*self.table
    }

    pub fn table_mut(&mut self) -> &mut SymbolTable {
        &mut *self.table
    }

    pub fn errors(&self) -> &ErrorListener {
        &self.errors
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    // ===== Calls and operators =====

    /// Calling (or accessing) `site.symbol` from `site.scope`.
    pub fn check_call(&mut self, site: CallSite) -> bool {
        PureCallInPureScope.check(self.table, site, &mut self.errors)
    }

    /// Resolve a method call on a value of type `receiver`, then apply the
    /// purity gate to whatever it resolved to.
    pub fn resolve_call(
        &mut self,
        span: Span,
        scope: ScopeId,
        receiver: SymbolId,
        search: &MethodSearch,
    ) -> Option<SymbolId> {
        let method = self
            .operators
            .resolve_method(self.table, &mut self.errors, span, receiver, search)?;
        self.check_call(CallSite {
            span,
            symbol: method,
            scope,
        });
        Some(method)
    }

    /// Resolve an operator use, then apply the purity gate to it.
    ///
    /// `None` both when the node carries no operator and when resolution
    /// failed; only the latter is reported.
    pub fn check_operator(&mut self, scope: ScopeId, op: OperatorUse<'_>) -> Option<SymbolId> {
        let method = self.operators.resolve(self.table, &mut self.errors, op)?;
        self.check_call(CallSite {
            span: op.span,
            symbol: method,
            scope,
        });
        Some(method)
    }

    // ===== Variables =====

    /// Assigning to `target`.
    pub fn check_mutation(&mut self, span: Span, target: SymbolId) -> bool {
        MutableOrError.check(self.table, (span, target), &mut self.errors)
    }

    /// End-of-scope usage of a variable; `None` was already reported upstream.
    pub fn check_variable_usage(&mut self, variable: Option<SymbolId>) -> bool {
        if self.config.report_unreferenced {
            InitialisedOrError
                .and_also(ReferencedOrError)
                .check(self.table, variable, &mut self.errors)
        } else {
            InitialisedOrError.check(self.table, variable, &mut self.errors)
        }
    }

    pub fn symbol_from_context(&mut self, span: Span, node: NodeId) -> Option<SymbolId> {
        SymbolFromContext.get(self.table, &mut self.errors, span, node)
    }

    pub fn typed_symbol_from_context(&mut self, span: Span, node: NodeId) -> Option<SymbolId> {
        SymbolFromContext.typed(self.table, &mut self.errors, span, node)
    }

    // ===== Control constructs =====

    /// Guards of every block of an `if`, each of which must be Boolean.
    pub fn check_if_guards(&mut self, guards: &[(Span, Option<SymbolId>)]) -> bool {
        BooleanGuardOrError.check_each(self.table, guards.iter().copied(), &mut self.errors)
    }

    /// Shape of an `if`, `switch`, `while` or `try`; typed from its returning
    /// binding when used as an expression.
    pub fn check_construct(&mut self, construct: ConstructUse) -> Option<SymbolId> {
        let ok = self.returning.check(self.table, construct, &mut self.errors);
        if !ok || construct.position() == Position::Statement {
            return None;
        }
        TypeFromReturningParam.apply(self.table, construct.control)
    }

    /// Shape of a `for`; always typed, `Void` without a returning binding.
    pub fn check_for(&mut self, construct: ConstructUse) -> Option<SymbolId> {
        self.returning.check(self.table, construct, &mut self.errors);
        TypeFromReturningParam.apply(self.table, construct.control)
    }

    /// Every case of a switch, and enumeration coverage when the cases are
    /// plain values.
    pub fn check_switch_cases(&mut self, switch: SwitchUse<'_>) -> bool {
        self.switch_cases.check(self.table, switch, &mut self.errors)
    }

    /// A thrown or caught value.
    pub fn check_exception_type(&mut self, span: Span, symbol: Option<SymbolId>) -> bool {
        ExceptionTypeOrError.check(self.table, (span, symbol), &mut self.errors)
    }

    // ===== Declarations =====

    /// Overrides, constructors and completeness of one aggregate, plus its
    /// initialised returns, declared operators and defaulted operators.
    #[tracing::instrument(skip(self), fields(aggregate = aggregate.index()))]
    pub fn check_aggregate(&mut self, aggregate: SymbolId) -> bool {
        self.overrides
            .and_also(MethodReturnsInitialisedOrError)
            .and_also(OperatorSemanticsOrError)
            .and_also(self.defaults)
            .check(self.table, aggregate, &mut self.errors)
    }

    /// A function against the function it extends, if any.
    pub fn check_function(&mut self, function: SymbolId) -> bool {
        let super_function = match &self.table.symbol(function).kind {
            SymbolKind::Function(info) => info.super_function,
            _ => None,
        };
        let Some(super_function) = super_function else {
            return true;
        };
        let message = format!("wrt '{}':", self.table.friendly_name(function));
        let pair = OverridePair {
            message: &message,
            super_symbol: super_function,
            this_symbol: function,
        };
        let pure = PureModifierOrError.check(self.table, pair, &mut self.errors);
        let abstractness = NotAbstractOverConcrete.check(self.table, function, &mut self.errors);
        pure && abstractness
    }

    // ===== Types =====

    /// Resolve a written type, materialising parameterised instances.
    pub fn resolve_type_expr(&mut self, scope: ScopeId, expr: &TypeExpr) -> Option<SymbolId> {
        ParameterizedTypeResolver::resolve_or_define().resolve_type_expr(
            self.table,
            &mut self.errors,
            scope,
            expr,
        )
    }

    /// Resolve a parameterisation that must already exist.
    pub fn lookup_parameterized(
        &mut self,
        span: Span,
        key: ParameterizedKey,
    ) -> Option<SymbolId> {
        ParameterizedTypeResolver::resolve_only().resolve(self.table, &mut self.errors, span, key)
    }

    /// End the pass, handing back everything reported.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.table.instance_cache().log_stats("parameterised instances");
        let errors = self.errors.take_errors();
        tracing::debug!(count = errors.len(), "full resolution finished");
        errors
    }
}
