// rules/overrides.rs

use tarn_identity::SymbolId;

use super::{
    AbstractMethodsImplemented, Check, NotAbstractOverConcrete, OverridePair, PureModifierOrError,
    wrt,
};
use crate::diagnostics::ErrorListener;
use crate::errors::Classification;
use crate::search::{MethodResolver, MethodSearch};
use crate::symbols::{Genus, SymbolTable};

/// Everything an aggregate's own methods must satisfy against what they
/// override, plus completeness for concrete aggregates.
#[derive(Debug, Default, Clone, Copy)]
pub struct MethodOverridesOrError {
    completeness: AbstractMethodsImplemented,
}

impl MethodOverridesOrError {
    pub fn new(completeness: AbstractMethodsImplemented) -> Self {
        Self { completeness }
    }

    fn constructors_consistent(
        &self,
        table: &SymbolTable,
        aggregate: SymbolId,
        errors: &mut ErrorListener,
    ) -> bool {
        let constructors = table.constructors(aggregate);
        let pure = constructors
            .iter()
            .filter(|&&c| table.symbol(c).is_pure())
            .count();
        if pure == 0 || pure == constructors.len() {
            return true;
        }
        for &constructor in &constructors {
            if !table.symbol(constructor).is_pure() {
                errors.semantic_error(
                    table.symbol(constructor).span,
                    wrt(table, constructor),
                    Classification::MixOfPureAndNotPureConstructors,
                );
            }
        }
        false
    }

    /// The nearest method `method` overrides, searching each direct supertype.
    fn overridden(
        &self,
        table: &SymbolTable,
        aggregate: SymbolId,
        method: SymbolId,
    ) -> Option<SymbolId> {
        let search = MethodSearch::from_method(table, method)?;
        let resolver = MethodResolver::exact();
        table
            .direct_supers(aggregate)
            .into_iter()
            .find_map(|sup| resolver.resolve(table, sup, &search).found())
    }

    fn override_consistent(
        &self,
        table: &SymbolTable,
        method: SymbolId,
        super_method: SymbolId,
        errors: &mut ErrorListener,
    ) -> bool {
        let message = wrt(table, method);
        let pair = OverridePair {
            message: &message,
            super_symbol: super_method,
            this_symbol: method,
        };
        let mut ok = PureModifierOrError.check(table, pair, errors);
        if let Some(finding) = NotAbstractOverConcrete.diagnose_pair(table, pair) {
            errors.push(finding);
            ok = false;
        }
        if let (Some(returns), Some(super_returns)) =
            (table.return_type(method), table.return_type(super_method))
            && !table.is_assignable(returns, super_returns)
        {
            errors.semantic_error(
                table.symbol(method).span,
                format!(
                    "{} '{}' versus '{}':",
                    message,
                    table.friendly_name(returns),
                    table.friendly_name(super_returns)
                ),
                Classification::CovarianceMismatch,
            );
            ok = false;
        }
        ok
    }
}

impl Check<SymbolId> for MethodOverridesOrError {
    fn check(&self, table: &SymbolTable, aggregate: SymbolId, errors: &mut ErrorListener) -> bool {
        let mut ok = self.constructors_consistent(table, aggregate, errors);

        for &method in table.methods_in_this_scope_only(aggregate) {
            if table.symbol(method).is_constructor() {
                continue;
            }
            if let Some(super_method) = self.overridden(table, aggregate, method) {
                tracing::trace!(
                    method = method.index(),
                    overrides = super_method.index(),
                    "override found"
                );
                ok &= self.override_consistent(table, method, super_method, errors);
            }
        }

        let symbol = table.symbol(aggregate);
        let concrete = !symbol.is_abstract() && symbol.genus() != Some(Genus::Trait);
        if concrete {
            ok &= self.completeness.check(table, aggregate, errors);
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn mixed_constructor_purity_flags_each_impure_one() {
        let mut fx = Fixture::new();
        let integer = fx.b().integer;
        let point = fx.class("Point");
        let pure = fx.constructor(point, &[]);
        let impure_a = fx.constructor(point, &[integer]);
        let impure_b = fx.constructor(point, &[integer, integer]);
        fx.table.symbol_mut(pure).flags.pure = true;

        assert!(!MethodOverridesOrError::default().check(&fx.table, point, &mut fx.errors));
        let flagged: Vec<_> = fx.errors.errors().iter().map(|d| d.span).collect();
        assert_eq!(
            flagged,
            vec![fx.table.symbol(impure_a).span, fx.table.symbol(impure_b).span]
        );
    }

    #[test]
    fn override_must_keep_purity_and_return_covariantly() {
        let mut fx = Fixture::new();
        let b = fx.b();
        let base = fx.class("Base");
        let super_method = fx.method(base, "value", &[b.integer], Some(b.float));
        fx.table.symbol_mut(super_method).flags.pure = true;

        let derived = fx.class("Derived");
        fx.table.set_super(derived, base).expect("aggregate");
        fx.method(derived, "value", &[b.integer], Some(b.string));

        assert!(!MethodOverridesOrError::default().check(&fx.table, derived, &mut fx.errors));
        assert_eq!(fx.errors.count(Classification::SuperIsPure), 1);
        assert_eq!(fx.errors.count(Classification::CovarianceMismatch), 1);
    }

    #[test]
    fn concrete_class_must_implement_trait_methods() {
        let mut fx = Fixture::new();
        let b = fx.b();
        let shape = fx.trait_("Shape");
        let area = fx.method(shape, "area", &[], Some(b.float));
        fx.table.symbol_mut(area).flags.abstract_ = true;
        let circle = fx.class("Circle");
        fx.table.add_trait(circle, shape).expect("aggregate");

        assert!(!MethodOverridesOrError::default().check(&fx.table, circle, &mut fx.errors));
        assert_eq!(fx.errors.count(Classification::NotOverridden), 1);

        // The trait itself is not required to be complete.
        let mut errors = ErrorListener::new();
        assert!(MethodOverridesOrError::default().check(&fx.table, shape, &mut errors));
    }
}
