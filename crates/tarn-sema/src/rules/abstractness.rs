// rules/abstractness.rs

use tarn_identity::SymbolId;

use super::{Check, OverridePair, report, wrt};
use crate::diagnostics::{Diagnostic, ErrorListener};
use crate::errors::Classification;
use crate::search::{MethodResolver, MethodSearch, Resolution};
use crate::symbols::{SymbolKind, SymbolTable};

/// An abstract function or method may not extend a concrete one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotAbstractOverConcrete;

impl NotAbstractOverConcrete {
    pub fn diagnose(&self, table: &SymbolTable, symbol: SymbolId) -> Option<Diagnostic> {
        if !table.symbol(symbol).is_abstract() {
            return None;
        }
        let super_symbol = super_of(table, symbol)?;
        self.diagnose_pair(
            table,
            OverridePair {
                message: &wrt(table, symbol),
                super_symbol,
                this_symbol: symbol,
            },
        )
    }

    pub fn diagnose_pair(&self, table: &SymbolTable, pair: OverridePair<'_>) -> Option<Diagnostic> {
        let this = table.symbol(pair.this_symbol);
        if !this.is_abstract() || table.symbol(pair.super_symbol).is_abstract() {
            return None;
        }
        Some(Diagnostic::new(
            this.span,
            format!("{} pointless abstract extending a concrete one:", pair.message),
            Classification::CannotBeAbstract,
        ))
    }
}

impl Check<SymbolId> for NotAbstractOverConcrete {
    fn check(&self, table: &SymbolTable, symbol: SymbolId, errors: &mut ErrorListener) -> bool {
        report(errors, self.diagnose(table, symbol))
    }
}

/// The function or method `symbol` extends or overrides, if any.
fn super_of(table: &SymbolTable, symbol: SymbolId) -> Option<SymbolId> {
    match &table.symbol(symbol).kind {
        SymbolKind::Function(info) => info.super_function,
        SymbolKind::Method(info) => {
            let search = MethodSearch::from_method(table, symbol)?;
            let resolver = MethodResolver::exact();
            table
                .direct_supers(info.owner)
                .into_iter()
                .find_map(|sup| resolver.resolve(table, sup, &search).found())
        }
        _ => None,
    }
}

/// One abstract method in an aggregate's hierarchy and the concrete method
/// implementing it, if there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbstractMatch {
    pub abstract_method: SymbolId,
    pub implementation: Option<SymbolId>,
}

/// Matches every abstract method in an aggregate's hierarchy against the
/// aggregate's complete method set.
///
/// [`AbstractMethodsImplemented::traverse`] hands each match to a caller
/// action that decides what an unmatched method means; as a [`Check`] it
/// reports every unmatched one as `NOT_OVERRIDDEN`.
#[derive(Debug, Clone, Copy)]
pub struct AbstractMethodsImplemented {
    resolver: MethodResolver,
}

impl Default for AbstractMethodsImplemented {
    fn default() -> Self {
        Self {
            resolver: MethodResolver::compatible(),
        }
    }
}

impl AbstractMethodsImplemented {
    pub fn new(resolver: MethodResolver) -> Self {
        Self { resolver }
    }

    pub fn traverse(
        &self,
        table: &SymbolTable,
        aggregate: SymbolId,
        mut action: impl FnMut(AbstractMatch),
    ) {
        for abstract_method in table.all_abstract_methods(aggregate) {
            // Untyped parameters were reported when they failed to resolve.
            let Some(search) = MethodSearch::from_method(table, abstract_method) else {
                continue;
            };
            let implementation = match self.resolver.resolve(table, aggregate, &search) {
                Resolution::Found(found) if !table.symbol(found).is_abstract() => Some(found),
                _ => None,
            };
            action(AbstractMatch {
                abstract_method,
                implementation,
            });
        }
    }
}

impl Check<SymbolId> for AbstractMethodsImplemented {
    fn check(&self, table: &SymbolTable, aggregate: SymbolId, errors: &mut ErrorListener) -> bool {
        let mut ok = true;
        let span = table.symbol(aggregate).span;
        self.traverse(table, aggregate, |found| {
            if found.implementation.is_none() {
                ok = false;
                errors.semantic_error(
                    span,
                    format!(
                        "'{}' {} not overridden:",
                        table.signature_display(found.abstract_method),
                        table.symbol(found.abstract_method).span
                    ),
                    Classification::NotOverridden,
                );
            }
        });
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn abstract_function_over_concrete_is_pointless() {
        let mut fx = Fixture::new();
        let integer = fx.b().integer;
        let concrete = fx.function("base", &[integer], Some(integer));
        let derived = fx.function("derived", &[integer], Some(integer));
        fx.table.set_super_function(derived, concrete).expect("function");
        fx.table.symbol_mut(derived).flags.abstract_ = true;

        let found = NotAbstractOverConcrete.diagnose(&fx.table, derived);
        assert!(matches!(
            found.map(|d| d.classification()),
            Some(Classification::CannotBeAbstract)
        ));

        fx.table.symbol_mut(concrete).flags.abstract_ = true;
        assert!(NotAbstractOverConcrete.diagnose(&fx.table, derived).is_none());
    }

    #[test]
    fn abstract_method_over_concrete_method_is_found_through_supers() {
        let mut fx = Fixture::new();
        let string = fx.b().string;
        let base = fx.class("Base");
        let derived = fx.class("Derived");
        fx.table.set_super(derived, base).expect("aggregate");
        fx.method(base, "name", &[], Some(string));
        let redeclared = fx.method(derived, "name", &[], Some(string));
        fx.table.symbol_mut(redeclared).flags.abstract_ = true;

        assert!(!NotAbstractOverConcrete.check(&fx.table, redeclared, &mut fx.errors));
        assert_eq!(fx.errors.count(Classification::CannotBeAbstract), 1);
    }

    #[test]
    fn traverse_pairs_each_abstract_method_with_its_implementation() {
        let mut fx = Fixture::new();
        let integer = fx.b().integer;
        let shape = fx.trait_("Shape");
        let area = fx.method(shape, "area", &[], Some(integer));
        let sides = fx.method(shape, "sides", &[], Some(integer));
        for m in [area, sides] {
            fx.table.symbol_mut(m).flags.abstract_ = true;
        }
        let square = fx.class("Square");
        fx.table.add_trait(square, shape).expect("aggregate");
        let square_area = fx.method(square, "area", &[], Some(integer));

        let mut seen = Vec::new();
        AbstractMethodsImplemented::default().traverse(&fx.table, square, |m| seen.push(m));
        assert_eq!(
            seen,
            vec![
                AbstractMatch {
                    abstract_method: area,
                    implementation: Some(square_area),
                },
                AbstractMatch {
                    abstract_method: sides,
                    implementation: None,
                },
            ]
        );
    }
}
