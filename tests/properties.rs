// tests/properties.rs
//
// Behavioural guarantees of the checker, exercised through the public API.

mod common;

use common::Program;
use tarn::sema::rules::{
    AbstractMatch, AbstractMethodsImplemented, BooleanGuardOrError, CallSite, OverridePair,
    PureCallInPureScope, PureModifierOrError,
};
use tarn::sema::{
    Check, Classification, ErrorListener, MethodResolver, MethodSearch, ParameterizedKey,
    ParameterizedTypeResolver, Resolution, VariableRole, canonical_operator,
};
use tarn::{Span, SymbolId};

#[test]
fn purity_must_match_in_both_directions() {
    let mut program = Program::new();
    let base = program.class("Base");
    let pure_super = program.method(base, "a", &[], None);
    let impure_super = program.method(base, "b", &[], None);
    program.mark_pure(pure_super);
    let derived = program.class("Derived");
    let pure_this = program.method(derived, "a", &[], None);
    let impure_this = program.method(derived, "b", &[], None);
    program.mark_pure(pure_this);

    let cases = [
        (pure_super, impure_this, Some(Classification::SuperIsPure)),
        (impure_super, pure_this, Some(Classification::SuperIsNotPure)),
        (pure_super, pure_this, None),
        (impure_super, impure_this, None),
    ];
    for (super_symbol, this_symbol, expected) in cases {
        let pair = OverridePair {
            message: "wrt override:",
            super_symbol,
            this_symbol,
        };
        let found = PureModifierOrError.diagnose(&program.table, pair);
        assert_eq!(found.map(|d| d.classification()), expected);
    }
}

#[test]
fn impure_call_is_reported_only_from_a_pure_scope() {
    let mut program = Program::new();
    let service = program.class("Service");
    let fetch = program.method(service, "fetch", &[], None);
    let pure_caller = program.method(service, "total", &[], None);
    let impure_caller = program.method(service, "refresh", &[], None);
    let pure_scope = program.body_of(pure_caller, true);
    let impure_scope = program.body_of(impure_caller, false);

    let mut errors = ErrorListener::new();
    let site = |scope| CallSite {
        span: Span::at_line(40),
        symbol: fetch,
        scope,
    };
    assert!(!PureCallInPureScope.check(&program.table, site(pure_scope), &mut errors));
    assert!(PureCallInPureScope.check(&program.table, site(impure_scope), &mut errors));
    assert_eq!(errors.count(Classification::NonePureCallInPureScope), 1);
    assert_eq!(errors.len(), 1);
}

#[test]
fn canonical_operator_names_are_stable() {
    assert_eq!(canonical_operator(Some("not")), Some("~"));
    assert_eq!(canonical_operator(Some("!=")), Some("<>"));
    for token in ["<=>", "+", "++", "$", "?", "and", "contains"] {
        assert_eq!(canonical_operator(Some(token)), Some(token));
        let once = canonical_operator(Some(token));
        assert_eq!(canonical_operator(once), once);
    }
    assert_eq!(canonical_operator(None), None);
}

#[test]
fn parameterised_types_are_canonical_by_identity() {
    let mut program = Program::new();
    let b = program.builtins();
    let list = program.class("List");
    program
        .table
        .add_type_parameter(list, "T")
        .expect("aggregate");

    let mut errors = ErrorListener::new();
    let mut resolve = |program: &mut Program, arg: SymbolId| {
        ParameterizedTypeResolver::resolve_or_define().resolve(
            &mut program.table,
            &mut errors,
            Span::at_line(50),
            ParameterizedKey::new(list, &[arg]),
        )
    };
    let ints = resolve(&mut program, b.integer);
    let ints_again = resolve(&mut program, b.integer);
    let strings = resolve(&mut program, b.string);

    assert!(ints.is_some());
    assert_eq!(ints, ints_again);
    assert_ne!(ints, strings);
    assert!(errors.is_empty());
}

#[test]
fn overload_resolution_demands_a_single_best_candidate() {
    let mut program = Program::new();
    let b = program.builtins();
    let left = program.trait_("Left");
    let right = program.trait_("Right");
    let both = program.class("Both");
    program.table.add_trait(both, left).expect("aggregate");
    program.table.add_trait(both, right).expect("aggregate");

    let vector = program.class("Vector");
    let scale = program.operator(vector, "*", &[b.float], Some(vector));
    program.operator(vector, "+", &[left], Some(vector));
    program.operator(vector, "+", &[right], Some(vector));

    let resolver = MethodResolver::compatible();
    let absent = MethodSearch::operator(Some("<=>")).expect("token");
    let single = MethodSearch::operator(Some("*"))
        .expect("token")
        .with_param(b.integer);
    let ambiguous = MethodSearch::operator(Some("+"))
        .expect("token")
        .with_param(both);

    assert_eq!(resolver.resolve(&program.table, vector, &absent), Resolution::Absent);
    assert_eq!(
        resolver.resolve(&program.table, vector, &single),
        Resolution::Found(scale)
    );
    assert!(matches!(
        resolver.resolve(&program.table, vector, &ambiguous),
        Resolution::Ambiguous(candidates) if candidates.len() == 2
    ));
}

#[test]
fn completeness_reports_exactly_the_missing_method() {
    let mut program = Program::new();
    let b = program.builtins();
    let shape = program.trait_("Shape");
    program.abstract_method(shape, "area", &[], Some(b.float));
    let name = program.abstract_method(shape, "name", &[], Some(b.string));

    let complete = program.class("Square");
    program.table.add_trait(complete, shape).expect("aggregate");
    program.method(complete, "area", &[], Some(b.float));
    program.method(complete, "name", &[], Some(b.string));

    let partial = program.class("Circle");
    program.table.add_trait(partial, shape).expect("aggregate");
    program.method(partial, "area", &[], Some(b.float));

    let rule = AbstractMethodsImplemented::default();
    let mut errors = ErrorListener::new();
    assert!(rule.check(&program.table, complete, &mut errors));
    assert!(errors.is_empty());

    assert!(!rule.check(&program.table, partial, &mut errors));
    assert_eq!(errors.count(Classification::NotOverridden), 1);

    let mut unmatched = Vec::new();
    rule.traverse(&program.table, partial, |found: AbstractMatch| {
        if found.implementation.is_none() {
            unmatched.push(found.abstract_method);
        }
    });
    assert_eq!(unmatched, vec![name]);
}

#[test]
fn boolean_guard_depends_only_on_the_resolved_type() {
    let mut program = Program::new();
    let b = program.builtins();
    let global = program.global();
    let span = program.next_span();
    let flag = program
        .table
        .define_variable(global, "ready", VariableRole::Local, Some(b.boolean), span);
    let count = program
        .table
        .define_variable(global, "count", VariableRole::Local, Some(b.integer), span);

    let mut errors = ErrorListener::new();
    let guards = [(span, Some(count)), (span, Some(flag)), (span, Some(count))];
    for guard in guards.iter().rev().chain(guards.iter()) {
        BooleanGuardOrError.check(&program.table, *guard, &mut errors);
    }
    assert_eq!(errors.count(Classification::MustResultInABoolean), 4);
    assert_eq!(errors.len(), 4);
}
