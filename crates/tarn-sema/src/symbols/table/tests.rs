use tarn_identity::Span;

use super::hierarchy::{COERCION_COST, SUPER_STEP_COST};
use super::*;
use crate::errors::TableError;
use crate::symbols::{Construct, VariableRole};

fn class(table: &mut SymbolTable, name: &str) -> SymbolId {
    let global = table.global_scope();
    table.define_aggregate(global, name, Genus::Class, Span::default())
}

#[test]
fn builtins_are_registered_as_global_types() {
    let table = SymbolTable::new();
    let b = *table.builtins();
    for (name, id) in Builtins::NAMES.iter().zip(b.all()) {
        assert_eq!(table.resolve_global(name, SearchFilter::Type), Some(id));
        assert!(b.is_builtin(id));
    }
    assert!(table.has_coercion(b.integer, b.float));
    assert!(!table.has_coercion(b.float, b.integer));
    assert!(!table.methods_in_this_scope_only(b.integer).is_empty());
}

#[test]
fn types_are_write_once() {
    let mut table = SymbolTable::new();
    let b = *table.builtins();
    let global = table.global_scope();
    let x = table.define_variable(global, "x", VariableRole::Local, None, Span::default());

    assert!(table.set_type(x, b.integer));
    assert!(table.set_type(x, b.integer));
    assert!(!table.set_type(x, b.string));
    assert_eq!(table.type_of(x), Some(b.integer));
}

#[test]
fn resolution_walks_outwards_and_honours_the_filter() {
    let mut table = SymbolTable::new();
    let b = *table.builtins();
    let global = table.global_scope();
    let shape = class(&mut table, "Shape");
    // A variable shadowing the type name in an inner block.
    let block = table
        .push_scope(ScopeKind::Block { dynamic: false }, global)
        .expect("global exists");
    let local = table.define_variable(
        block,
        "Shape",
        VariableRole::Local,
        Some(b.string),
        Span::default(),
    );

    assert_eq!(table.resolve(block, "Shape", SearchFilter::Any), Some(local));
    assert_eq!(table.resolve(block, "Shape", SearchFilter::Type), Some(shape));
    assert_eq!(table.resolve(global, "Shape", SearchFilter::Any), Some(shape));
    assert_eq!(table.resolve(block, "Missing", SearchFilter::Any), None);
}

#[test]
fn unknown_parent_scope_is_refused() {
    let mut table = SymbolTable::new();
    let result = table.push_scope(ScopeKind::Module, ScopeId::new(99));
    assert!(matches!(result, Err(TableError::UnknownScope(99))));
}

#[test]
fn purity_comes_from_the_nearest_non_block_scope() {
    let mut table = SymbolTable::new();
    let owner = class(&mut table, "Calc");
    let method = table
        .define_method(owner, "sum", Span::default())
        .expect("aggregate");
    let body = table.symbol(method).callable().expect("callable").scope;
    table.set_scope_pure(body, true);

    let outer = table
        .push_scope(ScopeKind::Block { dynamic: true }, body)
        .expect("body exists");
    let inner = table
        .push_scope(ScopeKind::Block { dynamic: false }, outer)
        .expect("outer exists");
    // Blocks inherit regardless of their own flag.
    table.set_scope_pure(inner, false);

    assert!(table.is_scope_pure(inner));
    assert_eq!(table.nearest_non_block(inner), Some(body));
    assert_eq!(table.nearest_dynamic_block(inner), Some(outer));
    assert_eq!(table.nearest_dynamic_block(body), None);
    assert!(!table.is_scope_pure(table.global_scope()));
}

#[test]
fn assignability_is_ranked() {
    let mut table = SymbolTable::new();
    let b = *table.builtins();
    let animal = class(&mut table, "Animal");
    let dog = class(&mut table, "Dog");
    let puppy = class(&mut table, "Puppy");
    table.set_super(dog, animal).expect("aggregate");
    table.set_super(puppy, dog).expect("aggregate");

    assert_eq!(table.assignable_cost(dog, dog), Some(0.0));
    assert_eq!(table.assignable_cost(dog, animal), Some(SUPER_STEP_COST));
    assert_eq!(table.assignable_cost(puppy, animal), Some(2.0 * SUPER_STEP_COST));
    assert_eq!(table.assignable_cost(b.integer, b.float), Some(COERCION_COST));
    assert_eq!(table.assignable_cost(animal, dog), None);
    assert!(table.is_or_extends(puppy, animal));
    assert!(!table.is_or_extends(animal, puppy));
}

#[test]
fn cyclic_supers_do_not_loop() {
    let mut table = SymbolTable::new();
    let a = class(&mut table, "A");
    let b = class(&mut table, "B");
    table.set_super(a, b).expect("aggregate");
    table.set_super(b, a).expect("aggregate");

    assert_eq!(table.supers_of(a), vec![b]);
}

#[test]
fn abstract_methods_are_collected_once_per_signature() {
    let mut table = SymbolTable::new();
    let b = *table.builtins();
    let global = table.global_scope();
    let shape = table.define_aggregate(global, "Shape", Genus::Trait, Span::default());
    let solid = table.define_aggregate(global, "Solid", Genus::Trait, Span::default());
    table.add_trait(solid, shape).expect("aggregate");

    let abstract_method = |table: &mut SymbolTable, owner: SymbolId, name: &str| {
        let method = table
            .define_method(owner, name, Span::default())
            .expect("aggregate");
        table
            .set_returning(method, "rtn", Some(b.float), Span::default())
            .expect("callable");
        table.symbol_mut(method).flags.abstract_ = true;
        method
    };
    abstract_method(&mut table, shape, "area");
    let redeclared = abstract_method(&mut table, solid, "area");
    let volume = abstract_method(&mut table, solid, "volume");

    assert_eq!(table.all_abstract_methods(solid), vec![redeclared, volume]);
    assert_eq!(table.abstract_methods_in_this_scope_only(shape).len(), 1);
}

#[test]
fn controls_are_named_by_keyword_and_carry_a_returning_binding() {
    let mut table = SymbolTable::new();
    let b = *table.builtins();
    let global = table.global_scope();
    let control = table.define_control(global, Construct::Switch, Span::default());
    let rtn = table.define_variable(
        global,
        "rtn",
        VariableRole::Returning,
        Some(b.string),
        Span::default(),
    );

    table.set_control_returning(control, rtn).expect("control");
    assert_eq!(table.name_of(control), "switch");
    let returning = table.symbol(control).control().and_then(|c| c.returning);
    assert_eq!(returning, Some(rtn));
    assert!(matches!(
        table.set_control_returning(rtn, rtn),
        Err(TableError::NotAControl(_))
    ));
}

#[test]
fn type_parameters_need_a_generic_home() {
    let mut table = SymbolTable::new();
    let global = table.global_scope();
    let x = table.define_variable(global, "x", VariableRole::Local, None, Span::default());
    assert!(matches!(
        table.add_type_parameter(x, "T"),
        Err(TableError::CannotBeGeneric(_))
    ));
}

#[test]
fn recorded_symbols_are_found_by_node() {
    let mut table = SymbolTable::new();
    let b = *table.builtins();
    table.record(NodeId::new(7), b.string);
    assert_eq!(table.recorded(NodeId::new(7)), Some(b.string));
    assert_eq!(table.recorded(NodeId::new(8)), None);
}
