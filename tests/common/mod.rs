// tests/common/mod.rs
//
// Builders for populating a symbol table the way the definition phases would.

#![allow(dead_code)]

use tarn::sema::{Builtins, Genus, SymbolTable};
use tarn::{ScopeId, Span, SymbolId};

pub struct Program {
    pub table: SymbolTable,
    line: u32,
}

impl Program {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            line: 1,
        }
    }

    pub fn builtins(&self) -> Builtins {
        *self.table.builtins()
    }

    pub fn global(&self) -> ScopeId {
        self.table.global_scope()
    }

    pub fn next_span(&mut self) -> Span {
        let span = Span::at_line(self.line);
        self.line += 1;
        span
    }

    pub fn aggregate(&mut self, name: &str, genus: Genus) -> SymbolId {
        let span = self.next_span();
        let global = self.global();
        self.table.define_aggregate(global, name, genus, span)
    }

    pub fn class(&mut self, name: &str) -> SymbolId {
        self.aggregate(name, Genus::Class)
    }

    pub fn trait_(&mut self, name: &str) -> SymbolId {
        self.aggregate(name, Genus::Trait)
    }

    /// A method whose returning binding, if any, is initialised by its body.
    pub fn method(
        &mut self,
        owner: SymbolId,
        name: &str,
        params: &[SymbolId],
        returns: Option<SymbolId>,
    ) -> SymbolId {
        let span = self.next_span();
        let method = self
            .table
            .define_method(owner, name, span)
            .expect("owner is an aggregate");
        for (i, &ty) in params.iter().enumerate() {
            self.table
                .add_parameter(method, &format!("arg{i}"), Some(ty), span)
                .expect("method is callable");
        }
        if let Some(ty) = returns {
            let rtn = self
                .table
                .set_returning(method, "rtn", Some(ty), span)
                .expect("method is callable");
            self.table.symbol_mut(rtn).flags.initialised = true;
        }
        method
    }

    pub fn abstract_method(
        &mut self,
        owner: SymbolId,
        name: &str,
        params: &[SymbolId],
        returns: Option<SymbolId>,
    ) -> SymbolId {
        let method = self.method(owner, name, params, returns);
        self.table.symbol_mut(method).flags.abstract_ = true;
        method
    }

    pub fn operator(
        &mut self,
        owner: SymbolId,
        token: &str,
        params: &[SymbolId],
        returns: Option<SymbolId>,
    ) -> SymbolId {
        let method = self.method(owner, token, params, returns);
        self.table.symbol_mut(method).flags.operator = true;
        method
    }

    pub fn mark_pure(&mut self, symbol: SymbolId) {
        self.table.symbol_mut(symbol).flags.pure = true;
    }

    /// The body scope of a callable, marked pure or not.
    pub fn body_of(&mut self, callable: SymbolId, pure: bool) -> ScopeId {
        let scope = self
            .table
            .symbol(callable)
            .callable()
            .expect("callable")
            .scope;
        self.table.set_scope_pure(scope, pure);
        scope
    }
}
