// testing.rs
//
// Fixture builders shared by unit tests.

use tarn_identity::{ScopeId, Span, SymbolId};

use crate::diagnostics::ErrorListener;
use crate::errors::Classification;
use crate::symbols::{Builtins, Genus, SymbolTable};

pub(crate) struct Fixture {
    pub table: SymbolTable,
    pub errors: ErrorListener,
    next_line: u32,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            errors: ErrorListener::new(),
            next_line: 1,
        }
    }

    pub fn b(&self) -> Builtins {
        *self.table.builtins()
    }

    pub fn global(&self) -> ScopeId {
        self.table.global_scope()
    }

    /// A fresh line per symbol so diagnostics are distinguishable by span.
    fn span(&mut self) -> Span {
        let span = Span::at_line(self.next_line);
        self.next_line += 1;
        span
    }

    pub fn class(&mut self, name: &str) -> SymbolId {
        let span = self.span();
        self.table
            .define_aggregate(self.table.global_scope(), name, Genus::Class, span)
    }

    pub fn trait_(&mut self, name: &str) -> SymbolId {
        let span = self.span();
        self.table
            .define_aggregate(self.table.global_scope(), name, Genus::Trait, span)
    }

    pub fn method(
        &mut self,
        owner: SymbolId,
        name: &str,
        params: &[SymbolId],
        returns: Option<SymbolId>,
    ) -> SymbolId {
        let span = self.span();
        let method = self
            .table
            .define_method(owner, name, span)
            .expect("owner is an aggregate");
        self.signature(method, params, returns);
        method
    }

    pub fn operator(
        &mut self,
        owner: SymbolId,
        op: &str,
        params: &[SymbolId],
        returns: Option<SymbolId>,
    ) -> SymbolId {
        let method = self.method(owner, op, params, returns);
        self.table.symbol_mut(method).flags.operator = true;
        method
    }

    pub fn constructor(&mut self, owner: SymbolId, params: &[SymbolId]) -> SymbolId {
        let name = self.table.name_of(owner).to_string();
        let method = self.method(owner, &name, params, None);
        self.table.symbol_mut(method).flags.constructor = true;
        method
    }

    pub fn function(
        &mut self,
        name: &str,
        params: &[SymbolId],
        returns: Option<SymbolId>,
    ) -> SymbolId {
        let span = self.span();
        let function = self
            .table
            .define_function(self.table.global_scope(), name, span);
        self.signature(function, params, returns);
        function
    }

    fn signature(&mut self, callable: SymbolId, params: &[SymbolId], returns: Option<SymbolId>) {
        let span = self.table.symbol(callable).span;
        for (i, &ty) in params.iter().enumerate() {
            self.table
                .add_parameter(callable, &format!("p{i}"), Some(ty), span)
                .expect("callable");
        }
        if let Some(ty) = returns {
            self.table
                .set_returning(callable, "rtn", Some(ty), span)
                .expect("callable");
        }
    }

    /// `List of T` with `add(T)`, `get(Integer) <- T` and `copy() <- List of T`.
    pub fn generic_list(&mut self) -> (SymbolId, SymbolId) {
        let list = self.class("List");
        let t = self
            .table
            .add_type_parameter(list, "T")
            .expect("aggregate");
        let integer = self.b().integer;
        self.method(list, "add", &[t], None);
        self.method(list, "get", &[integer], Some(t));
        self.method(list, "copy", &[], Some(list));
        (list, t)
    }

    pub fn classifications(&self) -> Vec<Classification> {
        self.errors
            .errors()
            .iter()
            .map(|d| d.classification())
            .collect()
    }
}
