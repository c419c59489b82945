//! Arena-backed symbol table.
//!
//! Split by concern:
//! - `define` - registration of aggregates, callables, variables and controls
//! - `hierarchy` - type relationships, assignability and method set queries
//!
//! Earlier phases populate the table; the full-resolution pass only reads it,
//! except for setting types once and registering parameterised instances.

mod define;
mod hierarchy;

#[cfg(test)]
mod tests;

use rustc_hash::{FxHashMap, FxHashSet};
use tarn_identity::{Name, NamePool, NodeId, ScopeId, Span, SymbolId};

use super::{
    AggregateInfo, Builtins, Genus, ParameterizedKey, Scope, ScopeKind, SearchFilter, Symbol,
    SymbolFlags, SymbolKind, Synthesized,
};
use crate::generic::InstanceCache;

/// Parameterised instances, indexed by the defining scope of their base.
pub type InstanceIndex = InstanceCache<(ScopeId, ParameterizedKey), SymbolId>;

#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: NamePool,
    // Storage - ids are indices into these vectors
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) scopes: Vec<Scope>,
    recorded: FxHashMap<NodeId, SymbolId>,
    coercions: FxHashSet<(SymbolId, SymbolId)>,
    builtins: Builtins,
    global: ScopeId,
    pub(crate) instances: InstanceIndex,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table with a global module scope and the built-in types.
    pub fn new() -> Self {
        let global = ScopeId::new(0);
        let placeholder = SymbolId::new(0);
        let mut table = Self {
            names: NamePool::new(),
            symbols: Vec::new(),
            scopes: vec![Scope::new(global, ScopeKind::Module, None)],
            recorded: FxHashMap::default(),
            coercions: FxHashSet::default(),
            builtins: Builtins {
                boolean: placeholder,
                integer: placeholder,
                float: placeholder,
                string: placeholder,
                void: placeholder,
                exception: placeholder,
            },
            global,
            instances: InstanceCache::new(),
        };
        table.register_builtins();
        table
    }

    fn register_builtins(&mut self) {
        let span = Span::default();
        let [boolean, integer, float, string, void, exception] = Builtins::NAMES.map(|name| {
            let genus = if name == "Exception" {
                Genus::Class
            } else {
                Genus::Type
            };
            self.define_aggregate(self.global, name, genus, span)
        });
        self.builtins = Builtins {
            boolean,
            integer,
            float,
            string,
            void,
            exception,
        };
        self.add_coercion(integer, float);

        for ty in [boolean, integer, float, string] {
            for op in ["==", "<>"] {
                self.builtin_operator(ty, op, Some(ty), boolean);
            }
            self.builtin_operator(ty, "?", None, boolean);
            self.builtin_operator(ty, "$", None, string);
        }
        for ty in [integer, float, string] {
            self.builtin_operator(ty, "<=>", Some(ty), integer);
            self.builtin_operator(ty, "<", Some(ty), boolean);
            self.builtin_operator(ty, "+", Some(ty), ty);
        }
        for ty in [integer, float] {
            self.builtin_operator(ty, "-", Some(ty), ty);
            self.builtin_operator(ty, "*", Some(ty), ty);
            self.builtin_operator(ty, "++", None, ty);
            self.builtin_operator(ty, "--", None, ty);
            self.builtin_operator(ty, "abs", None, ty);
        }
        self.builtin_operator(boolean, "~", None, boolean);
        self.builtin_operator(boolean, "and", Some(boolean), boolean);
        self.builtin_operator(boolean, "or", Some(boolean), boolean);
        self.builtin_operator(string, "contains", Some(string), boolean);
        self.builtin_operator(string, "length", None, integer);
        self.builtin_operator(exception, "$", None, string);
    }

    /// Built-in operators are pure with fully initialised results.
    fn builtin_operator(
        &mut self,
        owner: SymbolId,
        op: &str,
        arg: Option<SymbolId>,
        returns: SymbolId,
    ) {
        let span = Span::default();
        let Ok(method) = self.define_method(owner, op, span) else {
            return;
        };
        let flags = &mut self.symbol_mut(method).flags;
        flags.operator = true;
        flags.pure = true;
        if let Some(arg) = arg {
            let _ = self.add_parameter(method, "arg", Some(arg), span);
        }
        if let Ok(rtn) = self.set_returning(method, "rtn", Some(returns), span) {
            self.symbol_mut(rtn).flags.initialised = true;
        }
    }

    // ===== Names =====

    pub fn intern(&mut self, s: &str) -> Name {
        self.names.insert(s)
    }

    pub fn lookup_name(&self, s: &str) -> Option<Name> {
        self.names.find(s)
    }

    pub fn resolve_name(&self, name: Name) -> &str {
        self.names.text(name)
    }

    /// Declared (internal) name of a symbol.
    pub fn name_of(&self, id: SymbolId) -> &str {
        self.names.text(self.symbol(id).name)
    }

    // ===== Arena access =====

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index() as usize]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index() as usize]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index() as usize]
    }

    pub fn global_scope(&self) -> ScopeId {
        self.global
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn aggregate(&self, id: SymbolId) -> Option<&AggregateInfo> {
        self.symbol(id).aggregate()
    }

    pub(crate) fn push_symbol(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
        span: Span,
    ) -> SymbolId {
        let name = self.intern(name);
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name,
            kind,
            defined_in: scope,
            type_of: None,
            span,
            flags: SymbolFlags::default(),
            synthesized: Synthesized::default(),
        });
        self.scopes[scope.index() as usize].define(name, id);
        id
    }

    // ===== Types =====

    /// Set the resolved type of a symbol.
    ///
    /// Types are write-once: re-setting the same type is a no-op, a different type
    /// is refused and `false` returned.
    pub fn set_type(&mut self, id: SymbolId, ty: SymbolId) -> bool {
        let symbol = self.symbol_mut(id);
        match symbol.type_of {
            None => {
                symbol.type_of = Some(ty);
                true
            }
            Some(existing) if existing == ty => true,
            Some(existing) => {
                tracing::warn!(
                    symbol = id.index(),
                    existing = existing.index(),
                    refused = ty.index(),
                    "refusing to retract a resolved type"
                );
                false
            }
        }
    }

    pub fn type_of(&self, id: SymbolId) -> Option<SymbolId> {
        self.symbol(id).type_of
    }

    pub fn add_coercion(&mut self, from: SymbolId, to: SymbolId) {
        self.coercions.insert((from, to));
    }

    pub fn has_coercion(&self, from: SymbolId, to: SymbolId) -> bool {
        self.coercions.contains(&(from, to))
    }

    // ===== Recorded symbols =====

    /// Attach a symbol to a parse tree node.
    pub fn record(&mut self, node: NodeId, symbol: SymbolId) {
        self.recorded.insert(node, symbol);
    }

    pub fn recorded(&self, node: NodeId) -> Option<SymbolId> {
        self.recorded.get(&node).copied()
    }

    // ===== Scopes =====

    pub fn push_scope(
        &mut self,
        kind: ScopeKind,
        parent: ScopeId,
    ) -> Result<ScopeId, crate::errors::TableError> {
        if parent.index() as usize >= self.scopes.len() {
            return Err(crate::errors::TableError::UnknownScope(parent.index()));
        }
        Ok(self.new_scope(kind, parent))
    }

    pub(crate) fn new_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId::new(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, kind, Some(parent)));
        id
    }

    pub fn set_scope_pure(&mut self, scope: ScopeId, pure: bool) {
        self.scopes[scope.index() as usize].pure = pure;
    }

    /// Walk from `scope` out to the global scope.
    pub fn scope_chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |&id| self.scope(id).parent)
    }

    pub fn nearest_non_block(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope_chain(scope)
            .find(|&id| !self.scope(id).kind.is_block())
    }

    pub fn nearest_dynamic_block(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope_chain(scope)
            .find(|&id| matches!(self.scope(id).kind, ScopeKind::Block { dynamic: true }))
    }

    /// Purity of the processing context enclosing `scope`.
    pub fn is_scope_pure(&self, scope: ScopeId) -> bool {
        self.nearest_non_block(scope)
            .is_some_and(|id| self.scope(id).pure)
    }

    // ===== Resolution =====

    /// Resolve a name walking outwards from `scope`; the first overload wins.
    pub fn resolve(&self, scope: ScopeId, name: &str, filter: SearchFilter) -> Option<SymbolId> {
        let name = self.names.find(name)?;
        self.scope_chain(scope).find_map(|id| {
            self.scope(id)
                .lookup_local(name)
                .iter()
                .copied()
                .find(|&candidate| self.passes(candidate, filter))
        })
    }

    pub fn resolve_global(&self, name: &str, filter: SearchFilter) -> Option<SymbolId> {
        let name = self.names.find(name)?;
        self.scope(self.global)
            .lookup_local(name)
            .iter()
            .copied()
            .find(|&candidate| self.passes(candidate, filter))
    }

    fn passes(&self, candidate: SymbolId, filter: SearchFilter) -> bool {
        match filter {
            SearchFilter::Any => true,
            SearchFilter::Type => self.symbol(candidate).is_type(),
        }
    }

    // ===== Parameterised instances =====

    /// Find the instance for `key`.
    ///
    /// Instances live in the scope that defines their base, so the answer does
    /// not depend on where the request comes from.
    pub fn lookup_instance(&self, key: &ParameterizedKey) -> Option<SymbolId> {
        let home = self.symbol(key.base).defined_in;
        self.instances.get(&(home, key.clone())).copied()
    }

    /// Register `instance` for `key` unless one exists; returns the canonical
    /// instance either way.
    pub(crate) fn register_instance(
        &mut self,
        key: ParameterizedKey,
        instance: SymbolId,
    ) -> SymbolId {
        let home = self.symbol(key.base).defined_in;
        *self.instances.insert((home, key), instance)
    }

    pub fn instance_cache(&self) -> &InstanceIndex {
        &self.instances
    }
}
