// symbols/scope.rs

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tarn_identity::{Name, ScopeId, SymbolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Aggregate(SymbolId),
    Function(SymbolId),
    /// A nested block; `dynamic` blocks capture their environment (closures)
    Block { dynamic: bool },
}

impl ScopeKind {
    pub fn is_block(self) -> bool {
        matches!(self, ScopeKind::Block { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Only meaningful on non-block scopes; blocks inherit from the nearest one
    pub pure: bool,
    // Overloads share a name, so a name maps to every symbol declared with it.
    symbols: FxHashMap<Name, SmallVec<[SymbolId; 1]>>,
    ordered: Vec<SymbolId>,
}

impl Scope {
    pub(crate) fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            kind,
            parent,
            pure: false,
            symbols: FxHashMap::default(),
            ordered: Vec::new(),
        }
    }

    pub(crate) fn define(&mut self, name: Name, symbol: SymbolId) {
        self.symbols.entry(name).or_default().push(symbol);
        self.ordered.push(symbol);
    }

    /// Symbols declared directly in this scope under `name`.
    pub fn lookup_local(&self, name: Name) -> &[SymbolId] {
        self.symbols.get(&name).map_or(&[], |ids| ids.as_slice())
    }

    /// Every symbol declared directly in this scope, in declaration order.
    pub fn symbols(&self) -> &[SymbolId] {
        &self.ordered
    }
}
