//! First-class identity types for compiler entities.
//!
//! These types are indices into the arenas owned by the symbol table, which keeps
//! cross-references cheap to copy and prevents mixing up symbols, scopes and
//! syntax nodes.

/// Identity for a symbol (type, method, function, variable, control construct)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Identity for a lexical scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Opaque handle for a parse tree node.
///
/// The parse tree itself belongs to the frontend; later phases only ever see
/// this handle and the symbol recorded against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}
