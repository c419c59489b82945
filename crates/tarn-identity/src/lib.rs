// lib.rs
//
// Shared identities for the tarn compiler crates.
// Defines Name, Span, and the NamePool as foundational primitives, plus the
// arena ids used by the symbol table.

mod entities;
mod intern;
mod span;

pub use entities::{NodeId, ScopeId, SymbolId};
pub use intern::NamePool;
pub use span::Span;

/// Handle to an interned string (symbol or type name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    /// Create a Name from a raw index. Only the name pool should use this.
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}
