// symbols/builtins.rs
//
// Well-known built-in types, reachable without a name lookup.

use tarn_identity::SymbolId;

/// Ids of the built-in types registered by `SymbolTable::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtins {
    pub boolean: SymbolId,
    pub integer: SymbolId,
    pub float: SymbolId,
    pub string: SymbolId,
    pub void: SymbolId,
    pub exception: SymbolId,
}

impl Builtins {
    pub const NAMES: [&'static str; 6] =
        ["Boolean", "Integer", "Float", "String", "Void", "Exception"];

    pub fn all(&self) -> [SymbolId; 6] {
        [
            self.boolean,
            self.integer,
            self.float,
            self.string,
            self.void,
            self.exception,
        ]
    }

    pub fn is_builtin(&self, id: SymbolId) -> bool {
        self.all().contains(&id)
    }
}
