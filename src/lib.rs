// src/lib.rs
//
// Facade over the tarn semantic crates.

pub mod logging;

pub use tarn_identity as identity;
pub use tarn_sema as sema;

pub use tarn_identity::{Name, NodeId, ScopeId, Span, SymbolId};
pub use tarn_sema::{
    CheckConfig, Classification, Diagnostic, ResolutionPass, SemanticError, SymbolTable,
};
