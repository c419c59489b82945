//! Tarn full-resolution semantics: purity and mutability, overload resolution,
//! generic parameterisation, completeness and control-construct shape.

// Public modules
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod generic;
pub mod operators;
pub mod pass;
pub mod rules;
pub mod search;
pub mod symbols;

// Internal modules
pub(crate) mod type_display;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports: public API surface
pub use config::{CheckConfig, ReturningPolicy};
pub use diagnostics::{Diagnostic, ErrorListener};
pub use errors::{Classification, SemanticError, TableError};
pub use generic::{InstanceCache, ParameterizedKey, ParameterizedTypeResolver, TypeExpr};
pub use operators::{OperatorArgs, OperatorDetails, canonical_operator, operator_details};
pub use pass::ResolutionPass;
pub use rules::Check;
pub use search::{MatchMode, MethodResolver, MethodSearch, Resolution};
pub use symbols::{
    Builtins, Construct, Genus, Scope, ScopeKind, SearchFilter, Symbol, SymbolKind, SymbolTable,
    VariableRole,
};
