//! Symbol & scope model the full-resolution pass runs against.
//!
//! Everything lives in arenas owned by [`SymbolTable`]; cross references are
//! ids, never references. This module is split into:
//! - `scope` - lexical scopes and their lookups
//! - `builtins` - well-known built-in types
//! - `table` - the arena itself, registration, resolution and hierarchy queries

mod builtins;
mod scope;
mod table;

pub use builtins::Builtins;
pub use scope::{Scope, ScopeKind};
pub use table::SymbolTable;

use smallvec::SmallVec;
use tarn_identity::{Name, ScopeId, Span, SymbolId};

/// Type argument lists are almost always one or two long.
pub type TypeArgs = SmallVec<[SymbolId; 2]>;

/// Kind of aggregate or callable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genus {
    Class,
    Trait,
    Enumeration,
    Record,
    Component,
    Function,
    FunctionTrait,
    /// Built-in value types
    Type,
}

/// Which constructs may carry a returning parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    If,
    Switch,
    While,
    DoWhile,
    For,
    Try,
}

impl Construct {
    pub fn keyword(self) -> &'static str {
        match self {
            Construct::If => "if",
            Construct::Switch => "switch",
            Construct::While => "while",
            Construct::DoWhile => "do",
            Construct::For => "for",
            Construct::Try => "try",
        }
    }
}

/// Role a variable symbol plays in its enclosing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableRole {
    Local,
    Parameter,
    Returning,
    Property,
    Constant,
    LoopVariable,
}

/// Structural key of a parameterised instance: the generic base and its
/// ordered type arguments, both by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterizedKey {
    pub base: SymbolId,
    pub args: TypeArgs,
}

impl ParameterizedKey {
    pub fn new(base: SymbolId, args: &[SymbolId]) -> Self {
        Self {
            base,
            args: SmallVec::from_slice(args),
        }
    }
}

/// Filter for name resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    /// Only symbols usable as types: aggregates, functions, type parameters
    Type,
    Any,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolFlags {
    pub pure: bool,
    pub mutable: bool,
    pub initialised: bool,
    pub referenced: bool,
    pub abstract_: bool,
    pub override_: bool,
    pub constructor: bool,
    pub operator: bool,
}

/// Facts the compiler attaches to symbols it synthesised or transformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synthesized {
    /// Operator generated by `default operator` rather than written out
    pub defaulted_operator: bool,
    /// Compiler-introduced binding (e.g. a defaulted returning parameter)
    pub synthetic: bool,
    /// Set on instances materialised from a generic base
    pub parameterized_from: Option<ParameterizedKey>,
}

#[derive(Debug, Clone)]
pub struct AggregateInfo {
    pub genus: Genus,
    /// Scope holding the aggregate's members
    pub scope: ScopeId,
    pub super_type: Option<SymbolId>,
    pub traits: SmallVec<[SymbolId; 2]>,
    /// Declared methods in declaration order
    pub methods: Vec<SymbolId>,
    pub properties: Vec<SymbolId>,
    pub type_params: TypeArgs,
}

/// Callable shape shared by methods and functions.
#[derive(Debug, Clone)]
pub struct CallableInfo {
    pub scope: ScopeId,
    pub params: SmallVec<[SymbolId; 4]>,
    /// Returning variable, if the callable declares one
    pub returning: Option<SymbolId>,
    pub type_params: TypeArgs,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub callable: CallableInfo,
    pub owner: SymbolId,
}

#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub callable: CallableInfo,
    pub genus: Genus,
    pub super_function: Option<SymbolId>,
}

#[derive(Debug, Clone, Copy)]
pub struct VariableInfo {
    pub role: VariableRole,
}

#[derive(Debug, Clone, Copy)]
pub struct ControlInfo {
    pub construct: Construct,
    pub returning: Option<SymbolId>,
}

#[derive(Debug, Clone)]
pub enum SymbolKind {
    Aggregate(AggregateInfo),
    Method(MethodInfo),
    Function(FunctionInfo),
    Variable(VariableInfo),
    Control(ControlInfo),
    TypeParameter,
}

impl SymbolKind {
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolKind::Aggregate(_) => "aggregate",
            SymbolKind::Method(_) => "method",
            SymbolKind::Function(_) => "function",
            SymbolKind::Variable(_) => "variable",
            SymbolKind::Control(_) => "control",
            SymbolKind::TypeParameter => "type parameter",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: Name,
    pub kind: SymbolKind,
    /// Scope the symbol was defined in
    pub defined_in: ScopeId,
    pub(crate) type_of: Option<SymbolId>,
    pub span: Span,
    pub flags: SymbolFlags,
    pub synthesized: Synthesized,
}

impl Symbol {
    pub fn type_of(&self) -> Option<SymbolId> {
        self.type_of
    }

    pub fn is_pure(&self) -> bool {
        self.flags.pure
    }

    pub fn is_mutable(&self) -> bool {
        self.flags.mutable
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.abstract_
    }

    pub fn is_constructor(&self) -> bool {
        self.flags.constructor
    }

    pub fn is_operator(&self) -> bool {
        self.flags.operator
    }

    /// Whether this operator was compiler-defaulted rather than declared.
    pub fn is_defaulted_operator(&self) -> bool {
        self.flags.operator && self.synthesized.defaulted_operator
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Aggregate(_) | SymbolKind::Function(_) | SymbolKind::TypeParameter
        )
    }

    pub fn aggregate(&self) -> Option<&AggregateInfo> {
        match &self.kind {
            SymbolKind::Aggregate(info) => Some(info),
            _ => None,
        }
    }

    /// Methods and functions share a callable shape.
    pub fn callable(&self) -> Option<&CallableInfo> {
        match &self.kind {
            SymbolKind::Method(info) => Some(&info.callable),
            SymbolKind::Function(info) => Some(&info.callable),
            _ => None,
        }
    }

    pub(crate) fn callable_mut(&mut self) -> Option<&mut CallableInfo> {
        match &mut self.kind {
            SymbolKind::Method(info) => Some(&mut info.callable),
            SymbolKind::Function(info) => Some(&mut info.callable),
            _ => None,
        }
    }

    pub fn control(&self) -> Option<&ControlInfo> {
        match &self.kind {
            SymbolKind::Control(info) => Some(info),
            _ => None,
        }
    }

    pub fn genus(&self) -> Option<Genus> {
        match &self.kind {
            SymbolKind::Aggregate(info) => Some(info.genus),
            SymbolKind::Function(info) => Some(info.genus),
            _ => None,
        }
    }

    /// Type parameters declared by a generic aggregate or function.
    pub fn type_params(&self) -> &[SymbolId] {
        match &self.kind {
            SymbolKind::Aggregate(info) => &info.type_params,
            SymbolKind::Function(info) => &info.callable.type_params,
            _ => &[],
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params().is_empty()
    }
}
