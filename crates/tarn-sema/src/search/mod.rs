//! Method and operator search.
//!
//! A [`MethodSearch`] is built per query; the [`MethodResolver`] ranks every
//! candidate on a type's hierarchy and demands a single best match.

mod resolver;
mod result;

pub use resolver::MethodResolver;
pub use result::{MethodSearchResult, Resolution, WeightedMatch};

use smallvec::SmallVec;
use tarn_identity::SymbolId;

use crate::operators::canonical_operator;
use crate::symbols::SymbolTable;

/// How parameter types must relate to the formal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Identical parameter types: "does this exact signature already exist"
    Exact,
    /// Assignable parameter types, declared coercions allowed: "can this call
    /// be serviced"
    Compatible,
}

/// Search key: name (or canonical operator), argument types and an optional
/// constraint on the returned type.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSearch {
    pub name: String,
    pub params: SmallVec<[SymbolId; 4]>,
    pub returning: Option<SymbolId>,
}

impl MethodSearch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: SmallVec::new(),
            returning: None,
        }
    }

    /// Search for an operator by its surface token; `None` if there is none.
    pub fn operator(token: Option<&str>) -> Option<Self> {
        canonical_operator(token).map(Self::new)
    }

    pub fn with_param(mut self, ty: SymbolId) -> Self {
        self.params.push(ty);
        self
    }

    pub fn with_params(mut self, types: &[SymbolId]) -> Self {
        self.params.extend_from_slice(types);
        self
    }

    pub fn returning(mut self, ty: SymbolId) -> Self {
        self.returning = Some(ty);
        self
    }

    /// Key matching an existing method's signature.
    ///
    /// `None` while any parameter is still untyped; that was reported upstream.
    pub fn from_method(table: &SymbolTable, method: SymbolId) -> Option<Self> {
        let params = table
            .param_types(method)
            .into_iter()
            .collect::<Option<SmallVec<[SymbolId; 4]>>>()?;
        Some(Self {
            name: table.name_of(method).to_string(),
            params,
            returning: None,
        })
    }

    /// `<=>(Integer)`, for diagnostics.
    pub fn display(&self, table: &SymbolTable) -> String {
        let mut text = format!("{}({})", self.name, table.friendly_list(&self.params));
        if let Some(ty) = self.returning {
            text.push_str(" <- ");
            text.push_str(&table.friendly_name(ty));
        }
        text
    }
}
