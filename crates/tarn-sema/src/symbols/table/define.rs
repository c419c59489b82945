//! Registration of symbols, as performed by the definition phases.

use smallvec::SmallVec;
use tarn_identity::{ScopeId, Span, SymbolId};

use super::SymbolTable;
use crate::errors::TableError;
use crate::symbols::{
    AggregateInfo, CallableInfo, Construct, ControlInfo, FunctionInfo, Genus, MethodInfo,
    ScopeKind, SymbolKind, VariableInfo, VariableRole,
};

impl SymbolTable {
    /// Register an aggregate type and the scope holding its members.
    ///
    /// An aggregate is its own type.
    pub fn define_aggregate(
        &mut self,
        scope: ScopeId,
        name: &str,
        genus: Genus,
        span: Span,
    ) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        let members = self.new_scope(ScopeKind::Aggregate(id), scope);
        let kind = SymbolKind::Aggregate(AggregateInfo {
            genus,
            scope: members,
            super_type: None,
            traits: SmallVec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            type_params: SmallVec::new(),
        });
        let id = self.push_symbol(scope, name, kind, span);
        self.symbol_mut(id).type_of = Some(id);
        id
    }

    pub fn set_super(
        &mut self,
        aggregate: SymbolId,
        super_type: SymbolId,
    ) -> Result<(), TableError> {
        self.aggregate_info_mut(aggregate)?.super_type = Some(super_type);
        Ok(())
    }

    pub fn add_trait(
        &mut self,
        aggregate: SymbolId,
        trait_type: SymbolId,
    ) -> Result<(), TableError> {
        self.aggregate_info_mut(aggregate)?.traits.push(trait_type);
        Ok(())
    }

    /// Declare a type parameter on a generic aggregate or function.
    pub fn add_type_parameter(
        &mut self,
        generic: SymbolId,
        name: &str,
    ) -> Result<SymbolId, TableError> {
        let scope = match &self.symbol(generic).kind {
            SymbolKind::Aggregate(info) => info.scope,
            SymbolKind::Function(info) => info.callable.scope,
            _ => return Err(TableError::CannotBeGeneric(generic.index())),
        };
        let span = self.symbol(generic).span;
        let param = self.push_symbol(scope, name, SymbolKind::TypeParameter, span);
        self.symbol_mut(param).type_of = Some(param);
        match &mut self.symbol_mut(generic).kind {
            SymbolKind::Aggregate(info) => info.type_params.push(param),
            SymbolKind::Function(info) => info.callable.type_params.push(param),
            _ => unreachable!("checked above"),
        }
        Ok(param)
    }

    /// Register a method declared on `owner`.
    pub fn define_method(
        &mut self,
        owner: SymbolId,
        name: &str,
        span: Span,
    ) -> Result<SymbolId, TableError> {
        let members = self
            .aggregate(owner)
            .ok_or(TableError::NotAnAggregate(owner.index()))?
            .scope;
        let id = SymbolId::new(self.symbols.len() as u32);
        let body = self.new_scope(ScopeKind::Function(id), members);
        let kind = SymbolKind::Method(MethodInfo {
            callable: CallableInfo::new(body),
            owner,
        });
        let id = self.push_symbol(members, name, kind, span);
        self.aggregate_info_mut(owner)?.methods.push(id);
        Ok(id)
    }

    /// Register a free function (or function delegate type).
    pub fn define_function(&mut self, scope: ScopeId, name: &str, span: Span) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        let body = self.new_scope(ScopeKind::Function(id), scope);
        let kind = SymbolKind::Function(FunctionInfo {
            callable: CallableInfo::new(body),
            genus: Genus::Function,
            super_function: None,
        });
        self.push_symbol(scope, name, kind, span)
    }

    pub fn set_super_function(
        &mut self,
        function: SymbolId,
        super_function: SymbolId,
    ) -> Result<(), TableError> {
        match &mut self.symbol_mut(function).kind {
            SymbolKind::Function(info) => {
                info.super_function = Some(super_function);
                Ok(())
            }
            _ => Err(TableError::NotCallable(function.index())),
        }
    }

    /// Append a parameter to a method or function.
    pub fn add_parameter(
        &mut self,
        callable: SymbolId,
        name: &str,
        ty: Option<SymbolId>,
        span: Span,
    ) -> Result<SymbolId, TableError> {
        let scope = self.callable_scope(callable)?;
        let param = self.define_variable(scope, name, VariableRole::Parameter, ty, span);
        self.symbol_mut(param).flags.initialised = true;
        if let Some(info) = self.symbol_mut(callable).callable_mut() {
            info.params.push(param);
        }
        Ok(param)
    }

    /// Declare the returning binding of a method or function.
    ///
    /// The callable takes the binding's type as its own.
    pub fn set_returning(
        &mut self,
        callable: SymbolId,
        name: &str,
        ty: Option<SymbolId>,
        span: Span,
    ) -> Result<SymbolId, TableError> {
        let scope = self.callable_scope(callable)?;
        let rtn = self.define_variable(scope, name, VariableRole::Returning, ty, span);
        self.symbol_mut(rtn).flags.mutable = true;
        if let Some(info) = self.symbol_mut(callable).callable_mut() {
            info.returning = Some(rtn);
        }
        if let Some(ty) = ty {
            self.set_type(callable, ty);
        }
        Ok(rtn)
    }

    /// Declare a property on an aggregate.
    pub fn add_property(
        &mut self,
        aggregate: SymbolId,
        name: &str,
        ty: Option<SymbolId>,
        span: Span,
    ) -> Result<SymbolId, TableError> {
        let scope = self
            .aggregate(aggregate)
            .ok_or(TableError::NotAnAggregate(aggregate.index()))?
            .scope;
        let property = self.define_variable(scope, name, VariableRole::Property, ty, span);
        self.aggregate_info_mut(aggregate)?.properties.push(property);
        Ok(property)
    }

    /// Declare one value of an enumeration; values are constant properties
    /// typed as the enumeration, kept in declaration order.
    pub fn add_enumerated_value(
        &mut self,
        enumeration: SymbolId,
        name: &str,
        span: Span,
    ) -> Result<SymbolId, TableError> {
        let scope = self
            .aggregate(enumeration)
            .ok_or(TableError::NotAnAggregate(enumeration.index()))?
            .scope;
        let value =
            self.define_variable(scope, name, VariableRole::Constant, Some(enumeration), span);
        self.aggregate_info_mut(enumeration)?.properties.push(value);
        Ok(value)
    }

    pub fn define_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        role: VariableRole,
        ty: Option<SymbolId>,
        span: Span,
    ) -> SymbolId {
        let kind = SymbolKind::Variable(VariableInfo { role });
        let id = self.push_symbol(scope, name, kind, span);
        self.symbol_mut(id).type_of = ty;
        id
    }

    /// Register a control construct; it has no name of its own.
    pub fn define_control(&mut self, scope: ScopeId, construct: Construct, span: Span) -> SymbolId {
        let kind = SymbolKind::Control(ControlInfo {
            construct,
            returning: None,
        });
        self.push_symbol(scope, construct.keyword(), kind, span)
    }

    pub fn set_control_returning(
        &mut self,
        control: SymbolId,
        returning: SymbolId,
    ) -> Result<(), TableError> {
        match &mut self.symbol_mut(control).kind {
            SymbolKind::Control(info) => {
                info.returning = Some(returning);
                Ok(())
            }
            _ => Err(TableError::NotAControl(control.index())),
        }
    }

    fn callable_scope(&self, callable: SymbolId) -> Result<ScopeId, TableError> {
        self.symbol(callable)
            .callable()
            .map(|info| info.scope)
            .ok_or(TableError::NotCallable(callable.index()))
    }

    fn aggregate_info_mut(
        &mut self,
        aggregate: SymbolId,
    ) -> Result<&mut AggregateInfo, TableError> {
        match &mut self.symbol_mut(aggregate).kind {
            SymbolKind::Aggregate(info) => Ok(info),
            _ => Err(TableError::NotAnAggregate(aggregate.index())),
        }
    }
}

impl CallableInfo {
    fn new(scope: ScopeId) -> Self {
        Self {
            scope,
            params: SmallVec::new(),
            returning: None,
            type_params: SmallVec::new(),
        }
    }
}
