// generic/resolver.rs
//
// Resolve (and optionally materialise) parameterised instances.

use rustc_hash::FxHashMap;
use tarn_identity::{ScopeId, Span, SymbolId};

use crate::diagnostics::ErrorListener;
use crate::errors::Classification;
use crate::symbols::{ParameterizedKey, SearchFilter, SymbolKind, SymbolTable, TypeArgs};

/// A type as written at a use site, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Named {
        name: String,
        span: Span,
    },
    /// `base of arg` / `base of (arg, arg)`
    Parameterized {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
        span: Span,
    },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        TypeExpr::Named {
            name: name.into(),
            span,
        }
    }

    pub fn parameterized(base: TypeExpr, args: Vec<TypeExpr>, span: Span) -> Self {
        TypeExpr::Parameterized {
            base: Box::new(base),
            args,
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Named { span, .. } | TypeExpr::Parameterized { span, .. } => *span,
        }
    }
}

/// Resolves a generic base plus type arguments to its canonical instance.
///
/// In resolve-only mode a missing instance is reported as an unresolved type.
/// In resolve-or-define mode it is materialised by substituting the base's type
/// parameters through its member signatures and registered where the base is
/// defined, so every later request for the same key finds it.
#[derive(Debug, Clone, Copy)]
pub struct ParameterizedTypeResolver {
    define: bool,
}

/// Type parameter to argument mapping for one materialisation.
struct Substitution {
    map: FxHashMap<SymbolId, SymbolId>,
    base: SymbolId,
    instance: SymbolId,
    span: Span,
}

impl ParameterizedTypeResolver {
    pub fn new(define: bool) -> Self {
        Self { define }
    }

    pub fn resolve_only() -> Self {
        Self::new(false)
    }

    pub fn resolve_or_define() -> Self {
        Self::new(true)
    }

    /// Resolve `base` parameterised with `args`.
    #[tracing::instrument(skip(self, table, errors), fields(base = key.base.index()))]
    pub fn resolve(
        &self,
        table: &mut SymbolTable,
        errors: &mut ErrorListener,
        span: Span,
        key: ParameterizedKey,
    ) -> Option<SymbolId> {
        let base = table.symbol(key.base);
        if !base.is_generic() {
            errors.semantic_error(
                span,
                format!("wrt '{}':", table.friendly_name(key.base)),
                Classification::NotATemplate,
            );
            return None;
        }
        let expected = base.type_params().len();
        if expected != key.args.len() {
            errors.semantic_error(
                span,
                format!(
                    "wrt '{}' expecting {} but given {}:",
                    table.friendly_name(key.base),
                    expected,
                    key.args.len()
                ),
                Classification::GenericParametersIncorrect,
            );
            return None;
        }

        if let Some(existing) = table.lookup_instance(&key) {
            tracing::debug!(instance = existing.index(), "parameterised instance reused");
            return Some(existing);
        }

        if !self.define {
            errors.semantic_error(
                span,
                format!("wrt '{}':", table.friendly_key(&key)),
                Classification::TypeNotResolved,
            );
            return None;
        }

        self.materialize(table, errors, span, key)
    }

    /// Resolve a written type, innermost arguments first.
    pub fn resolve_type_expr(
        &self,
        table: &mut SymbolTable,
        errors: &mut ErrorListener,
        scope: ScopeId,
        expr: &TypeExpr,
    ) -> Option<SymbolId> {
        match expr {
            TypeExpr::Named { name, span } => {
                let found = table.resolve(scope, name, SearchFilter::Type);
                if found.is_none() {
                    errors.semantic_error(
                        *span,
                        format!("wrt '{}':", name),
                        Classification::TypeNotResolved,
                    );
                }
                found
            }
            TypeExpr::Parameterized { base, args, span } => {
                let base = self.resolve_type_expr(table, errors, scope, base);
                // Resolve every argument so each unresolved one is reported.
                let args: Vec<Option<SymbolId>> = args
                    .iter()
                    .map(|arg| self.resolve_type_expr(table, errors, scope, arg))
                    .collect();
                let base = base?;
                let args: Option<TypeArgs> = args.into_iter().collect();
                let key = ParameterizedKey {
                    base,
                    args: args?,
                };
                self.resolve(table, errors, *span, key)
            }
        }
    }

    fn materialize(
        &self,
        table: &mut SymbolTable,
        errors: &mut ErrorListener,
        span: Span,
        key: ParameterizedKey,
    ) -> Option<SymbolId> {
        let base = table.symbol(key.base).clone();
        let scope = base.defined_in;
        let name = internal_name(table, &key);

        let instance = match &base.kind {
            SymbolKind::Aggregate(info) => {
                table.define_aggregate(scope, &name, info.genus, base.span)
            }
            SymbolKind::Function(_) => table.define_function(scope, &name, base.span),
            _ => return None,
        };
        {
            let symbol = table.symbol_mut(instance);
            symbol.flags = base.flags;
            symbol.synthesized.parameterized_from = Some(key.clone());
        }
        // Registered before members are substituted, so self references and
        // mutually dependent instances terminate.
        let canonical = table.register_instance(key.clone(), instance);
        if canonical != instance {
            return Some(canonical);
        }
        tracing::debug!(
            instance = instance.index(),
            name = %table.friendly_name(instance),
            "materialised parameterised instance"
        );

        let subst = Substitution {
            map: base
                .type_params()
                .iter()
                .copied()
                .zip(key.args.iter().copied())
                .collect(),
            base: key.base,
            instance,
            span,
        };

        match &base.kind {
            SymbolKind::Aggregate(info) => {
                if let Some(sup) = info.super_type
                    && let Some(sup) = self.substitute(table, errors, &subst, sup)
                {
                    table.set_super(instance, sup).ok()?;
                }
                for &tr in &info.traits {
                    if let Some(tr) = self.substitute(table, errors, &subst, tr) {
                        table.add_trait(instance, tr).ok()?;
                    }
                }
                for &property in &info.properties {
                    let ty = self.substitute_type_of(table, errors, &subst, property);
                    let name = table.name_of(property).to_string();
                    let span = table.symbol(property).span;
                    let flags = table.symbol(property).flags;
                    let added = table.add_property(instance, &name, ty, span).ok()?;
                    table.symbol_mut(added).flags = flags;
                }
                for &method in &info.methods {
                    let name = table.name_of(method).to_string();
                    let span = table.symbol(method).span;
                    let copy = table.define_method(instance, &name, span).ok()?;
                    self.copy_callable(table, errors, &subst, method, copy)?;
                }
            }
            SymbolKind::Function(info) => {
                if let SymbolKind::Function(target) = &mut table.symbol_mut(instance).kind {
                    target.genus = info.genus;
                }
                if let Some(sup) = info.super_function
                    && let Some(sup) = self.substitute(table, errors, &subst, sup)
                {
                    table.set_super_function(instance, sup).ok()?;
                }
                self.copy_callable(table, errors, &subst, key.base, instance)?;
            }
            _ => {}
        }
        Some(instance)
    }

    /// Copy parameters, returning binding and flags of `from` onto `to`.
    fn copy_callable(
        &self,
        table: &mut SymbolTable,
        errors: &mut ErrorListener,
        subst: &Substitution,
        from: SymbolId,
        to: SymbolId,
    ) -> Option<()> {
        let source = table.symbol(from).clone();
        let info = source.callable()?;
        if from != subst.base {
            let target = table.symbol_mut(to);
            target.flags = source.flags;
            target.synthesized.defaulted_operator = source.synthesized.defaulted_operator;
        }
        for &param in &info.params {
            let ty = self.substitute_type_of(table, errors, subst, param);
            let name = table.name_of(param).to_string();
            let span = table.symbol(param).span;
            table.add_parameter(to, &name, ty, span).ok()?;
        }
        if let Some(rtn) = info.returning {
            let ty = self.substitute_type_of(table, errors, subst, rtn);
            let name = table.name_of(rtn).to_string();
            let span = table.symbol(rtn).span;
            let flags = table.symbol(rtn).flags;
            let copy = table.set_returning(to, &name, ty, span).ok()?;
            table.symbol_mut(copy).flags = flags;
        }
        Some(())
    }

    fn substitute_type_of(
        &self,
        table: &mut SymbolTable,
        errors: &mut ErrorListener,
        subst: &Substitution,
        symbol: SymbolId,
    ) -> Option<SymbolId> {
        let ty = table.type_of(symbol)?;
        self.substitute(table, errors, subst, ty)
    }

    /// Replace type parameters in `ty`, materialising dependent instances.
    fn substitute(
        &self,
        table: &mut SymbolTable,
        errors: &mut ErrorListener,
        subst: &Substitution,
        ty: SymbolId,
    ) -> Option<SymbolId> {
        if let Some(&arg) = subst.map.get(&ty) {
            return Some(arg);
        }
        if ty == subst.base {
            return Some(subst.instance);
        }
        let Some(dependent) = table.symbol(ty).synthesized.parameterized_from.clone() else {
            return Some(ty);
        };
        let mut args = TypeArgs::new();
        for &arg in &dependent.args {
            args.push(self.substitute(table, errors, subst, arg)?);
        }
        if args == dependent.args {
            return Some(ty);
        }
        let key = ParameterizedKey {
            base: dependent.base,
            args,
        };
        ParameterizedTypeResolver::resolve_or_define().resolve(table, errors, subst.span, key)
    }
}

/// Internal name of an instance; unique per key within a scope.
fn internal_name(table: &SymbolTable, key: &ParameterizedKey) -> String {
    let args = key
        .args
        .iter()
        .map(|&arg| table.name_of(arg))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}<{}>", table.name_of(key.base), args)
}
