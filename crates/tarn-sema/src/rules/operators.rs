// rules/operators.rs
//
// Operator and method availability on a type.

use tarn_identity::{Span, SymbolId};

use rustc_hash::FxHashMap;

use super::Check;
use crate::diagnostics::ErrorListener;
use crate::errors::Classification;
use crate::search::{MethodResolver, MethodSearch, Resolution};
use crate::symbols::{Genus, SymbolTable};

/// An operator applied to a value of type `operand`.
#[derive(Debug, Clone, Copy)]
pub struct OperatorUse<'a> {
    pub span: Span,
    pub operand: SymbolId,
    /// Surface token; `None` when the node carries no operator
    pub token: Option<&'a str>,
    pub args: &'a [SymbolId],
    pub returning: Option<SymbolId>,
}

/// Resolves operators and methods in compatibility mode, reporting absent and
/// ambiguous results against the operand type.
#[derive(Debug, Clone, Copy)]
pub struct OperatorAvailableOrError {
    resolver: MethodResolver,
}

impl Default for OperatorAvailableOrError {
    fn default() -> Self {
        Self::new(MethodResolver::compatible())
    }
}

impl OperatorAvailableOrError {
    pub fn new(resolver: MethodResolver) -> Self {
        Self { resolver }
    }

    /// The operator method servicing `op`, if exactly one does.
    pub fn resolve(
        &self,
        table: &SymbolTable,
        errors: &mut ErrorListener,
        op: OperatorUse<'_>,
    ) -> Option<SymbolId> {
        let mut search = MethodSearch::operator(op.token)?.with_params(op.args);
        search.returning = op.returning;
        self.resolve_search(
            table,
            errors,
            op.span,
            op.operand,
            &search,
            (Classification::OperatorNotDefined, Classification::OperatorAmbiguous),
        )
    }

    /// The method servicing a named call on `ty`, if exactly one does.
    pub fn resolve_method(
        &self,
        table: &SymbolTable,
        errors: &mut ErrorListener,
        span: Span,
        ty: SymbolId,
        search: &MethodSearch,
    ) -> Option<SymbolId> {
        self.resolve_search(
            table,
            errors,
            span,
            ty,
            search,
            (Classification::MethodNotResolved, Classification::MethodAmbiguous),
        )
    }

    fn resolve_search(
        &self,
        table: &SymbolTable,
        errors: &mut ErrorListener,
        span: Span,
        ty: SymbolId,
        search: &MethodSearch,
        (absent, ambiguous): (Classification, Classification),
    ) -> Option<SymbolId> {
        let context = format!(
            "wrt '{}' and '{}':",
            table.friendly_name(ty),
            search.display(table)
        );
        match self.resolver.resolve(table, ty, search) {
            Resolution::Found(method) => Some(method),
            Resolution::Absent => {
                errors.semantic_error(span, context, absent);
                None
            }
            Resolution::Ambiguous(candidates) => {
                let candidates = candidates
                    .iter()
                    .map(|&m| table.signature_display(m))
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.semantic_error(
                    span,
                    format!("{} candidates {}:", context, candidates),
                    ambiguous,
                );
                None
            }
        }
    }
}

impl<'a> Check<OperatorUse<'a>> for OperatorAvailableOrError {
    fn check(&self, table: &SymbolTable, op: OperatorUse<'a>, errors: &mut ErrorListener) -> bool {
        op.token.is_none() || self.resolve(table, errors, op).is_some()
    }
}

/// One `case` of a switch: its optional explicit operator and resolved type.
#[derive(Debug, Clone, Copy)]
pub struct CaseUse<'a> {
    pub span: Span,
    pub operator: Option<&'a str>,
    pub case_type: Option<SymbolId>,
    /// The symbol named when the case is a plain value reference
    pub value: Option<SymbolId>,
}

/// A switch over a value of type `subject`.
#[derive(Debug, Clone, Copy)]
pub struct SwitchUse<'a> {
    pub span: Span,
    pub subject: SymbolId,
    pub cases: &'a [CaseUse<'a>],
}

/// Every case must be comparable with the switch subject, via `==` unless the
/// case names its own operator. A switch over an enumeration whose cases are
/// all plain values must name each value exactly once.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwitchCasesOrError {
    operators: OperatorAvailableOrError,
}

impl SwitchCasesOrError {
    pub fn new(operators: OperatorAvailableOrError) -> Self {
        Self { operators }
    }

    /// The enumeration values named, when every case is a plain value of the
    /// subject enumeration.
    fn enumerated_values(table: &SymbolTable, switch: SwitchUse<'_>) -> Option<Vec<SymbolId>> {
        if table.symbol(switch.subject).genus() != Some(Genus::Enumeration) {
            return None;
        }
        switch
            .cases
            .iter()
            .map(|case| match (case.operator, case.case_type, case.value) {
                (None, Some(ty), Some(value)) if table.is_exact_same_type(ty, switch.subject) => {
                    Some(value)
                }
                _ => None,
            })
            .collect()
    }

    fn coverage_or_error(
        &self,
        table: &SymbolTable,
        switch: SwitchUse<'_>,
        named: &[SymbolId],
        errors: &mut ErrorListener,
    ) -> bool {
        let mut ok = true;
        let mut seen: FxHashMap<SymbolId, Span> = FxHashMap::default();
        for (case, &value) in switch.cases.iter().zip(named) {
            if let Some(first) = seen.get(&value) {
                errors.semantic_error(
                    case.span,
                    format!(
                        "'{}' already encountered on line {}:",
                        table.name_of(value),
                        first.line
                    ),
                    Classification::DuplicateEnumeratedValuesPresentInSwitch,
                );
                ok = false;
            } else {
                seen.insert(value, case.span);
            }
        }

        let missing = table
            .aggregate(switch.subject)
            .map(|info| info.properties.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|&&value| !seen.contains_key(&value))
            .map(|&value| table.name_of(value))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            errors.semantic_error(
                switch.span,
                format!("should cover values: {}:", missing.join(", ")),
                Classification::NotAllEnumeratedValuesPresentInSwitch,
            );
            ok = false;
        }
        ok
    }
}

impl<'a> Check<SwitchUse<'a>> for SwitchCasesOrError {
    fn check(
        &self,
        table: &SymbolTable,
        switch: SwitchUse<'a>,
        errors: &mut ErrorListener,
    ) -> bool {
        let mut ok = true;
        for case in switch.cases {
            // An untyped case expression was reported when it failed to resolve.
            let Some(case_type) = case.case_type else {
                continue;
            };
            let op = OperatorUse {
                span: case.span,
                operand: switch.subject,
                token: Some(case.operator.unwrap_or("==")),
                args: std::slice::from_ref(&case_type),
                returning: None,
            };
            ok &= self.operators.check(table, op, errors);
        }
        if let Some(named) = Self::enumerated_values(table, switch) {
            ok &= self.coverage_or_error(table, switch, &named, errors);
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    fn use_of<'a>(operand: SymbolId, token: &'a str, args: &'a [SymbolId]) -> OperatorUse<'a> {
        OperatorUse {
            span: Span::at_line(1),
            operand,
            token: Some(token),
            args,
            returning: None,
        }
    }

    #[test]
    fn builtin_comparator_is_found_and_coercion_applies() {
        let mut fx = Fixture::new();
        let b = fx.b();
        let rule = OperatorAvailableOrError::default();

        let cmp = rule.resolve(&fx.table, &mut fx.errors, use_of(b.integer, "<=>", &[b.integer]));
        assert!(cmp.is_some());
        // Integer coerces to Float, not the other way round.
        let integer_arg = [b.integer];
        let widened = use_of(b.float, "+", &integer_arg);
        assert!(rule.resolve(&fx.table, &mut fx.errors, widened).is_some());
        let float_arg = [b.float];
        let narrowed = use_of(b.integer, "+", &float_arg);
        assert!(rule.resolve(&fx.table, &mut fx.errors, narrowed).is_none());
        assert_eq!(fx.errors.count(Classification::OperatorNotDefined), 1);
    }

    #[test]
    fn not_is_searched_as_negation() {
        let mut fx = Fixture::new();
        let b = fx.b();
        let rule = OperatorAvailableOrError::default();
        assert!(rule.check(&fx.table, use_of(b.boolean, "not", &[]), &mut fx.errors));
        assert!(!rule.check(&fx.table, use_of(b.string, "not", &[]), &mut fx.errors));
        let context = fx.errors.errors()[0].error.context().to_string();
        assert_eq!(context, "wrt 'String' and '~()':");
    }

    #[test]
    fn absent_token_is_nothing_to_check() {
        let mut fx = Fixture::new();
        let b = fx.b();
        let op = OperatorUse {
            span: Span::at_line(1),
            operand: b.string,
            token: None,
            args: &[],
            returning: None,
        };
        assert!(OperatorAvailableOrError::default().check(&fx.table, op, &mut fx.errors));
        assert!(fx.errors.is_empty());
    }

    #[test]
    fn equally_ranked_operators_are_ambiguous() {
        let mut fx = Fixture::new();
        let left = fx.trait_("Left");
        let right = fx.trait_("Right");
        let both = fx.class("Both");
        fx.table.add_trait(both, left).expect("aggregate");
        fx.table.add_trait(both, right).expect("aggregate");
        let target = fx.class("Target");
        fx.operator(target, "+", &[left], Some(target));
        fx.operator(target, "+", &[right], Some(target));

        let rule = OperatorAvailableOrError::default();
        assert!(rule.resolve(&fx.table, &mut fx.errors, use_of(target, "+", &[both])).is_none());
        assert_eq!(fx.errors.count(Classification::OperatorAmbiguous), 1);
        assert!(rule.resolve(&fx.table, &mut fx.errors, use_of(target, "+", &[left])).is_some());
    }

    fn case(line: u32, operator: Option<&str>, ty: Option<SymbolId>) -> CaseUse<'_> {
        CaseUse {
            span: Span::at_line(line),
            operator,
            case_type: ty,
            value: None,
        }
    }

    fn switch<'a>(subject: SymbolId, cases: &'a [CaseUse<'a>]) -> SwitchUse<'a> {
        SwitchUse {
            span: Span::at_line(1),
            subject,
            cases,
        }
    }

    #[test]
    fn switch_cases_default_to_equality() {
        let mut fx = Fixture::new();
        let b = fx.b();
        let cases = [
            case(2, None, Some(b.integer)),
            case(3, Some("<"), Some(b.integer)),
            case(4, None, Some(b.string)),
            case(5, None, None),
        ];
        let ok = SwitchCasesOrError::default().check(
            &fx.table,
            switch(b.integer, &cases),
            &mut fx.errors,
        );
        assert!(!ok);
        assert_eq!(fx.errors.len(), 1);
        assert_eq!(fx.errors.errors()[0].span.line, 4);
    }

    /// `Colour` with `Red`, `Green` and `Blue`, comparable with itself.
    fn colours(fx: &mut Fixture) -> (SymbolId, [SymbolId; 3]) {
        let boolean = fx.b().boolean;
        let global = fx.global();
        let colour = fx
            .table
            .define_aggregate(global, "Colour", Genus::Enumeration, Span::at_line(1));
        fx.operator(colour, "==", &[colour], Some(boolean));
        let values = ["Red", "Green", "Blue"].map(|name| {
            fx.table
                .add_enumerated_value(colour, name, Span::default())
                .expect("aggregate")
        });
        (colour, values)
    }

    fn value_case(line: u32, colour: SymbolId, value: SymbolId) -> CaseUse<'static> {
        CaseUse {
            value: Some(value),
            ..case(line, None, Some(colour))
        }
    }

    #[test]
    fn enumeration_switch_must_name_every_value() {
        let mut fx = Fixture::new();
        let (colour, [red, _, blue]) = colours(&mut fx);
        let cases = [value_case(10, colour, red), value_case(11, colour, blue)];

        let rule = SwitchCasesOrError::default();
        assert!(!rule.check(&fx.table, switch(colour, &cases), &mut fx.errors));
        assert_eq!(
            fx.classifications(),
            [Classification::NotAllEnumeratedValuesPresentInSwitch]
        );
        let finding = &fx.errors.errors()[0];
        assert_eq!(finding.span.line, 1);
        assert_eq!(finding.error.context(), "should cover values: Green:");
    }

    #[test]
    fn enumeration_switch_rejects_repeated_values() {
        let mut fx = Fixture::new();
        let (colour, [red, green, blue]) = colours(&mut fx);
        let cases = [
            value_case(10, colour, red),
            value_case(11, colour, green),
            value_case(12, colour, blue),
            value_case(13, colour, red),
        ];

        let rule = SwitchCasesOrError::default();
        assert!(!rule.check(&fx.table, switch(colour, &cases), &mut fx.errors));
        assert_eq!(
            fx.classifications(),
            [Classification::DuplicateEnumeratedValuesPresentInSwitch]
        );
        let finding = &fx.errors.errors()[0];
        assert_eq!(finding.span.line, 13);
        assert_eq!(finding.error.context(), "'Red' already encountered on line 10:");
    }

    #[test]
    fn expression_cases_turn_off_coverage() {
        let mut fx = Fixture::new();
        let (colour, [red, ..]) = colours(&mut fx);
        let cases = [value_case(10, colour, red), case(11, None, Some(colour))];

        let rule = SwitchCasesOrError::default();
        assert!(rule.check(&fx.table, switch(colour, &cases), &mut fx.errors));
        assert!(fx.errors.is_empty());
    }
}
