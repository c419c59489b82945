// errors/mod.rs
//! Full-resolution semantic errors (E3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Closed classification of every finding this phase can report.
///
/// The free-text context attached to a diagnostic is supplementary; tests and
/// later phases only ever branch on the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    NonePureCallInPureScope,
    SuperIsPure,
    SuperIsNotPure,
    MixOfPureAndNotPureConstructors,
    NotMutable,
    CannotBeAbstract,
    NotOverridden,
    TypeMustExtendException,
    MustResultInABoolean,
    ReturningRequired,
    ReturningNotRequired,
    CovarianceMismatch,
    NeverInitialised,
    NotReferenced,
    NotResolved,
    TypeNotResolved,
    MethodNotResolved,
    MethodAmbiguous,
    OperatorNotDefined,
    OperatorAmbiguous,
    NotATemplate,
    GenericParametersIncorrect,
    OperatorMustBePure,
    OperatorCannotBePure,
    NotAllEnumeratedValuesPresentInSwitch,
    DuplicateEnumeratedValuesPresentInSwitch,
    MissingOperatorInThis,
    MissingOperatorInSuper,
    MissingOperatorInPropertyType,
    FunctionDelegateWithDefaultOperators,
    TooFewArguments,
    TooManyArguments,
    ReturningMissing,
    ReturnValueNotSupported,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::NonePureCallInPureScope => "NONE_PURE_CALL_IN_PURE_SCOPE",
            Classification::SuperIsPure => "SUPER_IS_PURE",
            Classification::SuperIsNotPure => "SUPER_IS_NOT_PURE",
            Classification::MixOfPureAndNotPureConstructors => {
                "MIX_OF_PURE_AND_NOT_PURE_CONSTRUCTORS"
            }
            Classification::NotMutable => "NOT_MUTABLE",
            Classification::CannotBeAbstract => "CANNOT_BE_ABSTRACT",
            Classification::NotOverridden => "NOT_OVERRIDDEN",
            Classification::TypeMustExtendException => "TYPE_MUST_EXTEND_EXCEPTION",
            Classification::MustResultInABoolean => "MUST_RESULT_IN_A_BOOLEAN",
            Classification::ReturningRequired => "RETURNING_REQUIRED",
            Classification::ReturningNotRequired => "RETURNING_NOT_REQUIRED",
            Classification::CovarianceMismatch => "COVARIANCE_MISMATCH",
            Classification::NeverInitialised => "NEVER_INITIALISED",
            Classification::NotReferenced => "NOT_REFERENCED",
            Classification::NotResolved => "NOT_RESOLVED",
            Classification::TypeNotResolved => "TYPE_NOT_RESOLVED",
            Classification::MethodNotResolved => "METHOD_NOT_RESOLVED",
            Classification::MethodAmbiguous => "METHOD_AMBIGUOUS",
            Classification::OperatorNotDefined => "OPERATOR_NOT_DEFINED",
            Classification::OperatorAmbiguous => "OPERATOR_AMBIGUOUS",
            Classification::NotATemplate => "NOT_A_TEMPLATE",
            Classification::GenericParametersIncorrect => "GENERIC_PARAMETERS_INCORRECT",
            Classification::OperatorMustBePure => "OPERATOR_MUST_BE_PURE",
            Classification::OperatorCannotBePure => "OPERATOR_CANNOT_BE_PURE",
            Classification::NotAllEnumeratedValuesPresentInSwitch => {
                "NOT_ALL_ENUMERATED_VALUES_PRESENT_IN_SWITCH"
            }
            Classification::DuplicateEnumeratedValuesPresentInSwitch => {
                "DUPLICATE_ENUMERATED_VALUES_PRESENT_IN_SWITCH"
            }
            Classification::MissingOperatorInThis => "MISSING_OPERATOR_IN_THIS",
            Classification::MissingOperatorInSuper => "MISSING_OPERATOR_IN_SUPER",
            Classification::MissingOperatorInPropertyType => "MISSING_OPERATOR_IN_PROPERTY_TYPE",
            Classification::FunctionDelegateWithDefaultOperators => {
                "FUNCTION_DELEGATE_WITH_DEFAULT_OPERATORS"
            }
            Classification::TooFewArguments => "TOO_FEW_ARGUMENTS",
            Classification::TooManyArguments => "TOO_MANY_ARGUMENTS",
            Classification::ReturningMissing => "RETURNING_MISSING",
            Classification::ReturnValueNotSupported => "RETURN_VALUE_NOT_SUPPORTED",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SemanticError {
    #[error("{context} call to a non-pure symbol within a pure scope")]
    #[diagnostic(
        code(E3001),
        help("mark the called symbol 'pure', or remove 'pure' from the calling scope")
    )]
    NonePureCallInPureScope {
        context: String,
        #[label("not pure")]
        span: SourceSpan,
    },

    #[error("{context} 'pure' in super requires 'pure' for this definition")]
    #[diagnostic(code(E3002))]
    SuperIsPure {
        context: String,
        #[label("must be marked 'pure'")]
        span: SourceSpan,
    },

    #[error("{context} super is not 'pure', requires this definition not to be marked 'pure'")]
    #[diagnostic(code(E3003))]
    SuperIsNotPure {
        context: String,
        #[label("must not be marked 'pure'")]
        span: SourceSpan,
    },

    #[error("{context} if any constructor is marked pure, all constructors must be pure")]
    #[diagnostic(code(E3004))]
    MixOfPureAndNotPureConstructors {
        context: String,
        #[label("constructor not marked 'pure'")]
        span: SourceSpan,
    },

    #[error("{context} not mutable")]
    #[diagnostic(code(E3010))]
    NotMutable {
        context: String,
        #[label("cannot be mutated")]
        span: SourceSpan,
    },

    #[error("{context} cannot be abstract")]
    #[diagnostic(code(E3020))]
    CannotBeAbstract {
        context: String,
        #[label("pointless abstract definition")]
        span: SourceSpan,
    },

    #[error("{context} abstract method is not implemented")]
    #[diagnostic(
        code(E3021),
        help("implement the method or declare the type 'abstract'")
    )]
    NotOverridden {
        context: String,
        #[label("not fully implemented")]
        span: SourceSpan,
    },

    #[error("{context} type must be of Exception type")]
    #[diagnostic(code(E3030))]
    TypeMustExtendException {
        context: String,
        #[label("not an Exception")]
        span: SourceSpan,
    },

    #[error("{context} must result in a Boolean")]
    #[diagnostic(code(E3040))]
    MustResultInABoolean {
        context: String,
        #[label("expected Boolean")]
        span: SourceSpan,
    },

    #[error("{context} returning block required when used in an expression")]
    #[diagnostic(code(E3041))]
    ReturningRequired {
        context: String,
        #[label("no result binding")]
        span: SourceSpan,
    },

    #[error("{context} returning block is not required when used as a statement")]
    #[diagnostic(code(E3042))]
    ReturningNotRequired {
        context: String,
        #[label("result is never used")]
        span: SourceSpan,
    },

    #[error("{context} return types are incompatible (covariance required)")]
    #[diagnostic(code(E3043))]
    CovarianceMismatch {
        context: String,
        #[label("incompatible return type")]
        span: SourceSpan,
    },

    #[error("{context} never initialised")]
    #[diagnostic(code(E3050))]
    NeverInitialised {
        context: String,
        #[label("no value assigned")]
        span: SourceSpan,
    },

    #[error("{context} is not referenced anywhere")]
    #[diagnostic(code(E3051))]
    NotReferenced {
        context: String,
        #[label("unused")]
        span: SourceSpan,
    },

    #[error("{context} not resolved")]
    #[diagnostic(code(E3060))]
    NotResolved {
        context: String,
        #[label("unknown symbol")]
        span: SourceSpan,
    },

    #[error("{context} type not resolved")]
    #[diagnostic(code(E3061))]
    TypeNotResolved {
        context: String,
        #[label("unknown type")]
        span: SourceSpan,
    },

    #[error("{context} method/function not resolved")]
    #[diagnostic(code(E3062))]
    MethodNotResolved {
        context: String,
        #[label("no matching method")]
        span: SourceSpan,
    },

    #[error("{context} ambiguous match")]
    #[diagnostic(code(E3063))]
    MethodAmbiguous {
        context: String,
        #[label("more than one method matches")]
        span: SourceSpan,
    },

    #[error("{context} operator not defined")]
    #[diagnostic(code(E3064))]
    OperatorNotDefined {
        context: String,
        #[label("operator missing")]
        span: SourceSpan,
    },

    #[error("{context} ambiguous operator")]
    #[diagnostic(code(E3065))]
    OperatorAmbiguous {
        context: String,
        #[label("more than one operator matches")]
        span: SourceSpan,
    },

    #[error("{context} not 'template/generic' in nature")]
    #[diagnostic(code(E3070))]
    NotATemplate {
        context: String,
        #[label("cannot be parameterised")]
        span: SourceSpan,
    },

    #[error("{context} incorrect number of type parameters supplied")]
    #[diagnostic(code(E3071))]
    GenericParametersIncorrect {
        context: String,
        #[label("wrong number of type arguments")]
        span: SourceSpan,
    },

    #[error("{context} operator must be marked 'pure'")]
    #[diagnostic(code(E3005))]
    OperatorMustBePure {
        context: String,
        #[label("must be marked 'pure'")]
        span: SourceSpan,
    },

    #[error("{context} operator mutates and cannot be marked 'pure'")]
    #[diagnostic(code(E3006))]
    OperatorCannotBePure {
        context: String,
        #[label("must not be marked 'pure'")]
        span: SourceSpan,
    },

    #[error("{context} not all enumerated values are present in the switch")]
    #[diagnostic(code(E3044))]
    NotAllEnumeratedValuesPresentInSwitch {
        context: String,
        #[label("incomplete switch")]
        span: SourceSpan,
    },

    #[error("{context} enumerated value is already present in the switch")]
    #[diagnostic(code(E3045))]
    DuplicateEnumeratedValuesPresentInSwitch {
        context: String,
        #[label("duplicate case")]
        span: SourceSpan,
    },

    #[error("{context} defaulted operator requires an operator on this type")]
    #[diagnostic(code(E3080))]
    MissingOperatorInThis {
        context: String,
        #[label("cannot be defaulted")]
        span: SourceSpan,
    },

    #[error("{context} defaulted operator requires an operator on the super")]
    #[diagnostic(code(E3081))]
    MissingOperatorInSuper {
        context: String,
        #[label("cannot be defaulted")]
        span: SourceSpan,
    },

    #[error("{context} defaulted operator requires an operator on the property type")]
    #[diagnostic(code(E3082))]
    MissingOperatorInPropertyType {
        context: String,
        #[label("cannot be defaulted")]
        span: SourceSpan,
    },

    #[error("{context} operators cannot be defaulted over a function delegate property")]
    #[diagnostic(code(E3083))]
    FunctionDelegateWithDefaultOperators {
        context: String,
        #[label("cannot be defaulted")]
        span: SourceSpan,
    },

    #[error("{context} too few arguments for this operator")]
    #[diagnostic(code(E3090))]
    TooFewArguments {
        context: String,
        #[label("argument expected")]
        span: SourceSpan,
    },

    #[error("{context} too many arguments for this operator")]
    #[diagnostic(code(E3091))]
    TooManyArguments {
        context: String,
        #[label("unexpected argument")]
        span: SourceSpan,
    },

    #[error("{context} operator must return a value")]
    #[diagnostic(code(E3092))]
    ReturningMissing {
        context: String,
        #[label("no returning binding")]
        span: SourceSpan,
    },

    #[error("{context} operator must not return a value")]
    #[diagnostic(code(E3093))]
    ReturnValueNotSupported {
        context: String,
        #[label("unexpected returning binding")]
        span: SourceSpan,
    },
}

impl SemanticError {
    /// Build the error for a classification; the single funnel every rule reports through.
    pub fn new(classification: Classification, context: String, span: SourceSpan) -> Self {
        match classification {
            Classification::NonePureCallInPureScope => {
                SemanticError::NonePureCallInPureScope { context, span }
            }
            Classification::SuperIsPure => SemanticError::SuperIsPure { context, span },
            Classification::SuperIsNotPure => SemanticError::SuperIsNotPure { context, span },
            Classification::MixOfPureAndNotPureConstructors => {
                SemanticError::MixOfPureAndNotPureConstructors { context, span }
            }
            Classification::NotMutable => SemanticError::NotMutable { context, span },
            Classification::CannotBeAbstract => SemanticError::CannotBeAbstract { context, span },
            Classification::NotOverridden => SemanticError::NotOverridden { context, span },
            Classification::TypeMustExtendException => {
                SemanticError::TypeMustExtendException { context, span }
            }
            Classification::MustResultInABoolean => {
                SemanticError::MustResultInABoolean { context, span }
            }
            Classification::ReturningRequired => {
                SemanticError::ReturningRequired { context, span }
            }
            Classification::ReturningNotRequired => {
                SemanticError::ReturningNotRequired { context, span }
            }
            Classification::CovarianceMismatch => {
                SemanticError::CovarianceMismatch { context, span }
            }
            Classification::NeverInitialised => SemanticError::NeverInitialised { context, span },
            Classification::NotReferenced => SemanticError::NotReferenced { context, span },
            Classification::NotResolved => SemanticError::NotResolved { context, span },
            Classification::TypeNotResolved => SemanticError::TypeNotResolved { context, span },
            Classification::MethodNotResolved => {
                SemanticError::MethodNotResolved { context, span }
            }
            Classification::MethodAmbiguous => SemanticError::MethodAmbiguous { context, span },
            Classification::OperatorNotDefined => {
                SemanticError::OperatorNotDefined { context, span }
            }
            Classification::OperatorAmbiguous => {
                SemanticError::OperatorAmbiguous { context, span }
            }
            Classification::NotATemplate => SemanticError::NotATemplate { context, span },
            Classification::GenericParametersIncorrect => {
                SemanticError::GenericParametersIncorrect { context, span }
            }
            Classification::OperatorMustBePure => {
                SemanticError::OperatorMustBePure { context, span }
            }
            Classification::OperatorCannotBePure => {
                SemanticError::OperatorCannotBePure { context, span }
            }
            Classification::NotAllEnumeratedValuesPresentInSwitch => {
                SemanticError::NotAllEnumeratedValuesPresentInSwitch { context, span }
            }
            Classification::DuplicateEnumeratedValuesPresentInSwitch => {
                SemanticError::DuplicateEnumeratedValuesPresentInSwitch { context, span }
            }
            Classification::MissingOperatorInThis => {
                SemanticError::MissingOperatorInThis { context, span }
            }
            Classification::MissingOperatorInSuper => {
                SemanticError::MissingOperatorInSuper { context, span }
            }
            Classification::MissingOperatorInPropertyType => {
                SemanticError::MissingOperatorInPropertyType { context, span }
            }
            Classification::FunctionDelegateWithDefaultOperators => {
                SemanticError::FunctionDelegateWithDefaultOperators { context, span }
            }
            Classification::TooFewArguments => SemanticError::TooFewArguments { context, span },
            Classification::TooManyArguments => SemanticError::TooManyArguments { context, span },
            Classification::ReturningMissing => SemanticError::ReturningMissing { context, span },
            Classification::ReturnValueNotSupported => {
                SemanticError::ReturnValueNotSupported { context, span }
            }
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            SemanticError::NonePureCallInPureScope { .. } => {
                Classification::NonePureCallInPureScope
            }
            SemanticError::SuperIsPure { .. } => Classification::SuperIsPure,
            SemanticError::SuperIsNotPure { .. } => Classification::SuperIsNotPure,
            SemanticError::MixOfPureAndNotPureConstructors { .. } => {
                Classification::MixOfPureAndNotPureConstructors
            }
            SemanticError::NotMutable { .. } => Classification::NotMutable,
            SemanticError::CannotBeAbstract { .. } => Classification::CannotBeAbstract,
            SemanticError::NotOverridden { .. } => Classification::NotOverridden,
            SemanticError::TypeMustExtendException { .. } => {
                Classification::TypeMustExtendException
            }
            SemanticError::MustResultInABoolean { .. } => Classification::MustResultInABoolean,
            SemanticError::ReturningRequired { .. } => Classification::ReturningRequired,
            SemanticError::ReturningNotRequired { .. } => Classification::ReturningNotRequired,
            SemanticError::CovarianceMismatch { .. } => Classification::CovarianceMismatch,
            SemanticError::NeverInitialised { .. } => Classification::NeverInitialised,
            SemanticError::NotReferenced { .. } => Classification::NotReferenced,
            SemanticError::NotResolved { .. } => Classification::NotResolved,
            SemanticError::TypeNotResolved { .. } => Classification::TypeNotResolved,
            SemanticError::MethodNotResolved { .. } => Classification::MethodNotResolved,
            SemanticError::MethodAmbiguous { .. } => Classification::MethodAmbiguous,
            SemanticError::OperatorNotDefined { .. } => Classification::OperatorNotDefined,
            SemanticError::OperatorAmbiguous { .. } => Classification::OperatorAmbiguous,
            SemanticError::NotATemplate { .. } => Classification::NotATemplate,
            SemanticError::GenericParametersIncorrect { .. } => {
                Classification::GenericParametersIncorrect
            }
            SemanticError::OperatorMustBePure { .. } => Classification::OperatorMustBePure,
            SemanticError::OperatorCannotBePure { .. } => Classification::OperatorCannotBePure,
            SemanticError::NotAllEnumeratedValuesPresentInSwitch { .. } => {
                Classification::NotAllEnumeratedValuesPresentInSwitch
            }
            SemanticError::DuplicateEnumeratedValuesPresentInSwitch { .. } => {
                Classification::DuplicateEnumeratedValuesPresentInSwitch
            }
            SemanticError::MissingOperatorInThis { .. } => Classification::MissingOperatorInThis,
            SemanticError::MissingOperatorInSuper { .. } => Classification::MissingOperatorInSuper,
            SemanticError::MissingOperatorInPropertyType { .. } => {
                Classification::MissingOperatorInPropertyType
            }
            SemanticError::FunctionDelegateWithDefaultOperators { .. } => {
                Classification::FunctionDelegateWithDefaultOperators
            }
            SemanticError::TooFewArguments { .. } => Classification::TooFewArguments,
            SemanticError::TooManyArguments { .. } => Classification::TooManyArguments,
            SemanticError::ReturningMissing { .. } => Classification::ReturningMissing,
            SemanticError::ReturnValueNotSupported { .. } => {
                Classification::ReturnValueNotSupported
            }
        }
    }

    /// The free-text context supplied by the reporting rule.
    pub fn context(&self) -> &str {
        match self {
            SemanticError::NonePureCallInPureScope { context, .. }
            | SemanticError::SuperIsPure { context, .. }
            | SemanticError::SuperIsNotPure { context, .. }
            | SemanticError::MixOfPureAndNotPureConstructors { context, .. }
            | SemanticError::NotMutable { context, .. }
            | SemanticError::CannotBeAbstract { context, .. }
            | SemanticError::NotOverridden { context, .. }
            | SemanticError::TypeMustExtendException { context, .. }
            | SemanticError::MustResultInABoolean { context, .. }
            | SemanticError::ReturningRequired { context, .. }
            | SemanticError::ReturningNotRequired { context, .. }
            | SemanticError::CovarianceMismatch { context, .. }
            | SemanticError::NeverInitialised { context, .. }
            | SemanticError::NotReferenced { context, .. }
            | SemanticError::NotResolved { context, .. }
            | SemanticError::TypeNotResolved { context, .. }
            | SemanticError::MethodNotResolved { context, .. }
            | SemanticError::MethodAmbiguous { context, .. }
            | SemanticError::OperatorNotDefined { context, .. }
            | SemanticError::OperatorAmbiguous { context, .. }
            | SemanticError::NotATemplate { context, .. }
            | SemanticError::GenericParametersIncorrect { context, .. }
            | SemanticError::OperatorMustBePure { context, .. }
            | SemanticError::OperatorCannotBePure { context, .. }
            | SemanticError::NotAllEnumeratedValuesPresentInSwitch { context, .. }
            | SemanticError::DuplicateEnumeratedValuesPresentInSwitch { context, .. }
            | SemanticError::MissingOperatorInThis { context, .. }
            | SemanticError::MissingOperatorInSuper { context, .. }
            | SemanticError::MissingOperatorInPropertyType { context, .. }
            | SemanticError::FunctionDelegateWithDefaultOperators { context, .. }
            | SemanticError::TooFewArguments { context, .. }
            | SemanticError::TooManyArguments { context, .. }
            | SemanticError::ReturningMissing { context, .. }
            | SemanticError::ReturnValueNotSupported { context, .. } => context,
        }
    }
}

/// Structural misuse of the symbol table API.
///
/// These are programming errors in the driver (a stale id, a method registered on a
/// variable), never findings about the program being compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("symbol #{0} is not an aggregate")]
    NotAnAggregate(u32),

    #[error("symbol #{0} is not callable")]
    NotCallable(u32),

    #[error("symbol #{0} is not a control construct")]
    NotAControl(u32),

    #[error("symbol #{0} cannot declare type parameters")]
    CannotBeGeneric(u32),

    #[error("scope #{0} does not exist")]
    UnknownScope(u32),
}
