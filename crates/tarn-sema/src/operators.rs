// operators.rs
//
// Canonical operator names and the facts known about each operator.

use OperatorArgs::{One, Zero, ZeroOrOne};

/// Canonical operator used in method search for a surface operator token.
///
/// `None` in means there is no operator on the node, and nothing to check.
pub fn canonical_operator(token: Option<&str>) -> Option<&str> {
    token.map(|token| match token {
        "not" => "~",
        "!=" => "<>",
        other => other,
    })
}

/// How many arguments an operator declaration takes besides its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorArgs {
    Zero,
    One,
    /// Unary and binary forms share the token (`-`)
    ZeroOrOne,
}

impl OperatorArgs {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            OperatorArgs::Zero => count == 0,
            OperatorArgs::One => count == 1,
            OperatorArgs::ZeroOrOne => count <= 1,
        }
    }
}

/// Facts about an operator independent of the type declaring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDetails {
    pub token: &'static str,
    /// Must be declared pure; otherwise it mutates and must not be
    pub pure: bool,
    pub args: OperatorArgs,
    pub returns_value: bool,
}

const fn op(
    token: &'static str,
    pure: bool,
    args: OperatorArgs,
    returns_value: bool,
) -> OperatorDetails {
    OperatorDetails {
        token,
        pure,
        args,
        returns_value,
    }
}

static OPERATORS: &[OperatorDetails] = &[
    // comparison
    op("<", true, One, true),
    op("<=", true, One, true),
    op(">", true, One, true),
    op(">=", true, One, true),
    op("==", true, One, true),
    op("<>", true, One, true),
    op("<=>", true, One, true),
    op("<~>", true, One, true),
    op("<<", true, One, true),
    op(">>", true, One, true),
    // mutating copy, replace and merge
    op(":=:", false, One, false),
    op(":^:", false, One, false),
    op(":~:", false, One, false),
    op("++", false, Zero, true),
    op("--", false, Zero, true),
    // arithmetic
    op("+", true, One, true),
    op("-", true, ZeroOrOne, true),
    op("*", true, One, true),
    op("/", true, One, true),
    op("^", true, One, true),
    op("mod", true, One, true),
    op("rem", true, One, true),
    op("~", true, Zero, true),
    op("!", true, Zero, true),
    op("abs", true, Zero, true),
    op("sqrt", true, Zero, true),
    // assignment forms
    op("|", false, One, false),
    op("+=", false, One, false),
    op("-=", false, One, false),
    op("*=", false, One, false),
    op("/=", false, One, false),
    // logical
    op("and", true, One, true),
    op("or", true, One, true),
    op("xor", true, One, true),
    // conversion and state
    op("?", true, Zero, true),
    op("$", true, Zero, true),
    op("$$", true, Zero, true),
    op("#^", true, Zero, true),
    op("#?", true, Zero, true),
    op("#<", true, Zero, true),
    op("#>", true, Zero, true),
    op("empty", true, Zero, true),
    op("length", true, Zero, true),
    op("open", true, Zero, true),
    op("close", true, Zero, false),
    // membership
    op("contains", true, One, true),
    op("matches", true, One, true),
];

/// Details of a canonical operator; `None` for tokens that are not operators.
pub fn operator_details(canonical: &str) -> Option<&'static OperatorDetails> {
    OPERATORS.iter().find(|details| details.token == canonical)
}

/// Operators that compare two values; these all rest on `<=>` when defaulted.
pub fn is_comparison(canonical: &str) -> bool {
    matches!(canonical, "<" | "<=" | ">" | ">=" | "==" | "<>" | "<=>")
}
