//! Error types for the evalexpr-jet crate.
//!
//! The jet arithmetic itself never fails: numeric domain problems surface as `NaN` or
//! infinities. Errors only arise when text is turned into something to evaluate:
//!
//! - `ConvertError`: the evalexpr tree uses something outside the jet vocabulary
//! - `EvalError`: parsing, conversion and dynamic type errors while evaluating
//! - `ReplError`: failures of the interactive shell

use evalexpr::{DefaultNumericTypes, EvalexprError};
use thiserror::Error;

/// Errors that can occur while converting an evalexpr tree into an [`Expr`](crate::expr::Expr).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// An operator such as `==`, `&&` or `=` that has no jet meaning
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    /// A call to a name that is not part of the builtin vocabulary
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    /// A literal that is neither an integer nor a float
    #[error("Expected numeric constant: {0}")]
    ConstOperator(String),
    /// A node with an unexpected number of children
    #[error("Malformed expression: {0}")]
    Malformed(String),
}

/// Errors raised while compiling or evaluating an expression.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Error when parsing the input string with evalexpr
    #[error("Failed to parse expression: {0}")]
    Parse(#[from] EvalexprError<DefaultNumericTypes>),
    /// Error when converting the evalexpr tree into the jet expression tree
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// A name that is neither a constant nor the function parameter
    #[error("Variable not found: {0}")]
    UnknownVariable(String),
    /// A builtin called with the wrong number of arguments
    #[error("{function} expects {expected} argument(s), got {got}")]
    Arity {
        function: String,
        expected: usize,
        got: usize,
    },
    /// Operands or arguments of incompatible kinds
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
    /// Text without a `t =>` or `p =>` prefix where a function was required
    #[error("Expected a function such as 't => Sin(t)', got: {0}")]
    NotAFunction(String),
    /// A seed that cannot be promoted to the parameter kind of a function
    #[error("Invalid seed for parameter '{parameter}': expected {expected}, got {got}")]
    InvalidSeed {
        parameter: String,
        expected: &'static str,
        got: &'static str,
    },
}

/// Errors of the interactive shell.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
