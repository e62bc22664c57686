//! Text entry point of the crate.
//!
//! [`Evaluator::evaluate`] accepts either a bare expression, evaluated immediately,
//! or a function definition introduced by a parameter prefix:
//!
//! - `t => body`: a function of a scalar, differentiated twice
//! - `p => body`: a function of a point, differentiated once per axis
//!
//! # Example
//!
//! ```
//! use evalexpr_jet::{Evaluation, Evaluator, Seed};
//!
//! let evaluator = Evaluator::new();
//!
//! let Evaluation::Value(v) = evaluator.evaluate("Sqrt(2*2)").unwrap() else { panic!() };
//! assert_eq!(v.to_string(), "2");
//!
//! let Evaluation::Function(f) = evaluator.evaluate("p => p^Vec(0, 0, 1)").unwrap() else {
//!     panic!()
//! };
//! let field = f.call(Seed::Point([1.0, 2.0, 3.0].into())).unwrap();
//! assert_eq!(field.to_string(), "f(p) = [2, -1, 0], div f(p) = 0, curl f(p) = [0, 0, -2]");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::convert::parse;
use crate::errors::EvalError;
use crate::expr::{default_bindings, Scope};
use crate::function::{check_identifiers, JetFunction, Parameter};
use crate::value::Value;

/// What a line of text evaluated to.
#[derive(Debug, Clone)]
pub enum Evaluation {
    Value(Value),
    Function(JetFunction),
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Value(v) => write!(f, "{v}"),
            Evaluation::Function(fun) => write!(f, "{fun}"),
        }
    }
}

/// Evaluates expressions and compiles functions against a set of named bindings.
///
/// The bindings start out as the constants `PI` and `E`.
#[derive(Debug, Clone)]
pub struct Evaluator {
    bindings: Arc<HashMap<String, Value>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            bindings: Arc::new(default_bindings()),
        }
    }

    /// Binds `name` for every later evaluation. Functions compiled earlier keep the
    /// bindings they were compiled with.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        Arc::make_mut(&mut self.bindings).insert(name.into(), value);
    }

    pub fn bindings(&self) -> &HashMap<String, Value> {
        &self.bindings
    }

    /// Evaluates a line of text.
    ///
    /// # Arguments
    /// * `text` - A bare expression, or a function definition starting with `t =>`
    ///   or `p =>`
    ///
    /// # Returns
    /// * `Result<Evaluation, EvalError>` - The value of the expression, or the
    ///   compiled function
    pub fn evaluate(&self, text: &str) -> Result<Evaluation, EvalError> {
        debug!(input = text, "evaluating");
        match split_function(text) {
            Some((parameter, body)) => Ok(Evaluation::Function(JetFunction::new(
                parameter,
                body,
                Arc::clone(&self.bindings),
            )?)),
            None => Ok(Evaluation::Value(self.eval_value(text)?)),
        }
    }

    /// Evaluates a bare expression.
    pub fn eval_value(&self, text: &str) -> Result<Value, EvalError> {
        let expr = parse(text)?;
        check_identifiers(&expr, &self.bindings, None)?;
        expr.eval(&Scope::new(&self.bindings))
    }

    /// Compiles a function definition. Text without a parameter prefix is an error.
    pub fn compile_function(&self, text: &str) -> Result<JetFunction, EvalError> {
        let (parameter, body) =
            split_function(text).ok_or_else(|| EvalError::NotAFunction(text.trim().to_string()))?;
        JetFunction::new(parameter, body, Arc::clone(&self.bindings))
    }
}

/// Splits `t => body` or `p => body` into the parameter and the body.
fn split_function(text: &str) -> Option<(Parameter, &str)> {
    let text = text.trim_start();
    let parameter = match text.chars().next()? {
        't' => Parameter::T,
        'p' => Parameter::P,
        _ => return None,
    };
    let body = text[1..].trim_start().strip_prefix("=>")?;
    Some((parameter, body))
}
