//! Compiled jet functions.
//!
//! A [`JetFunction`] is an expression of one parameter, compiled once from text such
//! as `t => Sin(t)` and then called with many seeds. The parameter kind decides which
//! derivatives are computed:
//!
//! - [`Parameter::T`]: a real seed becomes a [`Jet1D`], giving `f`, `f'` and `f''`
//! - [`Parameter::P`]: a vector seed becomes a [`JetGradVector`], giving gradients,
//!   divergence and curl
//!
//! # Example
//!
//! ```
//! use evalexpr_jet::{Evaluator, Seed, Value};
//!
//! let f = Evaluator::new().compile_function("t => t^2").unwrap();
//! let Value::Jet(y) = f.call(Seed::Real(3.0)).unwrap() else { panic!() };
//! assert_eq!((y.value, y.d1, y.d2), (9.0, 6.0, 2.0));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use colored::Colorize;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::convert::parse;
use crate::errors::EvalError;
use crate::expr::{Expr, Scope};
use crate::grad_vector::JetGradVector;
use crate::jet::Jet1D;
use crate::value::Value;
use crate::vector::RealVector;

/// The parameter of a compiled function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// A scalar `t`, seeded as a [`Jet1D`]
    T,
    /// A point `p`, seeded as a [`JetGradVector`]
    P,
}

impl Parameter {
    pub fn name(self) -> &'static str {
        match self {
            Parameter::T => "t",
            Parameter::P => "p",
        }
    }

    /// Promotes a seed to the jet this parameter is bound to.
    pub fn seed(self, seed: Seed) -> Result<Value, EvalError> {
        match (self, seed) {
            (Parameter::T, Seed::Real(t)) => Ok(Value::Jet(Jet1D::variable(t))),
            (Parameter::P, Seed::Point(p)) => Ok(Value::GradVector(JetGradVector::variable(p))),
            (parameter, seed) => Err(EvalError::InvalidSeed {
                parameter: parameter.name().to_string(),
                expected: parameter.seed_kind(),
                got: seed.kind(),
            }),
        }
    }

    fn seed_kind(self) -> &'static str {
        match self {
            Parameter::T => "real",
            Parameter::P => "vector",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The point at which a function is evaluated, before promotion to a jet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    Real(f64),
    Point(RealVector),
}

impl Seed {
    pub fn kind(&self) -> &'static str {
        match self {
            Seed::Real(_) => "real",
            Seed::Point(_) => "vector",
        }
    }
}

impl From<f64> for Seed {
    fn from(t: f64) -> Self {
        Seed::Real(t)
    }
}

impl From<RealVector> for Seed {
    fn from(p: RealVector) -> Self {
        Seed::Point(p)
    }
}

impl TryFrom<Value> for Seed {
    type Error = EvalError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(t) => Ok(Seed::Real(t)),
            Value::Vector(p) => Ok(Seed::Point(p)),
            other => Err(EvalError::TypeMismatch(format!(
                "a seed must be a real or a vector, got {}",
                other.kind()
            ))),
        }
    }
}

/// An expression of a single jet parameter.
///
/// The body is parsed and checked once. Every identifier must be either the parameter
/// or a binding known at compile time.
#[derive(Clone)]
pub struct JetFunction {
    source: String,
    parameter: Parameter,
    body: Expr,
    bindings: Arc<HashMap<String, Value>>,
}

impl fmt::Debug for JetFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "    {}: {}", "Function".cyan(), self.source)?;
        writeln!(f, "    {}: {}", "Parameter".cyan(), self.parameter)?;
        writeln!(f, "    {}: {}", "Body".cyan(), self.body)?;
        writeln!(f, "}}")
    }
}

impl fmt::Display for JetFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.parameter, self.source)
    }
}

impl JetFunction {
    /// Compiles the body of a function.
    ///
    /// # Arguments
    /// * `parameter` - The parameter the body is a function of
    /// * `source` - The body, e.g. `Sin(t)` for the function `t => Sin(t)`
    /// * `bindings` - Named values the body may refer to
    ///
    /// # Returns
    /// * `Result<Self, EvalError>` - The compiled function, or an error if the body
    ///   does not parse or uses identifiers that are not bound
    pub fn new(
        parameter: Parameter,
        source: &str,
        bindings: Arc<HashMap<String, Value>>,
    ) -> Result<Self, EvalError> {
        let body = parse(source)?;
        check_identifiers(&body, &bindings, Some(parameter))?;
        debug!(%parameter, body = %body, "compiled jet function");

        Ok(Self {
            source: source.trim().to_string(),
            parameter,
            body,
            bindings,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// Seeds the parameter and evaluates the body.
    ///
    /// # Arguments
    /// * `seed` - A real for a `t` function, a point for a `p` function
    pub fn call(&self, seed: Seed) -> Result<Value, EvalError> {
        let arg = self.parameter.seed(seed)?;
        self.call_with(arg)
    }

    /// Evaluates the body with the parameter bound to `arg` as is.
    ///
    /// No seeding happens, so `arg` can be any value, e.g. a jet composed elsewhere
    /// or a plain real to evaluate without derivatives.
    pub fn call_with(&self, arg: Value) -> Result<Value, EvalError> {
        trace!(parameter = %self.parameter, %arg, "calling jet function");
        let scope = Scope::new(&self.bindings).with_parameter(self.parameter.name(), arg);
        self.body.eval(&scope)
    }

    /// Calls the function for every seed in parallel.
    ///
    /// # Returns
    /// One result per seed, in input order
    pub fn eval_many(&self, seeds: &[Seed]) -> Vec<Result<Value, EvalError>> {
        seeds.par_iter().map(|seed| self.call(*seed)).collect()
    }
}

/// Rejects identifiers that are neither bound nor the parameter.
pub(crate) fn check_identifiers(
    expr: &Expr,
    bindings: &HashMap<String, Value>,
    parameter: Option<Parameter>,
) -> Result<(), EvalError> {
    let unknown = expr
        .identifiers()
        .into_iter()
        .filter(|name| !bindings.contains_key(name))
        .filter(|name| !matches!(parameter, Some(p) if p.name() == name.as_str()))
        .collect::<Vec<_>>();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(EvalError::UnknownVariable(unknown.iter().join(", ")))
    }
}
