//! Expression trees over reals, vectors and jets.
//!
//! An [`Expr`] is built from an evalexpr operator tree by [`crate::convert::build_ast`]
//! and interpreted against a [`Scope`]. The same tree can be evaluated once with real
//! inputs, or many times with a jet bound to the function parameter.
//!
//! The tree is built recursively from:
//! - Leaf nodes: constants and identifiers
//! - Unary operations: negation
//! - Binary operations: `+`, `-`, `*`, `/` and `^`
//! - Calls to [`Builtin`] functions
//!
//! # Expression Simplification
//! [`Expr::simplify`] folds subtrees that contain no identifiers into constants, so
//! repeated evaluation of a compiled function does not redo constant work.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::builtins::{Builtin, CONSTANTS};
use crate::errors::EvalError;
use crate::value::{BinaryOp, Value};

/// Name bindings available to an expression.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    bindings: &'a HashMap<String, Value>,
    parameter: Option<(&'a str, Value)>,
}

impl<'a> Scope<'a> {
    pub fn new(bindings: &'a HashMap<String, Value>) -> Self {
        Self {
            bindings,
            parameter: None,
        }
    }

    /// Binds the function parameter. It shadows any binding of the same name.
    pub fn with_parameter(mut self, name: &'a str, value: Value) -> Self {
        self.parameter = Some((name, value));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.parameter {
            Some((param, value)) if param == name => Some(value),
            _ => self.bindings.get(name).copied(),
        }
    }
}

/// The default bindings: every entry of [`CONSTANTS`].
pub fn default_bindings() -> HashMap<String, Value> {
    CONSTANTS
        .iter()
        .map(|(name, value)| (name.to_string(), Value::Real(*value)))
        .collect()
}

/// An expression in the jet language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal
    Const(f64),
    /// A constant or the function parameter
    Var(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// `a ^ b`: cross product of vectors, power of scalars
    Caret(Box<Expr>, Box<Expr>),
    Call(Builtin, Vec<Expr>),
}

impl Expr {
    /// Evaluates the expression.
    ///
    /// # Arguments
    /// * `scope` - Bindings for every identifier in the expression
    ///
    /// # Returns
    /// The value of the expression, or the first error met in evaluation order
    pub fn eval(&self, scope: &Scope<'_>) -> Result<Value, EvalError> {
        match self {
            Expr::Const(v) => Ok(Value::Real(*v)),
            Expr::Var(name) => scope
                .lookup(name)
                .ok_or_else(|| EvalError::UnknownVariable(name.clone())),
            Expr::Neg(expr) => Ok(-expr.eval(scope)?),
            Expr::Add(left, right) => binary(BinaryOp::Add, left, right, scope),
            Expr::Sub(left, right) => binary(BinaryOp::Sub, left, right, scope),
            Expr::Mul(left, right) => binary(BinaryOp::Mul, left, right, scope),
            Expr::Div(left, right) => binary(BinaryOp::Div, left, right, scope),
            Expr::Caret(left, right) => binary(BinaryOp::Caret, left, right, scope),
            Expr::Call(builtin, args) => {
                let args = args
                    .iter()
                    .map(|arg| arg.eval(scope))
                    .collect::<Result<Vec<_>, _>>()?;
                builtin.apply(&args)
            }
        }
    }

    /// All identifiers referenced by the expression, sorted.
    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers(&self, names: &mut BTreeSet<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(name) => {
                names.insert(name.clone());
            }
            Expr::Neg(expr) => expr.collect_identifiers(names),
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Caret(left, right) => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
            Expr::Call(_, args) => args.iter().for_each(|arg| arg.collect_identifiers(names)),
        }
    }

    /// Folds constant subtrees.
    ///
    /// Only subtrees whose evaluation yields a real are folded; anything that depends
    /// on an identifier, or that fails to evaluate, is left for evaluation time so the
    /// error surfaces there.
    pub fn simplify(&self) -> Expr {
        let simplified = match self {
            Expr::Const(_) | Expr::Var(_) => return self.clone(),
            Expr::Neg(expr) => Expr::Neg(Box::new(expr.simplify())),
            Expr::Add(l, r) => Expr::Add(Box::new(l.simplify()), Box::new(r.simplify())),
            Expr::Sub(l, r) => Expr::Sub(Box::new(l.simplify()), Box::new(r.simplify())),
            Expr::Mul(l, r) => Expr::Mul(Box::new(l.simplify()), Box::new(r.simplify())),
            Expr::Div(l, r) => Expr::Div(Box::new(l.simplify()), Box::new(r.simplify())),
            Expr::Caret(l, r) => Expr::Caret(Box::new(l.simplify()), Box::new(r.simplify())),
            Expr::Call(builtin, args) => {
                Expr::Call(*builtin, args.iter().map(Expr::simplify).collect())
            }
        };

        if !simplified.children_are_constant() {
            return simplified;
        }
        let empty = HashMap::new();
        match simplified.eval(&Scope::new(&empty)) {
            Ok(Value::Real(v)) => Expr::Const(v),
            _ => simplified,
        }
    }

    fn children_are_constant(&self) -> bool {
        let is_const = |e: &Expr| matches!(e, Expr::Const(_));
        match self {
            Expr::Const(_) => true,
            Expr::Var(_) => false,
            Expr::Neg(expr) => is_const(expr),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Caret(l, r) => is_const(l) && is_const(r),
            Expr::Call(_, args) => args.iter().all(is_const),
        }
    }
}

fn binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    scope: &Scope<'_>,
) -> Result<Value, EvalError> {
    let lhs = left.eval(scope)?;
    let rhs = right.eval(scope)?;
    Value::binary(op, lhs, rhs)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{val}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Neg(expr) => write!(f, "-({expr})"),
            Expr::Add(left, right) => write!(f, "({left} + {right})"),
            Expr::Sub(left, right) => write!(f, "({left} - {right})"),
            Expr::Mul(left, right) => write!(f, "({left} * {right})"),
            Expr::Div(left, right) => write!(f, "({left} / {right})"),
            Expr::Caret(left, right) => write!(f, "({left}^{right})"),
            Expr::Call(builtin, args) => {
                write!(f, "{builtin}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Elementary;
    use crate::jet::Jet1D;
    use crate::vector::RealVector;

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Var(name.to_string()))
    }

    fn num(v: f64) -> Box<Expr> {
        Box::new(Expr::Const(v))
    }

    #[test]
    fn test_eval_with_constants() {
        let bindings = default_bindings();
        let scope = Scope::new(&bindings);
        let expr = Expr::Mul(num(2.0), var("PI"));
        assert_eq!(expr.eval(&scope).unwrap(), Value::Real(2.0 * std::f64::consts::PI));
    }

    #[test]
    fn test_eval_with_parameter() {
        let bindings = default_bindings();
        let scope = Scope::new(&bindings).with_parameter("t", Value::Jet(Jet1D::variable(3.0)));
        let expr = Expr::Caret(var("t"), num(2.0));
        assert_eq!(expr.eval(&scope).unwrap(), Value::Jet(Jet1D::new(9.0, 6.0, 2.0)));
    }

    #[test]
    fn test_parameter_shadows_binding() {
        let bindings = default_bindings();
        let scope = Scope::new(&bindings).with_parameter("E", Value::Real(1.0));
        assert_eq!(scope.lookup("E"), Some(Value::Real(1.0)));
        assert_eq!(scope.lookup("PI"), Some(Value::Real(std::f64::consts::PI)));
    }

    #[test]
    fn test_unknown_variable() {
        let bindings = HashMap::new();
        let err = Expr::Add(var("x"), num(1.0))
            .eval(&Scope::new(&bindings))
            .unwrap_err();
        assert!(matches!(err, EvalError::UnknownVariable(name) if name == "x"));
    }

    #[test]
    fn test_call_builds_vectors() {
        let bindings = HashMap::new();
        let expr = Expr::Call(
            Builtin::Vec,
            vec![Expr::Const(1.0), Expr::Const(2.0), Expr::Const(3.0)],
        );
        assert_eq!(
            expr.eval(&Scope::new(&bindings)).unwrap(),
            Value::Vector(RealVector::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_identifiers_sorted() {
        let expr = Expr::Add(
            Box::new(Expr::Call(Builtin::Elementary(Elementary::Sin), vec![Expr::Var("y".into())])),
            Box::new(Expr::Mul(var("x"), var("y"))),
        );
        let names: Vec<_> = expr.identifiers().into_iter().collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_simplify_folds_constants() {
        // t * (2 + 3) -> t * 5
        let expr = Expr::Mul(var("t"), Box::new(Expr::Add(num(2.0), num(3.0))));
        assert_eq!(expr.simplify(), Expr::Mul(var("t"), num(5.0)));

        // Sqrt(4) -> 2
        let expr = Expr::Call(Builtin::Elementary(Elementary::Sqrt), vec![Expr::Const(4.0)]);
        assert_eq!(expr.simplify(), Expr::Const(2.0));
    }

    #[test]
    fn test_simplify_keeps_non_real_results() {
        let vec = Expr::Call(
            Builtin::Vec,
            vec![Expr::Const(1.0), Expr::Const(2.0), Expr::Const(3.0)],
        );
        assert_eq!(vec.simplify(), vec);

        // Errors are deferred to evaluation
        let bad = Expr::Call(Builtin::Pow, vec![Expr::Const(1.0)]);
        assert_eq!(bad.simplify(), bad);
    }

    #[test]
    fn test_display() {
        let expr = Expr::Caret(
            var("p"),
            Box::new(Expr::Call(
                Builtin::Vec,
                vec![Expr::Const(0.0), Expr::Const(0.0), Expr::Const(1.0)],
            )),
        );
        assert_eq!(expr.to_string(), "(p^Vec(0, 0, 1))");
        assert_eq!(Expr::Neg(var("t")).to_string(), "-(t)");
    }
}
