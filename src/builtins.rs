//! The function vocabulary available to evaluated expressions.
//!
//! Names are matched case-insensitively, so both `Sqrt(x)` and `sqrt(x)` work.
//! `ln` is accepted as an alias of `Log`.

use std::f64::consts;
use std::fmt;

use crate::errors::EvalError;
use crate::grad::JetGrad;
use crate::grad_vector::JetGradVector;
use crate::jet::Jet1D;
use crate::scalar::Scalar;
use crate::value::{BinaryOp, Family, Lift, Operand, Value};
use crate::vector::Vector3;

/// Named constants bound in every scope.
pub const CONSTANTS: [(&str, f64); 2] = [("PI", consts::PI), ("E", consts::E)];

/// Single-argument elementary functions, defined for every [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elementary {
    Inverse,
    Sqrt,
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Abs,
}

impl Elementary {
    pub fn apply<S: Scalar>(self, x: S) -> S {
        match self {
            Elementary::Inverse => x.inverse(),
            Elementary::Sqrt => x.sqrt(),
            Elementary::Exp => x.exp(),
            Elementary::Log => x.ln(),
            Elementary::Sin => x.sin(),
            Elementary::Cos => x.cos(),
            Elementary::Tan => x.tan(),
            Elementary::Asin => x.asin(),
            Elementary::Acos => x.acos(),
            Elementary::Atan => x.atan(),
            Elementary::Sinh => x.sinh(),
            Elementary::Cosh => x.cosh(),
            Elementary::Tanh => x.tanh(),
            Elementary::Abs => x.abs(),
        }
    }
}

/// A callable builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Elementary(Elementary),
    /// `Pow(a, b)`, same as `a ^ b` on scalars
    Pow,
    /// `Vec(x, y, z)`
    Vec,
    /// `Variable(real)` seeds a Jet1D, `Variable(vector)` seeds the identity field
    Variable,
    Norm,
    Normalize,
    Dot,
    Cross,
    /// Divergence of a field
    Div,
    /// Curl of a field
    Curl,
    /// Primal value of any jet
    Value,
    D1,
    D2,
    /// Gradient of a JetGrad
    Grad,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        use Elementary::*;

        let builtin = match name.to_ascii_lowercase().as_str() {
            "inverse" => Builtin::Elementary(Inverse),
            "sqrt" => Builtin::Elementary(Sqrt),
            "exp" => Builtin::Elementary(Exp),
            "log" | "ln" => Builtin::Elementary(Log),
            "sin" => Builtin::Elementary(Sin),
            "cos" => Builtin::Elementary(Cos),
            "tan" => Builtin::Elementary(Tan),
            "asin" => Builtin::Elementary(Asin),
            "acos" => Builtin::Elementary(Acos),
            "atan" => Builtin::Elementary(Atan),
            "sinh" => Builtin::Elementary(Sinh),
            "cosh" => Builtin::Elementary(Cosh),
            "tanh" => Builtin::Elementary(Tanh),
            "abs" => Builtin::Elementary(Abs),
            "pow" => Builtin::Pow,
            "vec" => Builtin::Vec,
            "variable" => Builtin::Variable,
            "norm" => Builtin::Norm,
            "normalize" => Builtin::Normalize,
            "dot" => Builtin::Dot,
            "cross" => Builtin::Cross,
            "div" => Builtin::Div,
            "curl" => Builtin::Curl,
            "value" => Builtin::Value,
            "d1" => Builtin::D1,
            "d2" => Builtin::D2,
            "grad" => Builtin::Grad,
            _ => return None,
        };
        Some(builtin)
    }

    /// The canonical spelling of the builtin.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Elementary(e) => match e {
                Elementary::Inverse => "Inverse",
                Elementary::Sqrt => "Sqrt",
                Elementary::Exp => "Exp",
                Elementary::Log => "Log",
                Elementary::Sin => "Sin",
                Elementary::Cos => "Cos",
                Elementary::Tan => "Tan",
                Elementary::Asin => "Asin",
                Elementary::Acos => "Acos",
                Elementary::Atan => "Atan",
                Elementary::Sinh => "Sinh",
                Elementary::Cosh => "Cosh",
                Elementary::Tanh => "Tanh",
                Elementary::Abs => "Abs",
            },
            Builtin::Pow => "Pow",
            Builtin::Vec => "Vec",
            Builtin::Variable => "Variable",
            Builtin::Norm => "Norm",
            Builtin::Normalize => "Normalize",
            Builtin::Dot => "Dot",
            Builtin::Cross => "Cross",
            Builtin::Div => "Div",
            Builtin::Curl => "Curl",
            Builtin::Value => "Value",
            Builtin::D1 => "D1",
            Builtin::D2 => "D2",
            Builtin::Grad => "Grad",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Vec => 3,
            Builtin::Pow | Builtin::Dot | Builtin::Cross => 2,
            _ => 1,
        }
    }

    /// Applies the builtin to already evaluated arguments.
    pub fn apply(self, args: &[Value]) -> Result<Value, EvalError> {
        if args.len() != self.arity() {
            return Err(EvalError::Arity {
                function: self.name().to_string(),
                expected: self.arity(),
                got: args.len(),
            });
        }

        match (self, args) {
            (Builtin::Elementary(e), [x]) => elementary(self, e, *x),
            (Builtin::Pow, [a, b]) if !a.is_vector() && !b.is_vector() => {
                Value::binary(BinaryOp::Caret, *a, *b)
            }
            (Builtin::Vec, [x, y, z]) => {
                match x.family().join(y.family())?.join(z.family())? {
                    Family::Real => vec_of::<f64>(*x, *y, *z),
                    Family::Jet => vec_of::<Jet1D>(*x, *y, *z),
                    Family::Grad => vec_of::<JetGrad>(*x, *y, *z),
                }
            }
            (Builtin::Variable, [Value::Real(v)]) => Ok(Value::Jet(Jet1D::variable(*v))),
            (Builtin::Variable, [Value::Vector(p)]) => {
                Ok(Value::GradVector(JetGradVector::variable(*p)))
            }
            (Builtin::Norm, [Value::Vector(v)]) => Ok(Value::Real(v.norm())),
            (Builtin::Norm, [Value::JetVector(v)]) => Ok(Value::Jet(v.norm())),
            (Builtin::Norm, [Value::GradVector(v)]) => Ok(Value::Grad(v.norm())),
            (Builtin::Normalize, [Value::Vector(v)]) => Ok(Value::Vector(v.normalize())),
            (Builtin::Normalize, [Value::JetVector(v)]) => Ok(Value::JetVector(v.normalize())),
            (Builtin::Normalize, [Value::GradVector(v)]) => {
                Ok(Value::GradVector(v.normalize()))
            }
            (Builtin::Dot, [a, b]) if a.is_vector() && b.is_vector() => {
                Value::binary(BinaryOp::Mul, *a, *b)
            }
            (Builtin::Cross, [a, b]) if a.is_vector() && b.is_vector() => {
                Value::binary(BinaryOp::Caret, *a, *b)
            }
            (Builtin::Div, [Value::GradVector(f)]) => Ok(Value::Real(f.div())),
            (Builtin::Curl, [Value::GradVector(f)]) => Ok(Value::Vector(f.curl())),
            (Builtin::Value, [v]) => Ok(primal(*v)),
            (Builtin::D1, [Value::Jet(j)]) => Ok(Value::Real(j.d1)),
            (Builtin::D1, [Value::JetVector(v)]) => Ok(Value::Vector(v.d1())),
            (Builtin::D2, [Value::Jet(j)]) => Ok(Value::Real(j.d2)),
            (Builtin::D2, [Value::JetVector(v)]) => Ok(Value::Vector(v.d2())),
            (Builtin::Grad, [Value::Grad(g)]) => Ok(Value::Vector(g.grad)),
            _ => Err(EvalError::TypeMismatch(format!(
                "{} is not defined for ({})",
                self.name(),
                args.iter().map(Value::kind).collect::<Vec<_>>().join(", ")
            ))),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn elementary(builtin: Builtin, e: Elementary, x: Value) -> Result<Value, EvalError> {
    match x {
        Value::Real(x) => Ok(Value::Real(e.apply(x))),
        Value::Jet(x) => Ok(Value::Jet(e.apply(x))),
        Value::Grad(x) => Ok(Value::Grad(e.apply(x))),
        other => Err(EvalError::TypeMismatch(format!(
            "{builtin} expects a scalar, got {}",
            other.kind()
        ))),
    }
}

fn vec_of<S: Lift>(x: Value, y: Value, z: Value) -> Result<Value, EvalError> {
    let component = |v: Value| match S::lift(v)? {
        Operand::Scalar(s) => Ok(s),
        Operand::Vector(_) => Err(EvalError::TypeMismatch(format!(
            "Vec expects scalar components, got {}",
            v.kind()
        ))),
    };
    Ok(S::vector(Vector3::new(
        component(x)?,
        component(y)?,
        component(z)?,
    )))
}

/// Drops derivative information.
fn primal(v: Value) -> Value {
    match v {
        Value::Real(_) | Value::Vector(_) => v,
        Value::Jet(j) => Value::Real(j.value),
        Value::JetVector(v) => Value::Vector(v.value()),
        Value::Grad(g) => Value::Real(g.value),
        Value::GradVector(f) => Value::Vector(f.value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::RealVector;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_name() {
        assert_eq!(Builtin::from_name("Sqrt"), Some(Builtin::Elementary(Elementary::Sqrt)));
        assert_eq!(Builtin::from_name("sqrt"), Some(Builtin::Elementary(Elementary::Sqrt)));
        assert_eq!(Builtin::from_name("ln"), Some(Builtin::Elementary(Elementary::Log)));
        assert_eq!(Builtin::from_name("VEC"), Some(Builtin::Vec));
        assert_eq!(Builtin::from_name("Foo"), None);
    }

    #[test]
    fn test_elementary_on_every_family() {
        let sin = Builtin::Elementary(Elementary::Sin);
        assert_eq!(sin.apply(&[Value::Real(0.0)]).unwrap(), Value::Real(0.0));

        let Value::Jet(j) = sin.apply(&[Value::Jet(Jet1D::variable(0.0))]).unwrap() else {
            panic!("expected a Jet1D");
        };
        assert_eq!(j, Jet1D::new(0.0, 1.0, 0.0));

        let p = JetGradVector::variable(RealVector::new(0.0, 0.0, 0.0));
        let Value::Grad(g) = sin.apply(&[Value::Grad(p.y)]).unwrap() else {
            panic!("expected a JetGrad");
        };
        assert_eq!(g.grad, RealVector::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_vec_picks_widest_family() {
        let t = Value::Jet(Jet1D::variable(2.0));
        let v = Builtin::Vec
            .apply(&[Value::Real(1.0), Value::Real(2.0), t])
            .unwrap();
        assert_eq!(v.kind(), "Jet1DVector");

        let r = Builtin::Vec
            .apply(&[Value::Real(1.0), Value::Real(2.0), Value::Real(3.0)])
            .unwrap();
        assert_eq!(r, Value::Vector(RealVector::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_vec_rejects_mixed_jets() {
        let t = Value::Jet(Jet1D::variable(2.0));
        let g = Value::Grad(JetGrad::constant(1.0));
        let err = Builtin::Vec.apply(&[t, g, Value::Real(0.0)]).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch(_)));
    }

    #[test]
    fn test_variable_seeds() {
        assert_eq!(
            Builtin::Variable.apply(&[Value::Real(2.0)]).unwrap(),
            Value::Jet(Jet1D::variable(2.0))
        );
        let p = RealVector::new(1.0, 2.0, 3.0);
        let Value::GradVector(f) = Builtin::Variable.apply(&[Value::Vector(p)]).unwrap() else {
            panic!("expected a field");
        };
        assert_eq!(f.div(), 3.0);
    }

    #[test]
    fn test_field_operators() {
        let f = Value::GradVector(JetGradVector::variable(RealVector::new(1.0, 2.0, 2.0)));
        assert_eq!(Builtin::Div.apply(&[f]).unwrap(), Value::Real(3.0));
        assert_eq!(
            Builtin::Curl.apply(&[f]).unwrap(),
            Value::Vector(RealVector::zero())
        );
        let Value::Grad(n) = Builtin::Norm.apply(&[f]).unwrap() else {
            panic!("expected a JetGrad");
        };
        assert_eq!(n.value, 3.0);
        assert_abs_diff_eq!(n.grad.x, 1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(
            Builtin::Value.apply(&[f]).unwrap(),
            Value::Vector(RealVector::new(1.0, 2.0, 2.0))
        );
    }

    #[test]
    fn test_arity_and_type_errors() {
        let err = Builtin::Pow.apply(&[Value::Real(1.0)]).unwrap_err();
        assert!(matches!(err, EvalError::Arity { expected: 2, got: 1, .. }));

        let v = Value::Vector(RealVector::new(1.0, 0.0, 0.0));
        let err = Builtin::Elementary(Elementary::Sqrt).apply(&[v]).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch(_)));

        let err = Builtin::Curl.apply(&[v]).unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: Curl is not defined for (vector)");
    }
}
