//! Dynamically typed results of evaluating an expression.
//!
//! Expressions mix reals, vectors and jets freely, so their results are carried in a
//! single [`Value`] enum. Binary operators first agree on a [`Family`]:
//!
//! - `Real`: plain numbers and vectors
//! - `Jet`: [`Jet1D`] and [`Jet1DVector`], functions of a scalar `t`
//! - `Grad`: [`JetGrad`] and [`JetGradVector`], functions of a point `p`
//!
//! Reals join any family as constants. Mixing the two jet families is an error since
//! their derivatives are taken with respect to different parameters.

use std::fmt;
use std::ops::Neg;

use crate::errors::EvalError;
use crate::grad::JetGrad;
use crate::grad_vector::JetGradVector;
use crate::jet::Jet1D;
use crate::jet_vector::Jet1DVector;
use crate::scalar::Scalar;
use crate::vector::{RealVector, Vector3};

/// The result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Real(f64),
    Vector(RealVector),
    Jet(Jet1D),
    JetVector(Jet1DVector),
    Grad(JetGrad),
    GradVector(JetGradVector),
}

impl Value {
    /// A short name for the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Real(_) => "real",
            Value::Vector(_) => "vector",
            Value::Jet(_) => "Jet1D",
            Value::JetVector(_) => "Jet1DVector",
            Value::Grad(_) => "JetGrad",
            Value::GradVector(_) => "JetGradVector",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Value::Real(_) | Value::Vector(_) => Family::Real,
            Value::Jet(_) | Value::JetVector(_) => Family::Jet,
            Value::Grad(_) | Value::GradVector(_) => Family::Grad,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            Value::Vector(_) | Value::JetVector(_) | Value::GradVector(_)
        )
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<RealVector> {
        match self {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    /// Applies a binary operator, promoting reals into the family of the other operand.
    ///
    /// # Arguments
    /// * `op` - The operator
    /// * `lhs` - Left operand
    /// * `rhs` - Right operand
    ///
    /// # Returns
    /// The result, or [`EvalError::TypeMismatch`] when the operator is not defined for
    /// the operand kinds (for example a vector divided by a vector).
    pub fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
        // A constant real exponent uses the closed-form power rule.
        if let (BinaryOp::Caret, Some(exponent)) = (op, rhs.as_real()) {
            match lhs {
                Value::Real(base) => return Ok(Value::Real(base.powf(exponent))),
                Value::Jet(base) => return Ok(Value::Jet(base.powf(exponent))),
                Value::Grad(base) => return Ok(Value::Grad(base.powf(exponent))),
                _ => {}
            }
        }

        match lhs.family().join(rhs.family())? {
            Family::Real => apply::<f64>(op, lhs, rhs),
            Family::Jet => apply::<Jet1D>(op, lhs, rhs),
            Family::Grad => apply::<JetGrad>(op, lhs, rhs),
        }
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        match self {
            Value::Real(v) => Value::Real(-v),
            Value::Vector(v) => Value::Vector(-v),
            Value::Jet(v) => Value::Jet(-v),
            Value::JetVector(v) => Value::JetVector(-v),
            Value::Grad(v) => Value::Grad(-v),
            Value::GradVector(v) => Value::GradVector(-v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(v) => write!(f, "{v}"),
            Value::Vector(v) => write!(f, "{v}"),
            Value::Jet(v) => write!(f, "{v}"),
            Value::JetVector(v) => write!(f, "{v}"),
            Value::Grad(v) => write!(f, "{v}"),
            Value::GradVector(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<RealVector> for Value {
    fn from(v: RealVector) -> Self {
        Value::Vector(v)
    }
}

impl From<Jet1D> for Value {
    fn from(v: Jet1D) -> Self {
        Value::Jet(v)
    }
}

impl From<Jet1DVector> for Value {
    fn from(v: Jet1DVector) -> Self {
        Value::JetVector(v)
    }
}

impl From<JetGrad> for Value {
    fn from(v: JetGrad) -> Self {
        Value::Grad(v)
    }
}

impl From<JetGradVector> for Value {
    fn from(v: JetGradVector) -> Self {
        Value::GradVector(v)
    }
}

/// Which derivatives a value carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Real,
    Jet,
    Grad,
}

impl Family {
    /// The narrowest family both operands can be promoted to.
    pub fn join(self, other: Family) -> Result<Family, EvalError> {
        match (self, other) {
            (Family::Real, f) | (f, Family::Real) => Ok(f),
            (a, b) if a == b => Ok(a),
            _ => Err(EvalError::TypeMismatch(
                "cannot combine derivatives in t with derivatives in p".to_string(),
            )),
        }
    }
}

/// Binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Cross product of vectors, power of scalars
    Caret,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Caret => "^",
        };
        f.write_str(symbol)
    }
}

/// A value of one family, split by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Operand<S> {
    Scalar(S),
    Vector(Vector3<S>),
}

/// Moves values in and out of one family's scalar type.
pub(crate) trait Lift: Scalar {
    /// Promotes `value` into this family.
    fn lift(value: Value) -> Result<Operand<Self>, EvalError>;
    fn scalar(s: Self) -> Value;
    fn vector(v: Vector3<Self>) -> Value;
}

impl Lift for f64 {
    fn lift(value: Value) -> Result<Operand<Self>, EvalError> {
        match value {
            Value::Real(v) => Ok(Operand::Scalar(v)),
            Value::Vector(v) => Ok(Operand::Vector(v)),
            other => Err(not_liftable(other, "real")),
        }
    }

    fn scalar(s: Self) -> Value {
        Value::Real(s)
    }

    fn vector(v: Vector3<Self>) -> Value {
        Value::Vector(v)
    }
}

impl Lift for Jet1D {
    fn lift(value: Value) -> Result<Operand<Self>, EvalError> {
        match value {
            Value::Real(v) => Ok(Operand::Scalar(Jet1D::constant(v))),
            Value::Vector(v) => Ok(Operand::Vector(Vector3::from_real(v))),
            Value::Jet(v) => Ok(Operand::Scalar(v)),
            Value::JetVector(v) => Ok(Operand::Vector(v)),
            other => Err(not_liftable(other, "Jet1D")),
        }
    }

    fn scalar(s: Self) -> Value {
        Value::Jet(s)
    }

    fn vector(v: Vector3<Self>) -> Value {
        Value::JetVector(v)
    }
}

impl Lift for JetGrad {
    fn lift(value: Value) -> Result<Operand<Self>, EvalError> {
        match value {
            Value::Real(v) => Ok(Operand::Scalar(JetGrad::constant(v))),
            Value::Vector(v) => Ok(Operand::Vector(Vector3::from_real(v))),
            Value::Grad(v) => Ok(Operand::Scalar(v)),
            Value::GradVector(v) => Ok(Operand::Vector(v)),
            other => Err(not_liftable(other, "JetGrad")),
        }
    }

    fn scalar(s: Self) -> Value {
        Value::Grad(s)
    }

    fn vector(v: Vector3<Self>) -> Value {
        Value::GradVector(v)
    }
}

fn not_liftable(value: Value, family: &str) -> EvalError {
    EvalError::TypeMismatch(format!("cannot use {} as a {family} value", value.kind()))
}

fn apply<S: Lift>(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let result = match (op, S::lift(lhs)?, S::lift(rhs)?) {
        (BinaryOp::Add, Operand::Scalar(a), Operand::Scalar(b)) => S::scalar(a + b),
        (BinaryOp::Add, Operand::Vector(a), Operand::Vector(b)) => S::vector(a + b),
        (BinaryOp::Sub, Operand::Scalar(a), Operand::Scalar(b)) => S::scalar(a - b),
        (BinaryOp::Sub, Operand::Vector(a), Operand::Vector(b)) => S::vector(a - b),
        (BinaryOp::Mul, Operand::Scalar(a), Operand::Scalar(b)) => S::scalar(a * b),
        (BinaryOp::Mul, Operand::Scalar(a), Operand::Vector(b)) => S::vector(b.map(|c| a * c)),
        (BinaryOp::Mul, Operand::Vector(a), Operand::Scalar(b)) => S::vector(a * b),
        (BinaryOp::Mul, Operand::Vector(a), Operand::Vector(b)) => S::scalar(a * b),
        (BinaryOp::Div, Operand::Scalar(a), Operand::Scalar(b)) => S::scalar(a / b),
        (BinaryOp::Div, Operand::Vector(a), Operand::Scalar(b)) => S::vector(a / b),
        (BinaryOp::Caret, Operand::Scalar(a), Operand::Scalar(b)) => S::scalar(a.pow(b)),
        (BinaryOp::Caret, Operand::Vector(a), Operand::Vector(b)) => S::vector(a ^ b),
        _ => {
            return Err(EvalError::TypeMismatch(format!(
                "operator '{op}' is not defined for {} and {}",
                lhs.kind(),
                rhs.kind()
            )))
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Value {
        Value::Vector(RealVector::new(x, y, z))
    }

    #[test]
    fn test_real_arithmetic() {
        let r = Value::binary(BinaryOp::Add, Value::Real(1.0), Value::Real(2.0)).unwrap();
        assert_eq!(r, Value::Real(3.0));
        let r = Value::binary(BinaryOp::Caret, Value::Real(2.0), Value::Real(10.0)).unwrap();
        assert_eq!(r, Value::Real(1024.0));
        let r = Value::binary(BinaryOp::Div, Value::Real(1.0), Value::Real(0.0)).unwrap();
        assert_eq!(r, Value::Real(f64::INFINITY));
    }

    #[test]
    fn test_vector_operators() {
        let a = v(1.0, 0.0, 0.0);
        let b = v(0.0, 1.0, 0.0);
        assert_eq!(Value::binary(BinaryOp::Caret, a, b).unwrap(), v(0.0, 0.0, 1.0));
        assert_eq!(Value::binary(BinaryOp::Mul, a, b).unwrap(), Value::Real(0.0));
        assert_eq!(
            Value::binary(BinaryOp::Mul, Value::Real(2.0), a).unwrap(),
            v(2.0, 0.0, 0.0)
        );
        assert_eq!(
            Value::binary(BinaryOp::Div, a, Value::Real(2.0)).unwrap(),
            v(0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn test_undefined_operators() {
        let a = v(1.0, 2.0, 3.0);
        for (op, lhs, rhs) in [
            (BinaryOp::Div, a, a),
            (BinaryOp::Div, Value::Real(1.0), a),
            (BinaryOp::Add, Value::Real(1.0), a),
            (BinaryOp::Caret, a, Value::Real(2.0)),
        ] {
            let err = Value::binary(op, lhs, rhs).unwrap_err();
            assert!(matches!(err, EvalError::TypeMismatch(_)), "{op} {lhs:?} {rhs:?}");
        }
    }

    #[test]
    fn test_real_promotes_into_jet() {
        let t = Value::Jet(Jet1D::variable(3.0));
        let r = Value::binary(BinaryOp::Mul, Value::Real(2.0), t).unwrap();
        assert_eq!(r, Value::Jet(Jet1D::new(6.0, 2.0, 0.0)));

        let r = Value::binary(BinaryOp::Caret, t, Value::Real(2.0)).unwrap();
        assert_eq!(r, Value::Jet(Jet1D::new(9.0, 6.0, 2.0)));

        let r = Value::binary(BinaryOp::Add, v(1.0, 1.0, 1.0), Value::binary(BinaryOp::Mul, t, v(0.0, 0.0, 1.0)).unwrap())
            .unwrap();
        let Value::JetVector(curve) = r else {
            panic!("expected a Jet1DVector");
        };
        assert_eq!(curve.value(), RealVector::new(1.0, 1.0, 4.0));
        assert_eq!(curve.d1(), RealVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_jet_families_do_not_mix() {
        let t = Value::Jet(Jet1D::variable(1.0));
        let g = Value::Grad(JetGrad::constant(1.0));
        let err = Value::binary(BinaryOp::Add, t, g).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch(_)));
        assert_eq!(Family::Real.join(Family::Grad).unwrap(), Family::Grad);
        assert!(Family::Jet.join(Family::Grad).is_err());
    }

    #[test]
    fn test_field_cross_constant_axis() {
        let p = Value::GradVector(JetGradVector::variable(RealVector::new(1.0, 2.0, 3.0)));
        let r = Value::binary(BinaryOp::Caret, p, v(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            r.to_string(),
            "f(p) = [2, -1, 0], div f(p) = 0, curl f(p) = [0, 0, -2]"
        );
    }

    #[test]
    fn test_negation_and_display() {
        assert_eq!(-Value::Real(2.0), Value::Real(-2.0));
        assert_eq!((-v(1.0, 2.0, 3.0)).to_string(), "[-1, -2, -3]");
        assert_eq!(Value::Real(0.5).to_string(), "0.5");
        assert_eq!(Value::Jet(Jet1D::variable(2.0)).kind(), "Jet1D");
    }
}
