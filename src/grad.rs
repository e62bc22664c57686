//! First-order jets over up to three independent variables.
//!
//! A [`JetGrad`] is a value together with its gradient at the evaluation point.
//! Every rule below is the first-order truncation of the corresponding [`Jet1D`]
//! rule, applied to the whole gradient vector at once.
//!
//! [`Jet1D`]: crate::jet::Jet1D

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::vector::RealVector;

/// `f(p)` and `∇f(p)`.
///
/// There is intentionally no scalar `variable` constructor: a lone real does not say
/// which axis it seeds. Use [`JetGradVector::variable`](crate::grad_vector::JetGradVector)
/// or [`JetGrad::new`] with an explicit gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JetGrad {
    pub value: f64,
    pub grad: RealVector,
}

impl JetGrad {
    pub const fn new(value: f64, grad: RealVector) -> Self {
        Self { value, grad }
    }

    /// Promotes a real to a constant with zero gradient.
    pub const fn constant(value: f64) -> Self {
        Self::new(value, RealVector::new(0.0, 0.0, 0.0))
    }

    pub fn inverse(self) -> Self {
        Self::new(1.0 / self.value, -self.grad / (self.value * self.value))
    }

    pub fn sqrt(self) -> Self {
        let r = self.value.sqrt();
        Self::new(r, 0.5 * self.grad / r)
    }

    pub fn exp(self) -> Self {
        let e = self.value.exp();
        Self::new(e, e * self.grad)
    }

    pub fn ln(self) -> Self {
        Self::new(self.value.ln(), self.grad / self.value)
    }

    /// `exp(b * ln(a))`, valid for a positive base.
    pub fn pow(self, exponent: JetGrad) -> Self {
        (exponent * self.ln()).exp()
    }

    pub fn powf(self, exponent: f64) -> Self {
        let pow = self.value.powf(exponent);
        Self::new(pow, exponent * pow / self.value * self.grad)
    }

    pub fn sin(self) -> Self {
        let (sin, cos) = self.value.sin_cos();
        Self::new(sin, cos * self.grad)
    }

    pub fn cos(self) -> Self {
        let (sin, cos) = self.value.sin_cos();
        Self::new(cos, -sin * self.grad)
    }

    pub fn tan(self) -> Self {
        let tan = self.value.tan();
        Self::new(tan, (1.0 + tan * tan) * self.grad)
    }

    pub fn asin(self) -> Self {
        Self::new(
            self.value.asin(),
            self.grad / (1.0 - self.value * self.value).sqrt(),
        )
    }

    pub fn acos(self) -> Self {
        Self::new(
            self.value.acos(),
            -self.grad / (1.0 - self.value * self.value).sqrt(),
        )
    }

    pub fn atan(self) -> Self {
        Self::new(self.value.atan(), self.grad / (1.0 + self.value * self.value))
    }

    pub fn sinh(self) -> Self {
        Self::new(self.value.sinh(), self.value.cosh() * self.grad)
    }

    pub fn cosh(self) -> Self {
        Self::new(self.value.cosh(), self.value.sinh() * self.grad)
    }

    pub fn tanh(self) -> Self {
        let tanh = self.value.tanh();
        Self::new(tanh, (1.0 - tanh * tanh) * self.grad)
    }

    /// Sign branch; zero takes the positive branch.
    pub fn abs(self) -> Self {
        if self.value >= 0.0 {
            self
        } else {
            -self
        }
    }
}

crate::scalar::impl_scalar_for_jet!(JetGrad);

impl fmt::Display for JetGrad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(p) = {}, grad f(p) = {}", self.value, self.grad)
    }
}

impl Neg for JetGrad {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value, -self.grad)
    }
}

impl Add for JetGrad {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.grad + rhs.grad)
    }
}

impl Sub for JetGrad {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value, self.grad - rhs.grad)
    }
}

/// Product rule on the gradient.
impl Mul for JetGrad {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.grad * rhs.value + rhs.grad * self.value,
        )
    }
}

impl Div for JetGrad {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl Add<f64> for JetGrad {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::new(self.value + rhs, self.grad)
    }
}

impl Add<JetGrad> for f64 {
    type Output = JetGrad;

    fn add(self, rhs: JetGrad) -> JetGrad {
        rhs + self
    }
}

impl Sub<f64> for JetGrad {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::new(self.value - rhs, self.grad)
    }
}

impl Sub<JetGrad> for f64 {
    type Output = JetGrad;

    fn sub(self, rhs: JetGrad) -> JetGrad {
        JetGrad::new(self - rhs.value, -rhs.grad)
    }
}

impl Mul<f64> for JetGrad {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.grad * rhs)
    }
}

impl Mul<JetGrad> for f64 {
    type Output = JetGrad;

    fn mul(self, rhs: JetGrad) -> JetGrad {
        JetGrad::new(self * rhs.value, self * rhs.grad)
    }
}

impl Div<f64> for JetGrad {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self * (1.0 / rhs)
    }
}

impl Div<JetGrad> for f64 {
    type Output = JetGrad;

    fn div(self, rhs: JetGrad) -> JetGrad {
        self * rhs.inverse()
    }
}
