//! Second-order jets of a single parameter.
//!
//! A [`Jet1D`] carries `f(t)`, `f'(t)` and `f''(t)` for a scalar function of one real
//! parameter `t`. Every operation applies the chain, product and quotient rules to
//! all three terms, so composing operations composes derivatives.
//!
//! # Example
//!
//! ```
//! use evalexpr_jet::Jet1D;
//!
//! let t = Jet1D::variable(3.0);
//! let y = t.powf(2.0);
//!
//! assert_eq!(y.value, 9.0);
//! assert_eq!(y.d1, 6.0);
//! assert_eq!(y.d2, 2.0);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// `f(t), f'(t), f''(t)` at an implicit evaluation point `t`.
///
/// Both operands of a binary operation are assumed to share the same `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet1D {
    /// f(t)
    pub value: f64,
    /// f'(t)
    pub d1: f64,
    /// f''(t)
    pub d2: f64,
}

impl Jet1D {
    pub const fn new(value: f64, d1: f64, d2: f64) -> Self {
        Self { value, d1, d2 }
    }

    /// Promotes a real to a constant jet `(c, 0, 0)`.
    pub const fn constant(value: f64) -> Self {
        Self::new(value, 0.0, 0.0)
    }

    /// The identity function of the parameter, `(t, 1, 0)`.
    pub const fn variable(value: f64) -> Self {
        Self::new(value, 1.0, 0.0)
    }

    /// `1 / a`.
    pub fn inverse(self) -> Self {
        let v2 = self.value * self.value;
        Self::new(
            1.0 / self.value,
            -self.d1 / v2,
            (2.0 * self.d1 * self.d1 / self.value - self.d2) / v2,
        )
    }

    pub fn sqrt(self) -> Self {
        let r = self.value.sqrt();
        Self::new(
            r,
            0.5 * self.d1 / r,
            0.5 * self.d2 / r - 0.25 * self.d1 * self.d1 / (self.value * r),
        )
    }

    pub fn exp(self) -> Self {
        let e = self.value.exp();
        Self::new(e, e * self.d1, e * (self.d2 + self.d1 * self.d1))
    }

    /// Natural logarithm.
    pub fn ln(self) -> Self {
        Self::new(
            self.value.ln(),
            self.d1 / self.value,
            (self.d2 - self.d1 * self.d1 / self.value) / self.value,
        )
    }

    /// `a^b` for a jet exponent, computed as `exp(b * ln(a))`. Only meaningful for
    /// a positive base.
    pub fn pow(self, exponent: Jet1D) -> Self {
        (exponent * self.ln()).exp()
    }

    /// `a^b` for a constant real exponent.
    pub fn powf(self, exponent: f64) -> Self {
        let pow = self.value.powf(exponent);
        let frac = self.d1 / self.value;
        Self::new(
            pow,
            exponent * pow * frac,
            exponent * pow * (self.d2 / self.value + (exponent - 1.0) * frac * frac),
        )
    }

    pub fn sin(self) -> Self {
        let (sin, cos) = self.value.sin_cos();
        Self::new(sin, cos * self.d1, cos * self.d2 - sin * self.d1 * self.d1)
    }

    pub fn cos(self) -> Self {
        let (sin, cos) = self.value.sin_cos();
        Self::new(cos, -sin * self.d1, -sin * self.d2 - cos * self.d1 * self.d1)
    }

    pub fn tan(self) -> Self {
        let tan = self.value.tan();
        let sec2 = 1.0 + tan * tan;
        Self::new(
            tan,
            sec2 * self.d1,
            sec2 * (self.d2 + 2.0 * tan * self.d1 * self.d1),
        )
    }

    pub fn asin(self) -> Self {
        let k = 1.0 / (1.0 - self.value * self.value).sqrt();
        let kd = self.d1 * k;
        Self::new(
            self.value.asin(),
            kd,
            (self.d2 + self.value * kd * kd) * k,
        )
    }

    pub fn acos(self) -> Self {
        let k = 1.0 / (1.0 - self.value * self.value).sqrt();
        let kd = self.d1 * k;
        Self::new(
            self.value.acos(),
            -kd,
            -(self.d2 + self.value * kd * kd) * k,
        )
    }

    pub fn atan(self) -> Self {
        let k = 1.0 / (1.0 + self.value * self.value);
        let kd = self.d1 * k;
        Self::new(
            self.value.atan(),
            kd,
            self.d2 * k - 2.0 * self.value * kd * kd,
        )
    }

    pub fn sinh(self) -> Self {
        let (sinh, cosh) = (self.value.sinh(), self.value.cosh());
        Self::new(sinh, cosh * self.d1, cosh * self.d2 + sinh * self.d1 * self.d1)
    }

    pub fn cosh(self) -> Self {
        let (sinh, cosh) = (self.value.sinh(), self.value.cosh());
        Self::new(cosh, sinh * self.d1, sinh * self.d2 + cosh * self.d1 * self.d1)
    }

    pub fn tanh(self) -> Self {
        let tanh = self.value.tanh();
        let sech2 = 1.0 - tanh * tanh;
        Self::new(
            tanh,
            sech2 * self.d1,
            sech2 * (self.d2 - 2.0 * tanh * self.d1 * self.d1),
        )
    }

    /// `a` when `a.value >= 0`, otherwise `-a`. Zero takes the positive branch.
    pub fn abs(self) -> Self {
        if self.value >= 0.0 {
            self
        } else {
            -self
        }
    }
}

crate::scalar::impl_scalar_for_jet!(Jet1D);

impl fmt::Display for Jet1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(t) = {}, f'(t) = {}, f\"(t) = {}", self.value, self.d1, self.d2)
    }
}

impl Neg for Jet1D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value, -self.d1, -self.d2)
    }
}

impl Add for Jet1D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.d1 + rhs.d1, self.d2 + rhs.d2)
    }
}

impl Sub for Jet1D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value, self.d1 - rhs.d1, self.d2 - rhs.d2)
    }
}

/// Leibniz rule: `(ab)'' = a b'' + 2 a' b' + a'' b`.
impl Mul for Jet1D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.d1 * rhs.value + rhs.d1 * self.value,
            self.value * rhs.d2 + 2.0 * self.d1 * rhs.d1 + self.d2 * rhs.value,
        )
    }
}

impl Div for Jet1D {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl Add<f64> for Jet1D {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::new(self.value + rhs, self.d1, self.d2)
    }
}

impl Add<Jet1D> for f64 {
    type Output = Jet1D;

    fn add(self, rhs: Jet1D) -> Jet1D {
        rhs + self
    }
}

impl Sub<f64> for Jet1D {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::new(self.value - rhs, self.d1, self.d2)
    }
}

impl Sub<Jet1D> for f64 {
    type Output = Jet1D;

    fn sub(self, rhs: Jet1D) -> Jet1D {
        Jet1D::new(self - rhs.value, -rhs.d1, -rhs.d2)
    }
}

impl Mul<f64> for Jet1D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.d1 * rhs, self.d2 * rhs)
    }
}

impl Mul<Jet1D> for f64 {
    type Output = Jet1D;

    fn mul(self, rhs: Jet1D) -> Jet1D {
        Jet1D::new(self * rhs.value, self * rhs.d1, self * rhs.d2)
    }
}

impl Div<f64> for Jet1D {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self * (1.0 / rhs)
    }
}

impl Div<Jet1D> for f64 {
    type Output = Jet1D;

    fn div(self, rhs: Jet1D) -> Jet1D {
        self * rhs.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_jet_eq(actual: Jet1D, expected: Jet1D) {
        assert_abs_diff_eq!(actual.value, expected.value, epsilon = 1e-12);
        assert_abs_diff_eq!(actual.d1, expected.d1, epsilon = 1e-12);
        assert_abs_diff_eq!(actual.d2, expected.d2, epsilon = 1e-12);
    }

    #[test]
    fn test_promotion_and_seed() {
        assert_eq!(Jet1D::constant(2.5), Jet1D::new(2.5, 0.0, 0.0));
        assert_eq!(Jet1D::variable(2.5), Jet1D::new(2.5, 1.0, 0.0));
    }

    #[test]
    fn test_sin_at_two() {
        let y = Jet1D::variable(2.0).sin();
        assert_abs_diff_eq!(y.value, 0.909297, epsilon = 1e-6);
        assert_abs_diff_eq!(y.d1, -0.416147, epsilon = 1e-6);
        assert_abs_diff_eq!(y.d2, -0.909297, epsilon = 1e-6);
    }

    #[test]
    fn test_powf_and_inverse() {
        assert_eq!(Jet1D::variable(3.0).powf(2.0), Jet1D::new(9.0, 6.0, 2.0));
        assert_eq!(Jet1D::variable(4.0).inverse(), Jet1D::new(0.25, -0.0625, 0.03125));
    }

    #[test]
    fn test_polynomial() {
        // f(t) = t^3 - 2t + 1 at t = 2: f = 5, f' = 3t^2 - 2 = 10, f'' = 6t = 12
        let t = Jet1D::variable(2.0);
        let f = t * t * t - 2.0 * t + 1.0;
        assert_eq!(f, Jet1D::new(5.0, 10.0, 12.0));
    }

    #[test]
    fn test_product_quotient_consistency() {
        let t = Jet1D::variable(0.7);
        let a = t.sin() + 2.0;
        let b = t.exp() * t;
        assert_jet_eq((a * b) / b, a);
    }

    #[test]
    fn test_pow_matches_exp_ln() {
        let t = Jet1D::variable(1.3);
        let a = t * t + 1.0;
        let b = t.cos();
        assert_jet_eq(a.pow(b), (b * a.ln()).exp());
        // constant jet exponent agrees with the closed form
        assert_jet_eq(a.pow(Jet1D::constant(2.5)), a.powf(2.5));
    }

    #[test]
    fn test_sqrt_squared() {
        let t = Jet1D::variable(1.7);
        let a = t * t * t + t;
        let r = a.sqrt();
        assert_jet_eq(r * r, a);
    }

    #[test]
    fn test_trig_derivatives() {
        let x = 0.4;
        let t = Jet1D::variable(x);

        let sec2 = 1.0 / (x.cos() * x.cos());
        assert_jet_eq(t.tan(), Jet1D::new(x.tan(), sec2, 2.0 * sec2 * x.tan()));

        let c = t.cos();
        assert_jet_eq(c, Jet1D::new(x.cos(), -x.sin(), -x.cos()));

        // d/dx asin = (1-x^2)^(-1/2), d2 = x (1-x^2)^(-3/2)
        let s = 1.0 - x * x;
        assert_jet_eq(t.asin(), Jet1D::new(x.asin(), s.powf(-0.5), x * s.powf(-1.5)));
        assert_jet_eq(t.acos(), Jet1D::new(x.acos(), -s.powf(-0.5), -x * s.powf(-1.5)));

        // d/dx atan = 1/(1+x^2), d2 = -2x/(1+x^2)^2
        let q = 1.0 + x * x;
        assert_jet_eq(t.atan(), Jet1D::new(x.atan(), 1.0 / q, -2.0 * x / (q * q)));
    }

    #[test]
    fn test_hyperbolic_derivatives() {
        let x = -0.8;
        let t = Jet1D::variable(x);
        assert_jet_eq(t.sinh(), Jet1D::new(x.sinh(), x.cosh(), x.sinh()));
        assert_jet_eq(t.cosh(), Jet1D::new(x.cosh(), x.sinh(), x.cosh()));

        let sech2 = 1.0 - x.tanh() * x.tanh();
        assert_jet_eq(t.tanh(), Jet1D::new(x.tanh(), sech2, -2.0 * x.tanh() * sech2));
    }

    #[test]
    fn test_exp_ln_roundtrip_derivatives() {
        let t = Jet1D::variable(0.3);
        let f = (t * 2.0).exp().ln();
        assert_jet_eq(f, Jet1D::new(0.6, 2.0, 0.0));
    }

    #[test]
    fn test_abs_branches() {
        let t = Jet1D::variable(-1.5);
        assert_eq!(t.abs(), Jet1D::new(1.5, -1.0, -0.0));
        // zero takes the positive branch
        assert_eq!(Jet1D::variable(0.0).abs(), Jet1D::variable(0.0));
    }

    #[test]
    fn test_mixed_real_operands() {
        let t = Jet1D::variable(2.0);
        assert_eq!(1.0 - t, Jet1D::new(-1.0, -1.0, 0.0));
        assert_eq!(t - 1.0, Jet1D::new(1.0, 1.0, 0.0));
        assert_eq!(3.0 + t, t + 3.0);
        assert_eq!(t / 2.0, Jet1D::new(1.0, 0.5, 0.0));
        assert_eq!(1.0 / t, t.inverse());
    }

    #[test]
    fn test_domain_errors_propagate() {
        let y = Jet1D::variable(-1.0).sqrt();
        assert!(y.value.is_nan());
        assert!(y.d1.is_nan());

        let z = Jet1D::variable(0.0).inverse();
        assert_eq!(z.value, f64::INFINITY);
        assert_eq!(z.d1, f64::NEG_INFINITY);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Jet1D::new(9.0, 6.0, 2.0).to_string(),
            "f(t) = 9, f'(t) = 6, f\"(t) = 2"
        );
    }
}
