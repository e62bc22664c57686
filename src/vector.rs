//! Three-component vectors over any [`Scalar`].
//!
//! [`Vector3`] is generic so the same linear algebra serves plain points
//! ([`RealVector`]), jet-valued curves ([`Jet1DVector`](crate::jet_vector::Jet1DVector))
//! and vector fields ([`JetGradVector`](crate::grad_vector::JetGradVector)).
//!
//! Operators follow the usual conventions of the jet vocabulary:
//!
//! - `a + b`, `a - b`, `-a`: componentwise
//! - `a * s`, `s * a`, `a / s`: scaling by a scalar
//! - `a * b`: dot product, returns a scalar
//! - `a ^ b`: cross product
//!
//! Mixed operand kinds (a real vector with a jet vector, a jet with a real vector)
//! are implemented per jet family with [`impl_mixed_vector_ops`].

use std::fmt;
use std::ops::{Add, BitXor, Div, Mul, Neg, Sub};

use crate::scalar::Scalar;

/// A vector with three components of scalar type `S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3<S> {
    pub x: S,
    pub y: S,
    pub z: S,
}

/// A plain real 3-vector.
pub type RealVector = Vector3<f64>;

impl<S> Vector3<S> {
    pub const fn new(x: S, y: S, z: S) -> Self {
        Self { x, y, z }
    }

    /// Applies `f` to every component.
    pub fn map<T>(self, f: impl Fn(S) -> T) -> Vector3<T> {
        Vector3::new(f(self.x), f(self.y), f(self.z))
    }
}

impl<S> From<[S; 3]> for Vector3<S> {
    fn from([x, y, z]: [S; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl<S> From<Vector3<S>> for [S; 3] {
    fn from(v: Vector3<S>) -> Self {
        [v.x, v.y, v.z]
    }
}

impl<S: Scalar> Vector3<S> {
    /// The additive identity.
    pub fn zero() -> Self {
        Self::from_real(RealVector::new(0.0, 0.0, 0.0))
    }

    /// Promotes a real vector to a constant vector of this scalar kind.
    pub fn from_real(v: RealVector) -> Self {
        v.map(S::from_real)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> S {
        dot(self, other)
    }

    /// Cross product.
    pub fn cross(self, other: Self) -> Self {
        cross(self, other)
    }

    /// Euclidean length, `sqrt(v * v)`.
    pub fn norm(self) -> S {
        self.dot(self).sqrt()
    }

    /// `self / self.norm()`. A zero vector yields non-finite components.
    pub fn normalize(self) -> Self {
        self / self.norm()
    }
}

/// Dot product over possibly different component kinds.
pub(crate) fn dot<A, B, O>(a: Vector3<A>, b: Vector3<B>) -> O
where
    A: Mul<B, Output = O>,
    O: Add<Output = O>,
{
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Cross product over possibly different component kinds.
pub(crate) fn cross<A, B, O>(a: Vector3<A>, b: Vector3<B>) -> Vector3<O>
where
    A: Mul<B, Output = O> + Copy,
    B: Mul<A, Output = O> + Copy,
    O: Sub<Output = O>,
{
    Vector3::new(
        a.y * b.z - b.y * a.z,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

impl<S: Scalar> Neg for Vector3<S> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<S: Scalar> Add for Vector3<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<S: Scalar> Sub for Vector3<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Scaling by a scalar of the same kind.
impl<S: Scalar> Mul<S> for Vector3<S> {
    type Output = Self;

    fn mul(self, rhs: S) -> Self {
        self.map(|c| c * rhs)
    }
}

impl<S: Scalar> Div<S> for Vector3<S> {
    type Output = Self;

    fn div(self, rhs: S) -> Self {
        self.map(|c| c / rhs)
    }
}

/// Dot product.
impl<S: Scalar> Mul for Vector3<S> {
    type Output = S;

    fn mul(self, rhs: Self) -> S {
        dot(self, rhs)
    }
}

/// Cross product.
impl<S: Scalar> BitXor for Vector3<S> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        cross(self, rhs)
    }
}

impl Mul<RealVector> for f64 {
    type Output = RealVector;

    fn mul(self, rhs: RealVector) -> RealVector {
        rhs.map(|c| self * c)
    }
}

impl fmt::Display for RealVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Operators mixing a jet family `$J` with plain reals and real vectors.
///
/// Every impl is componentwise and reuses the scalar mixed operators of `$J`
/// (`$J op f64` and `f64 op $J`), so the formulas live in one place.
macro_rules! impl_mixed_vector_ops {
    ($J:ty) => {
        impl std::ops::Mul<f64> for $crate::vector::Vector3<$J> {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self {
                self.map(|c| c * rhs)
            }
        }

        impl std::ops::Mul<$crate::vector::Vector3<$J>> for f64 {
            type Output = $crate::vector::Vector3<$J>;

            fn mul(self, rhs: $crate::vector::Vector3<$J>) -> Self::Output {
                rhs.map(|c| self * c)
            }
        }

        impl std::ops::Div<f64> for $crate::vector::Vector3<$J> {
            type Output = Self;

            fn div(self, rhs: f64) -> Self {
                self.map(|c| c / rhs)
            }
        }

        impl std::ops::Mul<$crate::vector::Vector3<$J>> for $J {
            type Output = $crate::vector::Vector3<$J>;

            fn mul(self, rhs: $crate::vector::Vector3<$J>) -> Self::Output {
                rhs.map(|c| self * c)
            }
        }

        impl std::ops::Mul<$crate::vector::RealVector> for $J {
            type Output = $crate::vector::Vector3<$J>;

            fn mul(self, rhs: $crate::vector::RealVector) -> Self::Output {
                rhs.map(|c| self * c)
            }
        }

        impl std::ops::Mul<$J> for $crate::vector::RealVector {
            type Output = $crate::vector::Vector3<$J>;

            fn mul(self, rhs: $J) -> Self::Output {
                self.map(|c| c * rhs)
            }
        }

        impl std::ops::Div<$J> for $crate::vector::RealVector {
            type Output = $crate::vector::Vector3<$J>;

            fn div(self, rhs: $J) -> Self::Output {
                self.map(|c| c / rhs)
            }
        }

        impl std::ops::Add<$crate::vector::RealVector> for $crate::vector::Vector3<$J> {
            type Output = Self;

            fn add(self, rhs: $crate::vector::RealVector) -> Self {
                Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
            }
        }

        impl std::ops::Add<$crate::vector::Vector3<$J>> for $crate::vector::RealVector {
            type Output = $crate::vector::Vector3<$J>;

            fn add(self, rhs: $crate::vector::Vector3<$J>) -> Self::Output {
                rhs + self
            }
        }

        impl std::ops::Sub<$crate::vector::RealVector> for $crate::vector::Vector3<$J> {
            type Output = Self;

            fn sub(self, rhs: $crate::vector::RealVector) -> Self {
                Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
            }
        }

        impl std::ops::Sub<$crate::vector::Vector3<$J>> for $crate::vector::RealVector {
            type Output = $crate::vector::Vector3<$J>;

            fn sub(self, rhs: $crate::vector::Vector3<$J>) -> Self::Output {
                $crate::vector::Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
            }
        }

        impl std::ops::Mul<$crate::vector::RealVector> for $crate::vector::Vector3<$J> {
            type Output = $J;

            fn mul(self, rhs: $crate::vector::RealVector) -> $J {
                $crate::vector::dot(self, rhs)
            }
        }

        impl std::ops::Mul<$crate::vector::Vector3<$J>> for $crate::vector::RealVector {
            type Output = $J;

            fn mul(self, rhs: $crate::vector::Vector3<$J>) -> $J {
                $crate::vector::dot(self, rhs)
            }
        }

        impl std::ops::BitXor<$crate::vector::RealVector> for $crate::vector::Vector3<$J> {
            type Output = Self;

            fn bitxor(self, rhs: $crate::vector::RealVector) -> Self {
                $crate::vector::cross(self, rhs)
            }
        }

        impl std::ops::BitXor<$crate::vector::Vector3<$J>> for $crate::vector::RealVector {
            type Output = $crate::vector::Vector3<$J>;

            fn bitxor(self, rhs: $crate::vector::Vector3<$J>) -> Self::Output {
                $crate::vector::cross(self, rhs)
            }
        }
    };
}

pub(crate) use impl_mixed_vector_ops;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_norm_and_normalize() {
        let v = RealVector::new(3.0, 4.0, 0.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.normalize(), RealVector::new(0.6, 0.8, 0.0));
        assert_eq!(v.normalize().to_string(), "[0.6, 0.8, 0]");

        let w = RealVector::new(-1.5, 2.0, 7.25);
        assert_abs_diff_eq!(w.normalize().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dot_and_cross() {
        let a = RealVector::new(1.0, 2.0, 3.0);
        let b = RealVector::new(4.0, 5.0, 6.0);
        assert_eq!(a * b, 32.0);
        assert_eq!(a ^ b, RealVector::new(-3.0, 6.0, -3.0));
        // the cross product is orthogonal to both operands
        assert_eq!((a ^ b) * a, 0.0);
        assert_eq!((a ^ b) * b, 0.0);

        let ex = RealVector::new(1.0, 0.0, 0.0);
        let ey = RealVector::new(0.0, 1.0, 0.0);
        assert_eq!(ex ^ ey, RealVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_linear_operators() {
        let a = RealVector::new(1.0, -2.0, 3.0);
        let b = RealVector::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, RealVector::new(1.5, -1.5, 3.5));
        assert_eq!(a - b, RealVector::new(0.5, -2.5, 2.5));
        assert_eq!(-a, RealVector::new(-1.0, 2.0, -3.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(a / 2.0, RealVector::new(0.5, -1.0, 1.5));
        assert_eq!(a + RealVector::zero(), a);
    }

    #[test]
    fn test_zero_vector_normalizes_to_nan() {
        let n = RealVector::zero().normalize();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());

        let inf = RealVector::new(1.0, -1.0, 0.0) / 0.0;
        assert_eq!(inf.x, f64::INFINITY);
        assert_eq!(inf.y, f64::NEG_INFINITY);
        assert!(inf.z.is_nan());
    }

    #[test]
    fn test_display() {
        assert_eq!(RealVector::new(1.0, 2.5, -3.0).to_string(), "[1, 2.5, -3]");
    }
}
