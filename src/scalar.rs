//! The scalar vocabulary shared by plain reals and jets.
//!
//! [`Scalar`] is implemented for `f64`, [`Jet1D`](crate::jet::Jet1D) and
//! [`JetGrad`](crate::grad::JetGrad). Generic code written against it (vector
//! algebra in [`crate::vector`], builtin dispatch in the evaluator) works the same
//! with or without derivative tracking.
//!
//! Domain errors are never reported: every function follows IEEE-754 and yields
//! `NaN` or `±∞` where the real function is undefined.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A real-like number with the elementary functions of the jet vocabulary.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Promotes a bare real to a constant (all derivative terms zero).
    fn from_real(value: f64) -> Self;

    /// The primal value, with derivative information dropped.
    fn real(self) -> f64;

    fn inverse(self) -> Self;
    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    /// `self` raised to a scalar exponent of the same kind.
    fn pow(self, exponent: Self) -> Self;
    /// `self` raised to a constant real exponent.
    fn powf(self, exponent: f64) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn abs(self) -> Self;
}

impl Scalar for f64 {
    fn from_real(value: f64) -> Self {
        value
    }
    fn real(self) -> f64 {
        self
    }
    fn inverse(self) -> Self {
        1.0 / self
    }
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    fn exp(self) -> Self {
        f64::exp(self)
    }
    fn ln(self) -> Self {
        f64::ln(self)
    }
    fn pow(self, exponent: Self) -> Self {
        f64::powf(self, exponent)
    }
    fn powf(self, exponent: f64) -> Self {
        f64::powf(self, exponent)
    }
    fn sin(self) -> Self {
        f64::sin(self)
    }
    fn cos(self) -> Self {
        f64::cos(self)
    }
    fn tan(self) -> Self {
        f64::tan(self)
    }
    fn asin(self) -> Self {
        f64::asin(self)
    }
    fn acos(self) -> Self {
        f64::acos(self)
    }
    fn atan(self) -> Self {
        f64::atan(self)
    }
    fn sinh(self) -> Self {
        f64::sinh(self)
    }
    fn cosh(self) -> Self {
        f64::cosh(self)
    }
    fn tanh(self) -> Self {
        f64::tanh(self)
    }
    fn abs(self) -> Self {
        f64::abs(self)
    }
}

/// Implements [`Scalar`] for a jet type by delegating to its inherent methods.
macro_rules! impl_scalar_for_jet {
    ($T:ty) => {
        impl $crate::scalar::Scalar for $T {
            fn from_real(value: f64) -> Self {
                <$T>::constant(value)
            }
            fn real(self) -> f64 {
                self.value
            }
            fn inverse(self) -> Self {
                <$T>::inverse(self)
            }
            fn sqrt(self) -> Self {
                <$T>::sqrt(self)
            }
            fn exp(self) -> Self {
                <$T>::exp(self)
            }
            fn ln(self) -> Self {
                <$T>::ln(self)
            }
            fn pow(self, exponent: Self) -> Self {
                <$T>::pow(self, exponent)
            }
            fn powf(self, exponent: f64) -> Self {
                <$T>::powf(self, exponent)
            }
            fn sin(self) -> Self {
                <$T>::sin(self)
            }
            fn cos(self) -> Self {
                <$T>::cos(self)
            }
            fn tan(self) -> Self {
                <$T>::tan(self)
            }
            fn asin(self) -> Self {
                <$T>::asin(self)
            }
            fn acos(self) -> Self {
                <$T>::acos(self)
            }
            fn atan(self) -> Self {
                <$T>::atan(self)
            }
            fn sinh(self) -> Self {
                <$T>::sinh(self)
            }
            fn cosh(self) -> Self {
                <$T>::cosh(self)
            }
            fn tanh(self) -> Self {
                <$T>::tanh(self)
            }
            fn abs(self) -> Self {
                <$T>::abs(self)
            }
        }
    };
}

pub(crate) use impl_scalar_for_jet;
