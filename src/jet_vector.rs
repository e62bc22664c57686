//! Jet-valued curves in space.
//!
//! A [`Jet1DVector`] is a [`Vector3`] of [`Jet1D`] components that share one
//! parameter `t`. It describes a point moving along a curve together with its
//! velocity and acceleration.

use std::fmt;

use crate::jet::Jet1D;
use crate::vector::{impl_mixed_vector_ops, RealVector, Vector3};

pub type Jet1DVector = Vector3<Jet1D>;

impl Vector3<Jet1D> {
    /// The position `f(t)`.
    pub fn value(&self) -> RealVector {
        self.map(|c| c.value)
    }

    /// The velocity `f'(t)`.
    pub fn d1(&self) -> RealVector {
        self.map(|c| c.d1)
    }

    /// The acceleration `f''(t)`.
    pub fn d2(&self) -> RealVector {
        self.map(|c| c.d2)
    }
}

impl_mixed_vector_ops!(Jet1D);

impl fmt::Display for Jet1DVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "f(t) = {}, f'(t) = {}, f\"(t) = {}",
            self.value(),
            self.d1(),
            self.d2()
        )
    }
}
