//! Vector fields with a derivable divergence and curl.
//!
//! A [`JetGradVector`] holds three [`JetGrad`] components. Their gradients are the
//! rows of the field's Jacobian at the evaluation point, which is all that is
//! needed for `div` (the trace) and `curl` (the antisymmetric part).
//!
//! # Example
//!
//! ```
//! use evalexpr_jet::{JetGradVector, RealVector};
//!
//! let p = JetGradVector::variable(RealVector::new(1.0, 2.0, 3.0));
//! assert_eq!(p.value(), RealVector::new(1.0, 2.0, 3.0));
//! assert_eq!(p.div(), 3.0);
//! assert_eq!(p.curl(), RealVector::zero());
//! ```

use std::fmt;

use crate::grad::JetGrad;
use crate::vector::{impl_mixed_vector_ops, RealVector, Vector3};

pub type JetGradVector = Vector3<JetGrad>;

impl Vector3<JetGrad> {
    /// The identity field at `p`, whose Jacobian is the identity matrix.
    pub fn variable(p: RealVector) -> Self {
        Self::new(
            JetGrad::new(p.x, RealVector::new(1.0, 0.0, 0.0)),
            JetGrad::new(p.y, RealVector::new(0.0, 1.0, 0.0)),
            JetGrad::new(p.z, RealVector::new(0.0, 0.0, 1.0)),
        )
    }

    /// `F(p)`.
    pub fn value(&self) -> RealVector {
        self.map(|c| c.value)
    }

    /// Rows of the Jacobian: `[∇F_x, ∇F_y, ∇F_z]`.
    pub fn jacobian(&self) -> [RealVector; 3] {
        [self.x.grad, self.y.grad, self.z.grad]
    }

    /// Divergence, the trace of the Jacobian.
    pub fn div(&self) -> f64 {
        self.x.grad.x + self.y.grad.y + self.z.grad.z
    }

    pub fn curl(&self) -> RealVector {
        RealVector::new(
            self.z.grad.y - self.y.grad.z,
            self.x.grad.z - self.z.grad.x,
            self.y.grad.x - self.x.grad.y,
        )
    }
}

impl_mixed_vector_ops!(JetGrad);

impl fmt::Display for JetGradVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "f(p) = {}, div f(p) = {}, curl f(p) = {}",
            self.value(),
            self.div(),
            self.curl()
        )
    }
}
