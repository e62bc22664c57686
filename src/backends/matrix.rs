//! Jacobians of vector fields as ndarray or nalgebra matrices.
//!
//! Row `i` of the matrix is the gradient of component `i` of the field, so entry
//! `(i, j)` is `∂F_i/∂p_j`.

#[cfg(any(feature = "ndarray", feature = "nalgebra"))]
use crate::grad::JetGrad;
#[cfg(any(feature = "ndarray", feature = "nalgebra"))]
use crate::vector::Vector3;

#[cfg(feature = "nalgebra")]
impl Vector3<JetGrad> {
    /// The Jacobian as a nalgebra matrix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use evalexpr_jet::{JetGradVector, RealVector};
    ///
    /// let p = JetGradVector::variable(RealVector::new(1.0, 2.0, 3.0));
    /// assert_eq!(p.jacobian_matrix(), nalgebra::Matrix3::identity());
    /// ```
    pub fn jacobian_matrix(&self) -> nalgebra::Matrix3<f64> {
        let [x, y, z] = self.jacobian();
        nalgebra::Matrix3::new(x.x, x.y, x.z, y.x, y.y, y.z, z.x, z.y, z.z)
    }
}

#[cfg(feature = "ndarray")]
impl Vector3<JetGrad> {
    /// The Jacobian as a 3x3 ndarray.
    pub fn jacobian_array(&self) -> ndarray::Array2<f64> {
        let [x, y, z] = self.jacobian();
        ndarray::arr2(&[[x.x, x.y, x.z], [y.x, y.y, y.z], [z.x, z.y, z.z]])
    }
}
