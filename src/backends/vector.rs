//! Vector interop with `Vec`, arrays, ndarray and nalgebra.
//!
//! Two things live here: conversions between [`RealVector`] and the 3-vectors of the
//! optional linear algebra crates, and the [`Samples`] trait, which lets any 1-D
//! container of reals feed [`JetFunction::eval_many`](crate::function::JetFunction::eval_many).

use crate::function::Seed;
#[cfg(feature = "ndarray")]
use crate::errors::EvalError;
use crate::vector::RealVector;

/// A 1-D container of real samples, each one seeding a `t` function.
///
/// # Examples
///
/// ```rust
/// use evalexpr_jet::{Evaluator, Samples};
///
/// let f = Evaluator::new().compile_function("t => t * t").unwrap();
/// let results = f.eval_many(&vec![1.0, 2.0, 3.0].to_seeds());
/// assert_eq!(results.len(), 3);
/// ```
pub trait Samples {
    fn to_seeds(&self) -> Vec<Seed>;
}

impl Samples for [f64] {
    fn to_seeds(&self) -> Vec<Seed> {
        self.iter().copied().map(Seed::Real).collect()
    }
}

impl Samples for Vec<f64> {
    fn to_seeds(&self) -> Vec<Seed> {
        self.as_slice().to_seeds()
    }
}

impl<const N: usize> Samples for [f64; N] {
    fn to_seeds(&self) -> Vec<Seed> {
        self.as_slice().to_seeds()
    }
}

/// Points are seeds of a `p` function.
impl Samples for [RealVector] {
    fn to_seeds(&self) -> Vec<Seed> {
        self.iter().copied().map(Seed::Point).collect()
    }
}

#[cfg(feature = "ndarray")]
impl Samples for ndarray::Array1<f64> {
    fn to_seeds(&self) -> Vec<Seed> {
        self.iter().copied().map(Seed::Real).collect()
    }
}

#[cfg(feature = "nalgebra")]
impl Samples for nalgebra::DVector<f64> {
    fn to_seeds(&self) -> Vec<Seed> {
        self.iter().copied().map(Seed::Real).collect()
    }
}

#[cfg(feature = "nalgebra")]
impl From<nalgebra::Vector3<f64>> for RealVector {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        RealVector::new(v.x, v.y, v.z)
    }
}

#[cfg(feature = "nalgebra")]
impl From<RealVector> for nalgebra::Vector3<f64> {
    fn from(v: RealVector) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

/// Fails unless the view holds exactly three elements.
#[cfg(feature = "ndarray")]
impl TryFrom<ndarray::ArrayView1<'_, f64>> for RealVector {
    type Error = EvalError;

    fn try_from(view: ndarray::ArrayView1<'_, f64>) -> Result<Self, Self::Error> {
        match view.len() {
            3 => Ok(RealVector::new(view[0], view[1], view[2])),
            got => Err(EvalError::Arity {
                function: "RealVector".to_string(),
                expected: 3,
                got,
            }),
        }
    }
}

#[cfg(feature = "ndarray")]
impl From<RealVector> for ndarray::Array1<f64> {
    fn from(v: RealVector) -> Self {
        ndarray::arr1(&[v.x, v.y, v.z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_samples() {
        assert_eq!(vec![1.0, 2.0].to_seeds(), vec![Seed::Real(1.0), Seed::Real(2.0)]);
        assert_eq!([0.5; 3].to_seeds().len(), 3);
        let points = [RealVector::new(1.0, 2.0, 3.0)];
        assert_eq!(points.as_slice().to_seeds(), vec![Seed::Point(points[0])]);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_ndarray_conversions() {
        let a = ndarray::arr1(&[1.0, 2.0, 3.0]);
        let v = RealVector::try_from(a.view()).unwrap();
        assert_eq!(v, RealVector::new(1.0, 2.0, 3.0));
        assert_eq!(ndarray::Array1::from(v), a);
        assert_eq!(a.to_seeds().len(), 3);

        let short = ndarray::arr1(&[1.0, 2.0]);
        let err = RealVector::try_from(short.view()).unwrap_err();
        assert!(matches!(err, EvalError::Arity { expected: 3, got: 2, .. }));
    }

    #[cfg(feature = "nalgebra")]
    #[test]
    fn test_nalgebra_conversions() {
        let n = nalgebra::Vector3::new(1.0, -2.0, 0.5);
        let v = RealVector::from(n);
        assert_eq!(v, RealVector::new(1.0, -2.0, 0.5));
        assert_eq!(nalgebra::Vector3::from(v), n);
        assert_eq!(nalgebra::DVector::from_vec(vec![1.0, 2.0]).to_seeds().len(), 2);
    }
}
