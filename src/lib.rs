//! Forward-mode automatic differentiation with jets, plus a small expression language.
//!
//! This crate provides number types that carry derivatives along with their values.
//! Any composition of arithmetic and elementary functions on them yields exact
//! derivatives at the evaluation point, without symbolic manipulation or finite
//! differences. Expressions are parsed with the [evalexpr](https://github.com/ISibboI/evalexpr)
//! crate and interpreted over the same types.
//!
//! # Features
//!
//! - [`Jet1D`]: value, first and second derivative of a function of one real `t`
//! - [`JetGrad`]: value and gradient of a function of a point `p`
//! - [`Vector3`] over any [`Scalar`], giving curves ([`Jet1DVector`]) and vector
//!   fields ([`JetGradVector`]) with divergence and curl
//! - An [`Evaluator`] for text such as `t => Sin(t)` or `p => p^Vec(0, 0, 1)`
//! - Parallel batch evaluation of compiled functions
//!
//! # Example
//!
//! ```rust
//! use evalexpr_jet::{Evaluator, Evaluation, Jet1D, Seed};
//!
//! // Directly on the number types
//! let t = Jet1D::variable(2.0);
//! let y = t.sin();
//! assert!((y.d1 - 2.0_f64.cos()).abs() < 1e-12);
//!
//! // Through the expression language
//! let evaluator = Evaluator::new();
//! let Evaluation::Function(f) = evaluator.evaluate("t => Vec(1, 2, t)").unwrap() else {
//!     panic!()
//! };
//! let curve = f.call(Seed::Real(2.0)).unwrap();
//! assert_eq!(curve.to_string(), "f(t) = [1, 2, 2], f'(t) = [0, 0, 1], f\"(t) = [0, 0, 0]");
//! ```

pub use backends::vector::Samples;
pub use evaluator::{Evaluation, Evaluator};
pub use function::{JetFunction, Parameter, Seed};
pub use grad::JetGrad;
pub use grad_vector::JetGradVector;
pub use jet::Jet1D;
pub use jet_vector::Jet1DVector;
pub use scalar::Scalar;
pub use value::Value;
pub use vector::{RealVector, Vector3};

pub mod prelude {
    pub use crate::convert::{build_ast, parse};
    pub use crate::evaluator::{Evaluation, Evaluator};
    pub use crate::expr::{Expr, Scope};
    pub use crate::function::{JetFunction, Seed};
    pub use crate::scalar::Scalar;
    pub use crate::value::Value;
    pub use crate::vector::RealVector;
    pub use crate::{Jet1D, Jet1DVector, JetGrad, JetGradVector, Vector3};
}

/// Conversions to and from ndarray and nalgebra
pub mod backends {
    pub mod matrix;
    pub mod vector;
}
/// The builtin function vocabulary
pub mod builtins;
/// Conversion from parsed expressions to the expression tree
pub mod convert;
/// Error types for the various failure modes
pub mod errors;
/// Prefix recognition and the text entry point
pub mod evaluator;
/// Expression tree representation and interpretation
pub mod expr;
/// Compiled functions of one jet parameter
pub mod function;
/// Value and gradient of a function of a point
pub mod grad;
/// Vector fields with Jacobian, divergence and curl
pub mod grad_vector;
/// Value, first and second derivative of a function of one real
pub mod jet;
/// Curves with velocity and acceleration
pub mod jet_vector;
/// The interactive shell
pub mod repl;
/// The number interface shared by `f64` and the jets
pub mod scalar;
/// Dynamically typed evaluation results
pub mod value;
/// Three-component vectors over any scalar
pub mod vector;
