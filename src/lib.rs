//! Reverse-mode automatic differentiation over a dynamically built
//! expression graph, with nested higher-order derivatives.
//!
//! Every elementary operation on a [`Node`] records how its result depends on
//! its operands. [`accumulate`] walks that record backward from an output and
//! produces derivative *nodes*, which carry their own history and can be
//! differentiated again. [`derivatives`] repeats this to any order and
//! [`taylor`] turns the result into a polynomial approximation.
//!
//! ```
//! use graphdiff::{derivatives, taylor, Node};
//!
//! let f = |x: &Node<f64>| Ok(x * x * x + 2.0 * x * x + x + 1.0);
//!
//! let x0 = Node::variable(1.0);
//! let d = derivatives(f, &x0, 3).unwrap();
//! assert_eq!(d[0].value(), 8.0);
//!
//! let x = Node::variable(2.1);
//! let approx = taylor(&x, 1.0, 5.0, &d);
//! assert!((approx - f(&x).unwrap().value()).abs() < 1e-9);
//! ```

pub mod api;
pub mod error;
pub mod float;
pub mod function;
pub mod gradients;
pub mod node;
pub mod ops;
pub mod rule;
pub mod trace;
mod traits;

pub use api::{derivative_values, derivatives, gradient, hessian, taylor};
pub use error::{DiffError, Result};
pub use float::Float;
pub use function::DifferentiableFunction;
pub use gradients::{accumulate, Gradients};
pub use node::{node, Contribution, Node, NodeId};
pub use rule::{Rule, RuleKind};
pub use trace::{Trace, TraceEdge, TraceEntry};

/// Graph node over `f64`.
pub type Node64 = Node<f64>;
/// Graph node over `f32`.
pub type Node32 = Node<f32>;
