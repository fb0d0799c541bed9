//! A reusable differentiable function of one variable.

use std::marker::PhantomData;

use crate::api;
use crate::error::Result;
use crate::float::Float;
use crate::node::Node;

/// Wraps `f : Node → Node` so it can be evaluated, differentiated to any
/// order, and expanded as a Taylor polynomial.
///
/// Nothing is cached: every call rebuilds the graph from the closure.
pub struct DifferentiableFunction<F: Float, G> {
    func: G,
    _float: PhantomData<F>,
}

impl<F, G> DifferentiableFunction<F, G>
where
    F: Float,
    G: Fn(&Node<F>) -> Result<Node<F>>,
{
    pub fn new(func: G) -> Self {
        DifferentiableFunction {
            func,
            _float: PhantomData,
        }
    }

    /// Build a fresh graph for `f(x)`.
    pub fn call(&self, x: &Node<F>) -> Result<Node<F>> {
        (self.func)(x)
    }

    /// `f(x)` as a plain value.
    pub fn eval(&self, x: F) -> Result<F> {
        Ok(self.call(&Node::variable(x))?.value())
    }

    /// Derivatives of orders `1..=order` at `x`. See [`api::derivatives`].
    pub fn derivatives(&self, x: &Node<F>, order: usize) -> Result<Vec<Node<F>>> {
        api::derivatives(|v| self.call(v), x, order)
    }

    /// Taylor approximation at `x` around `x0`, with the constant term taken
    /// from a fresh evaluation of `f(x0)`.
    pub fn taylor_polynomial(&self, x: &Node<F>, x0: F, derivs: &[Node<F>]) -> Result<F> {
        let value_at_x0 = self.eval(x0)?;
        Ok(api::taylor(x, x0, value_at_x0, derivs))
    }
}
