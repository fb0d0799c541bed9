use crate::error::Result;
use crate::float::Float;
use crate::gradients::accumulate;
use crate::node::Node;

/// Derivatives of orders `1..=order` of `f` at `at`.
///
/// Evaluates `f(at)` once, then repeatedly accumulates the previous result
/// and reads off the entry for `at`. Each derivative node keeps its history
/// back to the leaves, which is what makes the next accumulation exact.
/// Exactly `order` accumulations are performed; `order == 0` yields an empty
/// vector.
///
/// ```
/// use graphdiff::{derivatives, Node};
///
/// let x = Node::variable(2.0_f64);
/// let d = derivatives(|x| Ok(x * x * x), &x, 3).unwrap();
/// assert_eq!(d[0].value(), 12.0);
/// assert_eq!(d[1].value(), 12.0);
/// assert_eq!(d[2].value(), 6.0);
/// ```
pub fn derivatives<F: Float>(
    f: impl FnOnce(&Node<F>) -> Result<Node<F>>,
    at: &Node<F>,
    order: usize,
) -> Result<Vec<Node<F>>> {
    let mut current = f(at)?;
    let mut derivs = Vec::with_capacity(order);
    for k in 1..=order {
        current = accumulate(&current)?.get(at);
        log::debug!(
            "order {} derivative at {}: {}",
            k,
            at.value(),
            current.value()
        );
        derivs.push(current.clone());
    }
    Ok(derivs)
}

/// Like [`derivatives`], evaluated at a fresh variable and reduced to values.
pub fn derivative_values<F: Float>(
    f: impl FnOnce(&Node<F>) -> Result<Node<F>>,
    x: F,
    order: usize,
) -> Result<Vec<F>> {
    let at = Node::variable(x);
    Ok(derivatives(f, &at, order)?
        .iter()
        .map(Node::value)
        .collect())
}

/// Taylor polynomial of degree `derivs.len()` around `x0`, evaluated at `x`.
///
/// `derivs[k - 1]` is the k-th derivative at `x0`. Never fails; overflow and
/// NaN propagate.
pub fn taylor<F: Float>(x: &Node<F>, x0: F, value_at_x0: F, derivs: &[Node<F>]) -> F {
    let dx = x.value() - x0;
    let mut result = value_at_x0;
    let mut k = F::zero();
    let mut factorial = F::one();
    let mut power = F::one();
    for d in derivs {
        k = k + F::one();
        factorial = factorial * k;
        power = power * dx;
        result = result + d.value() * power / factorial;
    }
    result
}

/// Gradient of a scalar function `f : Rⁿ → R` in one backward pass.
///
/// One variable leaf is created per entry of `x`.
pub fn gradient<F: Float>(
    f: impl FnOnce(&[Node<F>]) -> Result<Node<F>>,
    x: &[F],
) -> Result<Vec<F>> {
    let inputs: Vec<Node<F>> = x.iter().map(|&v| Node::variable(v)).collect();
    let output = f(&inputs)?;
    let grads = accumulate(&output)?;
    Ok(inputs.iter().map(|xi| grads.value(xi)).collect())
}

/// Value, gradient and full Hessian of `f : Rⁿ → R`.
///
/// The Hessian comes from accumulating each gradient node a second time
/// (reverse-over-reverse), so `hessian[i][j] = ∂²f/∂x_j∂x_i`.
pub fn hessian<F: Float>(
    f: impl FnOnce(&[Node<F>]) -> Result<Node<F>>,
    x: &[F],
) -> Result<(F, Vec<F>, Vec<Vec<F>>)> {
    let n = x.len();
    let inputs: Vec<Node<F>> = x.iter().map(|&v| Node::variable(v)).collect();
    let output = f(&inputs)?;
    let first = accumulate(&output)?;
    let grad_nodes: Vec<Node<F>> = inputs.iter().map(|xi| first.get(xi)).collect();

    let mut hess = vec![vec![F::zero(); n]; n];
    for (row, gi) in hess.iter_mut().zip(grad_nodes.iter()) {
        let second = accumulate(gi)?;
        for (h, xj) in row.iter_mut().zip(inputs.iter()) {
            *h = second.value(xj);
        }
    }

    let grad = grad_nodes.iter().map(Node::value).collect();
    Ok((output.value(), grad, hess))
}
