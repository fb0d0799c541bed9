//! Local derivative rules attached to graph edges.
//!
//! Each elementary operation tags its operand edges with a [`Rule`]. During
//! backward accumulation [`Rule::apply`] turns the adjoint flowing into a node
//! into the adjoint flowing to one of its predecessors. Rules are evaluated
//! with the same elementary operations that build the forward graph, so the
//! result is itself a differentiable [`Node`].

use crate::error::Result;
use crate::float::Float;
use crate::node::Node;
use crate::ops;

/// Chain-rule factor for one operand edge.
///
/// Rules that need the operand's own value (`Cos`, `NegSin`, `Exp`,
/// `Quotient`) read it from the edge's predecessor instead of storing a second
/// reference to it.
#[derive(Debug)]
pub enum Rule<F: Float> {
    /// `incoming` passes through unchanged (`add`).
    Identity,
    /// `incoming × factor` (`mul`).
    ScaledBy(Node<F>),
    /// `incoming / divisor` (numerator of `div`, and `ln`).
    DividedBy(Node<F>),
    /// `incoming × (−numerator / b²)` where `b` is the predecessor (denominator of `div`).
    Quotient { numerator: Node<F> },
    /// `incoming × cos(a)` (`sin`).
    Cos,
    /// `incoming × (−sin(a))` (`cos`).
    NegSin,
    /// `incoming × exp(a)` (`exp`).
    Exp,
}

/// Payload-free discriminant of a [`Rule`], used for inspection and traces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    Identity,
    ScaledBy,
    DividedBy,
    Quotient,
    Cos,
    NegSin,
    Exp,
}

impl<F: Float> Rule<F> {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Identity => RuleKind::Identity,
            Rule::ScaledBy(_) => RuleKind::ScaledBy,
            Rule::DividedBy(_) => RuleKind::DividedBy,
            Rule::Quotient { .. } => RuleKind::Quotient,
            Rule::Cos => RuleKind::Cos,
            Rule::NegSin => RuleKind::NegSin,
            Rule::Exp => RuleKind::Exp,
        }
    }

    /// The extra node this rule references, if any.
    pub fn operand(&self) -> Option<&Node<F>> {
        match self {
            Rule::ScaledBy(n) | Rule::DividedBy(n) | Rule::Quotient { numerator: n } => Some(n),
            Rule::Identity | Rule::Cos | Rule::NegSin | Rule::Exp => None,
        }
    }

    pub(crate) fn into_operand(self) -> Option<Node<F>> {
        match self {
            Rule::ScaledBy(n) | Rule::DividedBy(n) | Rule::Quotient { numerator: n } => Some(n),
            Rule::Identity | Rule::Cos | Rule::NegSin | Rule::Exp => None,
        }
    }

    /// Map the adjoint `incoming` of a node to the adjoint contributed to
    /// `predecessor`.
    ///
    /// Fails with [`DivisionByZero`](crate::DiffError::DivisionByZero) when a
    /// dividing rule meets a zero-valued node, e.g. backpropagating through
    /// `ln(0)`.
    pub fn apply(&self, incoming: &Node<F>, predecessor: &Node<F>) -> Result<Node<F>> {
        match self {
            Rule::Identity => Ok(incoming.clone()),
            Rule::ScaledBy(factor) => Ok(ops::mul(incoming, factor)),
            Rule::DividedBy(divisor) => ops::div(incoming, divisor),
            Rule::Quotient { numerator } => {
                let squared = ops::mul(predecessor, predecessor);
                let ratio = ops::div(numerator, &squared)?;
                Ok(ops::mul(incoming, &ops::neg(&ratio)))
            }
            Rule::Cos => Ok(ops::mul(incoming, &ops::cos(predecessor))),
            Rule::NegSin => Ok(ops::mul(incoming, &ops::neg(&ops::sin(predecessor)))),
            Rule::Exp => Ok(ops::mul(incoming, &ops::exp(predecessor))),
        }
    }
}
