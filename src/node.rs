//! Differentiable node: a value plus the record of how it was produced.
//!
//! A [`Node`] is a cheap `Rc` handle. Cloning shares the node (and its
//! identity); every elementary operation allocates a fresh one. Nodes are
//! never mutated after construction, so the graph they form is an
//! append-only DAG.

use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::float::Float;
use crate::rule::Rule;

/// Identity of a node allocation.
///
/// Clones of one [`Node`] share an id. Ids are only meaningful while the
/// node is alive; [`Gradients`](crate::Gradients) keeps its keyed nodes alive
/// for that reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One incoming edge of a node: the predecessor it was computed from and the
/// chain-rule factor that carries a derivative back to it.
#[derive(Debug)]
pub struct Contribution<F: Float> {
    pub(crate) predecessor: Node<F>,
    pub(crate) rule: Rule<F>,
}

impl<F: Float> Contribution<F> {
    #[inline]
    pub(crate) fn new(predecessor: Node<F>, rule: Rule<F>) -> Self {
        Contribution { predecessor, rule }
    }

    /// The node this contribution points back to.
    #[inline]
    pub fn predecessor(&self) -> &Node<F> {
        &self.predecessor
    }

    /// The local derivative rule.
    #[inline]
    pub fn rule(&self) -> &Rule<F> {
        &self.rule
    }

    /// Every node this edge references: the predecessor, then the rule operand.
    pub(crate) fn nodes(&self) -> impl Iterator<Item = &Node<F>> {
        std::iter::once(&self.predecessor).chain(self.rule.operand())
    }

    fn into_nodes(self) -> impl Iterator<Item = Node<F>> {
        std::iter::once(self.predecessor).chain(self.rule.into_operand())
    }
}

struct Inner<F: Float> {
    value: F,
    contributions: Vec<Contribution<F>>,
}

// Tear down long chains with a work list; the default recursive drop would
// use one stack frame per link.
impl<F: Float> Drop for Inner<F> {
    fn drop(&mut self) {
        let mut pending: Vec<Node<F>> = std::mem::take(&mut self.contributions)
            .into_iter()
            .flat_map(Contribution::into_nodes)
            .collect();
        while let Some(node) = pending.pop() {
            if let Ok(mut inner) = Rc::try_unwrap(node.0) {
                pending.extend(
                    std::mem::take(&mut inner.contributions)
                        .into_iter()
                        .flat_map(Contribution::into_nodes),
                );
            }
        }
    }
}

/// A value in a differentiable expression graph.
///
/// Leaves (inputs and constants) have no contributions. Every other node was
/// produced by exactly one elementary operation and records one
/// [`Contribution`] per operand.
#[derive(Clone)]
pub struct Node<F: Float>(Rc<Inner<F>>);

impl<F: Float> Node<F> {
    /// Lift a plain float into a leaf node.
    #[inline]
    pub fn constant(value: F) -> Self {
        Node::from_op(value, Vec::new())
    }

    /// Create an input variable. Identical to [`Node::constant`]; whether a
    /// leaf is an input depends only on which node the caller differentiates
    /// with respect to.
    #[inline]
    pub fn variable(value: F) -> Self {
        Node::constant(value)
    }

    #[inline]
    pub(crate) fn from_op(value: F, contributions: Vec<Contribution<F>>) -> Self {
        Node(Rc::new(Inner {
            value,
            contributions,
        }))
    }

    /// The leaf `0`.
    #[inline]
    pub fn zero() -> Self {
        Node::constant(F::zero())
    }

    /// The leaf `1`.
    #[inline]
    pub fn one() -> Self {
        Node::constant(F::one())
    }

    /// Primal value.
    #[inline]
    pub fn value(&self) -> F {
        self.0.value
    }

    /// Incoming edges, in operand order.
    #[inline]
    pub fn contributions(&self) -> &[Contribution<F>] {
        &self.0.contributions
    }

    /// `true` for inputs and constants.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.0.contributions.is_empty()
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.0) as usize)
    }

    /// Whether both handles refer to the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Lift a plain float into a leaf node.
///
/// Shorthand for [`Node::constant`].
#[inline]
pub fn node<F: Float>(value: F) -> Node<F> {
    Node::constant(value)
}

impl<F: Float> From<F> for Node<F> {
    #[inline]
    fn from(value: F) -> Self {
        Node::constant(value)
    }
}

impl<F: Float> Default for Node<F> {
    fn default() -> Self {
        Node::zero()
    }
}

impl<F: Float> Display for Node<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// Shallow on purpose: printing the whole history of a derivative node would
// walk the entire graph.
impl<F: Float> Debug for Node<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value())
            .field("contributions", &self.contributions().len())
            .finish()
    }
}
