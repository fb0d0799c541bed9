//! Backward accumulation over a node graph.
//!
//! [`accumulate`] sorts the graph reachable from a root in reverse
//! topological order (explicit work stack, no recursion), seeds the root with
//! `1`, and pushes each node's adjoint through its contribution rules. The
//! resulting adjoints are nodes with their own history, so they can be fed
//! back into [`accumulate`] for higher derivatives.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::float::Float;
use crate::node::{Node, NodeId};
use crate::ops;

struct Entry<F: Float> {
    node: Node<F>,
    adjoint: Node<F>,
}

/// Derivatives of one root with respect to every node reachable from it.
///
/// Built fresh by each [`accumulate`] call. Holds a handle to every keyed
/// node, so a [`NodeId`] cannot be reused while the map is alive.
pub struct Gradients<F: Float> {
    entries: HashMap<NodeId, Entry<F>>,
}

impl<F: Float> Gradients<F> {
    fn new() -> Self {
        Gradients {
            entries: HashMap::new(),
        }
    }

    /// Derivative node with respect to `node`, or the leaf `0` if `node` is
    /// not reachable from the root.
    pub fn get(&self, node: &Node<F>) -> Node<F> {
        self.entries
            .get(&node.id())
            .map(|e| e.adjoint.clone())
            .unwrap_or_else(Node::zero)
    }

    /// Value of [`get`](Self::get).
    pub fn value(&self, node: &Node<F>) -> F {
        self.entries
            .get(&node.id())
            .map_or_else(F::zero, |e| e.adjoint.value())
    }

    pub fn contains(&self, node: &Node<F>) -> bool {
        self.entries.contains_key(&node.id())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(node, derivative)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Node<F>, &Node<F>)> {
        self.entries.values().map(|e| (&e.node, &e.adjoint))
    }

    // First arrival is stored as is; later arrivals are summed with `add` so
    // the total keeps its history.
    fn accumulate_into(&mut self, node: &Node<F>, contribution: Node<F>) {
        match self.entries.entry(node.id()) {
            MapEntry::Occupied(mut slot) => {
                let total = ops::add(&slot.get().adjoint, &contribution);
                slot.get_mut().adjoint = total;
            }
            MapEntry::Vacant(slot) => {
                slot.insert(Entry {
                    node: node.clone(),
                    adjoint: contribution,
                });
            }
        }
    }
}

/// Compute `∂root/∂v` for every node `v` reachable from `root`, summed over
/// all paths.
///
/// The root itself maps to `1`. Adjoints are never pruned on a zero value: a
/// zero adjoint can still have nonzero derivatives.
pub fn accumulate<F: Float>(root: &Node<F>) -> Result<Gradients<F>> {
    let order = topological_order(root);
    let mut grads = Gradients::new();
    grads.accumulate_into(root, Node::one());

    for node in order.iter().rev() {
        let adjoint = match grads.entries.get(&node.id()) {
            Some(e) => e.adjoint.clone(),
            None => continue,
        };
        for c in node.contributions() {
            let local = c.rule().apply(&adjoint, c.predecessor())?;
            grads.accumulate_into(c.predecessor(), local);
        }
    }

    log::trace!(
        "accumulated {} adjoints over {} nodes from root {}",
        grads.len(),
        order.len(),
        root.value()
    );
    Ok(grads)
}

impl<F: Float> Node<F> {
    /// Shorthand for [`accumulate`] rooted at `self`.
    pub fn gradients(&self) -> Result<Gradients<F>> {
        accumulate(self)
    }
}

/// Post-order over every node reachable from `root` (predecessors and rule
/// operands), each node listed once, after all nodes it references. `root`
/// comes last.
pub(crate) fn topological_order<F: Float>(root: &Node<F>) -> Vec<Node<F>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<(Node<F>, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        stack.push((node.clone(), true));
        for c in node.contributions().iter().rev() {
            for next in c.nodes() {
                if !visited.contains(&next.id()) {
                    stack.push((next.clone(), false));
                }
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_lists_predecessors_first() {
        let x = Node::variable(2.0_f64);
        let y = ops::mul(&x, &x);
        let z = ops::add(&y, &x);
        let order = topological_order(&z);

        let pos = |n: &Node<f64>| order.iter().position(|m| m.ptr_eq(n)).unwrap();
        assert_eq!(order.len(), 3);
        assert!(pos(&x) < pos(&y));
        assert!(pos(&y) < pos(&z));
        assert!(order.last().unwrap().ptr_eq(&z));
    }

    #[test]
    fn root_maps_to_one() {
        let x = Node::variable(3.0_f64);
        let grads = accumulate(&x).unwrap();
        assert_eq!(grads.len(), 1);
        assert_eq!(grads.value(&x), 1.0);
    }

    #[test]
    fn unreached_node_reads_as_zero() {
        let x = Node::variable(3.0_f64);
        let other = Node::variable(5.0_f64);
        let grads = accumulate(&ops::mul(&x, &x)).unwrap();
        assert!(!grads.contains(&other));
        let g = grads.get(&other);
        assert_eq!(g.value(), 0.0);
        assert!(g.is_leaf());
    }

    #[test]
    fn shared_operand_sums_both_edges() {
        let x = Node::variable(3.0_f64);
        let grads = accumulate(&ops::mul(&x, &x)).unwrap();
        assert_eq!(grads.value(&x), 6.0);
        // the summed adjoint is an `add` node, not a bare number
        assert!(!grads.get(&x).is_leaf());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let x = Node::variable(0.5_f64);
        let mut y = x.clone();
        for _ in 0..50_000 {
            y = ops::add(&y, &Node::constant(1.0));
        }
        let grads = accumulate(&y).unwrap();
        assert_eq!(grads.value(&x), 1.0);
    }
}
