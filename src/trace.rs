//! Flattened, inspectable snapshot of a node graph.
//!
//! A [`Trace`] lists every node reachable from a root in topological order
//! (leaves first, root last) and replaces node handles with indices into that
//! list. With the `serde` feature it can be serialized for offline
//! inspection; it cannot be turned back into live nodes.

use std::collections::HashMap;

use crate::float::Float;
use crate::gradients::topological_order;
use crate::node::{Node, NodeId};
use crate::rule::RuleKind;

/// One contribution edge, by index.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEdge {
    pub predecessor: usize,
    pub rule: RuleKind,
    /// Index of the node the rule references, if any.
    pub operand: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry<F> {
    pub value: F,
    pub edges: Vec<TraceEdge>,
}

impl<F> TraceEntry<F> {
    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace<F> {
    entries: Vec<TraceEntry<F>>,
}

impl<F: Float> Trace<F> {
    pub fn from_root(root: &Node<F>) -> Self {
        let order = topological_order(root);
        let index: HashMap<NodeId, usize> = order
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id(), i))
            .collect();

        // Every referenced node precedes its consumer in `order`.
        let entries = order
            .iter()
            .map(|n| TraceEntry {
                value: n.value(),
                edges: n
                    .contributions()
                    .iter()
                    .map(|c| TraceEdge {
                        predecessor: index[&c.predecessor().id()],
                        rule: c.rule().kind(),
                        operand: c.rule().operand().map(|o| index[&o.id()]),
                    })
                    .collect(),
            })
            .collect();
        Trace { entries }
    }
}

impl<F> Trace<F> {
    pub fn entries(&self) -> &[TraceEntry<F>] {
        &self.entries
    }

    /// Entry of the node the trace was taken from. Only `None` for a
    /// deserialized empty trace.
    pub fn root(&self) -> Option<&TraceEntry<F>> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn num_leaves(&self) -> usize {
        self.entries.iter().filter(|e| e.is_leaf()).count()
    }

    pub fn num_edges(&self) -> usize {
        self.entries.iter().map(|e| e.edges.len()).sum()
    }
}

impl<F: Float> Node<F> {
    /// Snapshot of the graph this node was built from.
    pub fn trace(&self) -> Trace<F> {
        Trace::from_root(self)
    }
}
