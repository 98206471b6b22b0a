//! Graph Store
//!
//! The store owns every node in the circuit and is the only way to edit the
//! graph. It keeps three invariants:
//!
//! 1. Every ID in an input list refers to a node in the store
//! 2. No input list names the same source twice
//! 3. No node is its own input
//!
//! Edits validate their arguments first and only then mutate, so a failed
//! edit leaves the store untouched.

use indexmap::IndexMap;

use super::node::{Node, NodeId, NodeKind};
use crate::error::EditError;

/// Owns the nodes of a circuit and their input wiring.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// All nodes in the graph, in creation order.
    nodes: IndexMap<NodeId, Node>,

    /// Next raw ID to hand out. Never decreases.
    next_id: u64,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph.
    ///
    /// The node starts with no inputs and an unresolved value.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind));
        tracing::debug!(node = %id, %kind, "added node");
        id
    }

    /// Add an edge: `to` reads from `from`.
    ///
    /// Connecting the same pair twice is a no-op. Constants accept inputs,
    /// but evaluation never reads them.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), EditError> {
        self.check_edge(from, to)?;
        let node = self.nodes.get_mut(&to).ok_or(EditError::UnknownNode(to))?;
        if node.add_input(from) {
            tracing::debug!(%from, %to, "added edge");
        } else {
            tracing::trace!(%from, %to, "edge already present");
        }
        Ok(())
    }

    /// Remove an edge.
    ///
    /// Returns whether the edge existed.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<bool, EditError> {
        self.check_edge(from, to)?;
        let node = self.nodes.get_mut(&to).ok_or(EditError::UnknownNode(to))?;
        let removed = node.remove_input(from);
        if removed {
            tracing::debug!(%from, %to, "removed edge");
        }
        Ok(removed)
    }

    /// Remove a node from the graph.
    ///
    /// Also strips the node from every remaining input list. The removed
    /// node is returned so callers can drop any state keyed by its ID.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, EditError> {
        let node = self.nodes.shift_remove(&id).ok_or_else(|| {
            tracing::warn!(node = %id, "cannot remove unknown node");
            EditError::UnknownNode(id)
        })?;

        let mut detached = 0usize;
        for dependent in self.nodes.values_mut() {
            if dependent.remove_input(id) {
                detached += 1;
            }
        }

        tracing::debug!(node = %id, kind = %node.kind(), detached, "removed node");
        Ok(node)
    }

    /// Remove every node.
    ///
    /// IDs handed out before the clear are still never reused.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.nodes.len(), "cleared graph");
        self.nodes.clear();
    }

    /// Get a reference to a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check if a node is in the store.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate over all nodes in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// IDs of the nodes that read from `id`, in creation order.
    pub fn dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.has_input(id))
            .map(Node::id)
            .collect()
    }

    /// Get the total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of a node in creation order.
    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Mutable access for the evaluator, by creation-order position.
    pub(crate) fn node_at_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_index_mut(index).map(|(_, node)| node)
    }

    fn check_edge(&self, from: NodeId, to: NodeId) -> Result<(), EditError> {
        for id in [from, to] {
            if !self.contains(id) {
                tracing::warn!(node = %id, "edge references unknown node");
                return Err(EditError::UnknownNode(id));
            }
        }
        if from == to {
            tracing::warn!(node = %from, "rejected self-loop");
            return Err(EditError::InvalidEdge(from));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{GateOp, Value};

    fn and() -> NodeKind {
        NodeKind::Gate(GateOp::And)
    }

    #[test]
    fn add_and_remove_nodes() {
        let mut store = GraphStore::new();

        let id1 = store.add_node(NodeKind::ConstantOne);
        let id2 = store.add_node(and());

        assert_eq!(store.len(), 2);

        let removed = store.remove_node(id1).unwrap();
        assert_eq!(removed.id(), id1);
        assert_eq!(store.len(), 1);
        assert!(store.node(id1).is_none());
        assert!(store.node(id2).is_some());
    }

    #[test]
    fn new_nodes_are_unresolved() {
        let mut store = GraphStore::new();
        let id = store.add_node(NodeKind::ConstantZero);
        assert_eq!(store.node(id).unwrap().value(), Value::Unresolved);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = GraphStore::new();

        let a = store.add_node(and());
        store.remove_node(a).unwrap();
        let b = store.add_node(and());
        store.clear();
        let c = store.add_node(and());

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn add_and_remove_edges() {
        let mut store = GraphStore::new();

        let source = store.add_node(NodeKind::ConstantOne);
        let gate = store.add_node(and());

        store.add_edge(source, gate).unwrap();
        assert_eq!(store.node(gate).unwrap().inputs(), &[source]);
        assert_eq!(store.dependents(source), vec![gate]);

        assert_eq!(store.remove_edge(source, gate), Ok(true));
        assert_eq!(store.remove_edge(source, gate), Ok(false));
        assert!(store.node(gate).unwrap().inputs().is_empty());
    }

    #[test]
    fn duplicate_edge_is_a_no_op() {
        let mut store = GraphStore::new();
        let a = store.add_node(NodeKind::ConstantOne);
        let b = store.add_node(NodeKind::Output);

        store.add_edge(a, b).unwrap();
        let once = store.node(b).unwrap().inputs().to_vec();
        store.add_edge(a, b).unwrap();

        assert_eq!(store.node(b).unwrap().inputs(), once.as_slice());
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut store = GraphStore::new();
        let a = store.add_node(and());

        assert_eq!(store.add_edge(a, a), Err(EditError::InvalidEdge(a)));
        assert!(store.node(a).unwrap().inputs().is_empty());
    }

    #[test]
    fn unknown_ids_are_rejected_without_mutation() {
        let mut store = GraphStore::new();
        let a = store.add_node(NodeKind::ConstantOne);
        let b = store.add_node(and());
        store.remove_node(b).unwrap();

        assert_eq!(store.add_edge(a, b), Err(EditError::UnknownNode(b)));
        assert_eq!(store.add_edge(b, a), Err(EditError::UnknownNode(b)));
        assert_eq!(store.remove_node(b), Err(EditError::UnknownNode(b)));
        assert!(store.node(a).unwrap().inputs().is_empty());
    }

    #[test]
    fn longer_cycles_are_accepted() {
        let mut store = GraphStore::new();
        let a = store.add_node(and());
        let b = store.add_node(and());

        store.add_edge(a, b).unwrap();
        store.add_edge(b, a).unwrap();

        assert_eq!(store.node(a).unwrap().inputs(), &[b]);
        assert_eq!(store.node(b).unwrap().inputs(), &[a]);
    }

    #[test]
    fn remove_node_strips_inputs() {
        let mut store = GraphStore::new();

        let source = store.add_node(NodeKind::ConstantOne);
        let other = store.add_node(NodeKind::ConstantZero);
        let gate1 = store.add_node(and());
        let gate2 = store.add_node(NodeKind::Gate(GateOp::Or));

        store.add_edge(source, gate1).unwrap();
        store.add_edge(other, gate1).unwrap();
        store.add_edge(source, gate2).unwrap();

        store.remove_node(source).unwrap();

        assert!(store.nodes().all(|node| node.id() != source));
        assert!(store.nodes().all(|node| !node.has_input(source)));
        assert_eq!(store.node(gate1).unwrap().inputs(), &[other]);
    }

    #[test]
    fn nodes_iterate_in_creation_order() {
        let mut store = GraphStore::new();
        let ids: Vec<_> = (0..5).map(|_| store.add_node(and())).collect();
        store.remove_node(ids[1]).unwrap();

        let seen: Vec<_> = store.nodes().map(Node::id).collect();
        assert_eq!(seen, vec![ids[0], ids[2], ids[3], ids[4]]);
    }
}
