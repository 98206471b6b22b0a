//! Error and diagnostic types for graph editing and evaluation.

use serde::Serialize;
use thiserror::Error;

use crate::graph::NodeId;

/// Errors that can occur while editing the graph.
///
/// Every edit checks its arguments before touching the store, so a returned
/// error means nothing was mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum EditError {
    /// Referenced an ID that is not in the store.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Attempted to connect a node to itself.
    #[error("node {0} cannot be its own input")]
    InvalidEdge(NodeId),
}

/// Errors that can occur while evaluating a node.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum EvalError {
    /// The node is part of, or depends on, a cycle.
    #[error("node {0} depends on a cycle")]
    CycleDetected(NodeId),

    /// A unary node has more than one input connected.
    ///
    /// Only reported through [`Diagnostic::ArityMismatch`]; the node still
    /// resolves from its first input.
    #[error("node {node} takes one input but has {connected}")]
    ArityMismatch { node: NodeId, connected: usize },
}

/// Non-fatal annotation attached to a node that still produced a value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Diagnostic {
    /// A gate or output with no inputs fell back to the unconnected value.
    #[error("node {0} has no inputs")]
    UnderDetermined(NodeId),

    /// A NOT or OUTPUT node has extra inputs; only the first was used.
    #[error("node {node} takes one input but has {connected}")]
    ArityMismatch { node: NodeId, connected: usize },
}

impl Diagnostic {
    /// The node this diagnostic is about.
    pub fn node(&self) -> NodeId {
        match self {
            Diagnostic::UnderDetermined(node) => *node,
            Diagnostic::ArityMismatch { node, .. } => *node,
        }
    }

    /// The evaluation error this diagnostic corresponds to, if any.
    pub fn as_eval_error(&self) -> Option<EvalError> {
        match *self {
            Diagnostic::UnderDetermined(_) => None,
            Diagnostic::ArityMismatch { node, connected } => {
                Some(EvalError::ArityMismatch { node, connected })
            }
        }
    }
}

/// A string did not name a known node kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown node kind {0:?}")]
pub struct ParseKindError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_node() {
        let id = NodeId::from(4);
        assert_eq!(EditError::UnknownNode(id).to_string(), "unknown node 4");
        assert_eq!(
            EvalError::CycleDetected(id).to_string(),
            "node 4 depends on a cycle"
        );
        assert_eq!(
            Diagnostic::ArityMismatch { node: id, connected: 3 }.to_string(),
            "node 4 takes one input but has 3"
        );
    }

    #[test]
    fn only_arity_diagnostics_map_to_eval_errors() {
        let id = NodeId::from(1);
        assert_eq!(Diagnostic::UnderDetermined(id).as_eval_error(), None);
        assert_eq!(
            Diagnostic::ArityMismatch { node: id, connected: 2 }.as_eval_error(),
            Some(EvalError::ArityMismatch { node: id, connected: 2 })
        );
    }
}
