//! Evaluation results.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Diagnostic, EvalError};
use crate::graph::NodeId;

/// Value reported by an output node during an evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutputEvent {
    /// The output node.
    pub node: NodeId,
    /// The value it passed through.
    pub value: bool,
}

/// Everything one evaluation pass produced.
///
/// `results` holds one entry per node, in creation order. Diagnostics and
/// output events are in creation order too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvalReport {
    /// Per-node outcome.
    pub results: IndexMap<NodeId, Result<bool, EvalError>>,
    /// Advisory notes on nodes that still resolved.
    pub diagnostics: Vec<Diagnostic>,
    /// Values reported by output nodes.
    pub outputs: Vec<OutputEvent>,
}

impl EvalReport {
    /// Outcome for a node, `None` if the node was not part of the pass.
    pub fn get(&self, id: NodeId) -> Option<&Result<bool, EvalError>> {
        self.results.get(&id)
    }

    /// Resolved value for a node, `None` if it failed or is unknown.
    pub fn value(&self, id: NodeId) -> Option<bool> {
        self.results.get(&id)?.as_ref().ok().copied()
    }

    /// Check if every node resolved.
    pub fn is_ok(&self) -> bool {
        self.results.values().all(Result::is_ok)
    }

    /// IDs of the nodes that failed, in creation order.
    pub fn failed(&self) -> Vec<NodeId> {
        self.results
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Diagnostics attached to one node.
    pub fn diagnostics_for(&self, id: NodeId) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.node() == id)
    }

    /// Serialize the report to JSON for a UI.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
