//! Graph Nodes
//!
//! This module defines the node types that live in the circuit graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ParseKindError;

/// Unique identifier for a node in the circuit graph.
///
/// Identifiers are handed out by [`GraphStore`](super::GraphStore) from a
/// monotonic counter and are never reused within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Boolean function computed by a gate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOp {
    And,
    Or,
    /// Complement of a single operand.
    Not,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl GateOp {
    /// All gate operations, in palette order.
    pub const ALL: [GateOp; 7] = [
        GateOp::And,
        GateOp::Or,
        GateOp::Not,
        GateOp::Xor,
        GateOp::Nand,
        GateOp::Nor,
        GateOp::Xnor,
    ];

    /// The label shown for this gate.
    pub fn label(&self) -> &'static str {
        match self {
            GateOp::And => "AND",
            GateOp::Or => "OR",
            GateOp::Not => "NOT",
            GateOp::Xor => "XOR",
            GateOp::Nand => "NAND",
            GateOp::Nor => "NOR",
            GateOp::Xnor => "XNOR",
        }
    }
}

/// The kind of node in the circuit graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A constant logical 0 source.
    ConstantZero,

    /// A constant logical 1 source.
    ConstantOne,

    /// A gate computing a boolean function of its inputs.
    Gate(GateOp),

    /// A monitor node that passes its first input through and reports it.
    Output,
}

impl NodeKind {
    /// Check if this kind is resolved before evaluation starts.
    pub fn is_constant(&self) -> bool {
        matches!(self, NodeKind::ConstantZero | NodeKind::ConstantOne)
    }

    /// The fixed value of a constant kind, `None` for everything else.
    pub fn constant_value(&self) -> Option<bool> {
        match self {
            NodeKind::ConstantZero => Some(false),
            NodeKind::ConstantOne => Some(true),
            NodeKind::Gate(_) | NodeKind::Output => None,
        }
    }

    /// Check if this kind honors only its first input.
    pub fn is_unary(&self) -> bool {
        matches!(self, NodeKind::Gate(GateOp::Not) | NodeKind::Output)
    }

    /// The palette label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::ConstantZero => "INPUT0",
            NodeKind::ConstantOne => "INPUT1",
            NodeKind::Gate(op) => op.label(),
            NodeKind::Output => "OUTPUT",
        }
    }
}

impl From<GateOp> for NodeKind {
    fn from(op: GateOp) -> Self {
        NodeKind::Gate(op)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NodeKind {
    type Err = ParseKindError;

    /// Parse a palette label such as `"INPUT1"`, `"xor"` or `"OUTPUT"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        match label.as_str() {
            "INPUT0" => Ok(NodeKind::ConstantZero),
            "INPUT1" => Ok(NodeKind::ConstantOne),
            "OUTPUT" => Ok(NodeKind::Output),
            _ => GateOp::ALL
                .iter()
                .find(|op| op.label() == label)
                .map(|&op| NodeKind::Gate(op))
                .ok_or_else(|| ParseKindError(s.to_string())),
        }
    }
}

/// Last computed value of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Value {
    /// Logical 0.
    Low,

    /// Logical 1.
    High,

    /// Not computed, or the last pass could not assign a value.
    #[default]
    Unresolved,
}

impl Value {
    /// The boolean value, if resolved.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Low => Some(false),
            Value::High => Some(true),
            Value::Unresolved => None,
        }
    }

    /// Check if the value holds a boolean.
    pub fn is_resolved(&self) -> bool {
        *self != Value::Unresolved
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::High
        } else {
            Value::Low
        }
    }
}

/// Ordered input list. Most gates have one or two inputs.
pub type Inputs = SmallVec<[NodeId; 4]>;

/// A node in the circuit graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    /// What kind of node this is.
    kind: NodeKind,

    /// Nodes that this node reads from, in operand order.
    inputs: Inputs,

    /// Result of the last evaluation pass.
    value: Value,
}

impl Node {
    /// Create a new node with no inputs and an unresolved value.
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            inputs: Inputs::new(),
            value: Value::Unresolved,
        }
    }

    /// Get the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Get the node's inputs, in operand order.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Get the value written by the last evaluation pass.
    pub fn value(&self) -> Value {
        self.value
    }

    /// Check if `id` is one of this node's inputs.
    pub fn has_input(&self, id: NodeId) -> bool {
        self.inputs.contains(&id)
    }

    /// Append an input. Returns false if it was already present.
    pub(crate) fn add_input(&mut self, id: NodeId) -> bool {
        if self.has_input(id) {
            return false;
        }
        self.inputs.push(id);
        true
    }

    /// Remove an input. Returns false if it was not present.
    pub(crate) fn remove_input(&mut self, id: NodeId) -> bool {
        let before = self.inputs.len();
        self.inputs.retain(|input| *input != id);
        self.inputs.len() != before
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.id)
    }
}
