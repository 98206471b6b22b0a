//! Circuit Graph
//!
//! This module implements the graph store that owns every circuit element
//! and the wires between them.
//!
//! # Overview
//!
//! The circuit graph is a directed graph where:
//!
//! - Nodes are constants, gates, or outputs
//! - Edges represent signal flow: if A is an input of B, there is an edge from A to B
//!
//! # Design Decisions
//!
//! 1. Nodes live in one owned collection and refer to each other only by
//!    [`NodeId`]. There are no pointers between nodes.
//!
//! 2. The collection is insertion ordered, so iteration always follows
//!    creation order.
//!
//! 3. Only the input side of each edge is stored. Removing a node sweeps
//!    every input list, which keeps the store free of dangling IDs.
//!
//! 4. Self-loops are rejected when edited. Longer cycles are accepted and
//!    left to the evaluator.

mod node;
mod store;

pub use node::{GateOp, Inputs, Node, NodeId, NodeKind, Value};
pub use store::GraphStore;
