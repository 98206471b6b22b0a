//! Circuitry Core
//!
//! This crate provides the logic core of a combinational circuit editor.
//! It implements:
//!
//! - A graph store of constants, gates and outputs wired by ID
//! - An evaluator that resolves every node with memoized depth-first search
//! - Cycle detection that fails only the affected nodes
//! - Output events for the host to surface to the user
//!
//! Drawing, hit-testing and selection belong to the host. It edits the
//! graph through [`GraphStore`] and reads values back after evaluating.
//!
//! # Architecture
//!
//! - `graph`: nodes, IDs and the edit API
//! - `eval`: evaluation passes, reports and output sinks
//! - `config`: evaluator options
//! - `error`: edit errors, evaluation errors and diagnostics
//!
//! # Example
//!
//! ```rust
//! use circuitry_core::{evaluate, GateOp, GraphStore, NodeKind};
//!
//! let mut graph = GraphStore::new();
//! let a = graph.add_node(NodeKind::ConstantOne);
//! let b = graph.add_node(NodeKind::ConstantZero);
//! let xor = graph.add_node(NodeKind::Gate(GateOp::Xor));
//! let out = graph.add_node(NodeKind::Output);
//! graph.add_edge(a, xor).unwrap();
//! graph.add_edge(b, xor).unwrap();
//! graph.add_edge(xor, out).unwrap();
//!
//! let report = evaluate(&mut graph);
//! assert_eq!(report.value(out), Some(true));
//! assert_eq!(report.outputs.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod graph;

pub use config::EvalConfig;
pub use error::{Diagnostic, EditError, EvalError, ParseKindError};
pub use eval::{evaluate, CollectingSink, EvalReport, Evaluator, OutputEvent, OutputSink};
pub use graph::{GateOp, GraphStore, Node, NodeId, NodeKind, Value};
