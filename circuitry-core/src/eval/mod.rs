//! Circuit Evaluation
//!
//! This module computes a boolean value for every node in a
//! [`GraphStore`](crate::graph::GraphStore).
//!
//! # Concepts
//!
//! ## Passes
//!
//! An evaluation pass resolves the whole graph from scratch. Constants are
//! known up front; every other node is resolved on demand from its inputs
//! and cached, so shared inputs are computed once.
//!
//! ## Failures and Diagnostics
//!
//! A node on a cycle, or downstream of one, fails with
//! [`EvalError::CycleDetected`](crate::error::EvalError::CycleDetected).
//! The rest of the graph still resolves.
//!
//! Unconnected gates and unary nodes with extra inputs still get a value;
//! they are reported as [`Diagnostic`](crate::error::Diagnostic)s.
//!
//! ## Output Events
//!
//! Output nodes report their value as an [`OutputEvent`]. Events are
//! collected in the [`EvalReport`] and handed to an [`OutputSink`] if one
//! is registered.

mod evaluator;
mod gate;
mod report;
mod sink;

pub use evaluator::Evaluator;
pub use report::{EvalReport, OutputEvent};
pub use sink::{CollectingSink, OutputSink};

use crate::graph::GraphStore;

/// Run one pass with the default configuration and no sink.
pub fn evaluate(graph: &mut GraphStore) -> EvalReport {
    Evaluator::new().evaluate(graph)
}
