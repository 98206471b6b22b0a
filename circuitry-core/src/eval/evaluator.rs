//! Evaluator Implementation
//!
//! An evaluation pass resolves every node of a [`GraphStore`] to a boolean,
//! or fails it when it sits on or behind a cycle.
//!
//! # Algorithm
//!
//! Resolution is a memoized depth-first search:
//!
//! 1. Constants start resolved; everything else starts `NotStarted`.
//! 2. Entering a node marks it `InProgress` and walks its inputs in order.
//! 3. Once every input is resolved, the node's function is applied and the
//!    node becomes `Resolved`. Later lookups return the cached value.
//! 4. Reaching an `InProgress` node means the search has looped back onto
//!    its own path. Every node on that path depends on the looped node, so
//!    all of them become `Failed`. Reaching a `Failed` node fails the path
//!    the same way.
//!
//! Each node is entered at most once, so a pass is O(V + E) on any graph.
//! The search keeps its own frame stack instead of recursing, so deep
//! chains cannot exhaust the thread stack.

use std::fmt;

use smallvec::SmallVec;

use super::report::{EvalReport, OutputEvent};
use super::sink::OutputSink;
use crate::config::EvalConfig;
use crate::error::{Diagnostic, EvalError};
use crate::graph::{GraphStore, NodeId, NodeKind, Value};

/// Resolution state of one node during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveState {
    /// Not visited yet.
    NotStarted,

    /// On the current search path.
    InProgress,

    /// Terminal: the node has a value.
    Resolved(bool),

    /// Terminal: the node is on or behind a cycle.
    Failed,
}

/// A node on the search path and the next input to visit.
#[derive(Debug, Clone, Copy)]
struct Frame {
    index: usize,
    next: usize,
}

/// Computes values for every node in a graph.
///
/// # Example
///
/// ```
/// use circuitry_core::{Evaluator, GateOp, GraphStore, NodeKind};
///
/// let mut graph = GraphStore::new();
/// let one = graph.add_node(NodeKind::ConstantOne);
/// let not = graph.add_node(NodeKind::Gate(GateOp::Not));
/// let out = graph.add_node(NodeKind::Output);
/// graph.add_edge(one, not).unwrap();
/// graph.add_edge(not, out).unwrap();
///
/// let mut evaluator = Evaluator::new();
/// let report = evaluator.evaluate(&mut graph);
/// assert_eq!(report.value(out), Some(false));
/// ```
pub struct Evaluator {
    config: EvalConfig,

    /// Receives output events at the end of each pass.
    sink: Option<Box<dyn OutputSink>>,
}

impl Evaluator {
    /// Create an evaluator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    /// Create an evaluator with the given configuration.
    pub fn with_config(config: EvalConfig) -> Self {
        Self { config, sink: None }
    }

    /// Register a sink for output events, replacing any previous one.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: OutputSink + 'static,
    {
        self.set_sink(sink);
        self
    }

    /// Register a sink for output events, replacing any previous one.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: OutputSink + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Remove and return the registered sink.
    pub fn take_sink(&mut self) -> Option<Box<dyn OutputSink>> {
        self.sink.take()
    }

    /// Get the configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Run one evaluation pass.
    ///
    /// Writes each node's value back into the graph (failed nodes are left
    /// [`Value::Unresolved`]) and returns the full report. Output events are
    /// delivered to the registered sink after every node has been resolved.
    pub fn evaluate(&mut self, graph: &mut GraphStore) -> EvalReport {
        let report = self.run(graph);
        if let Some(sink) = self.sink.as_mut() {
            deliver(&report, &mut **sink);
        }
        report
    }

    /// Run one evaluation pass, delivering output events to `sink`.
    ///
    /// The caller keeps ownership of the sink and can read it afterwards.
    /// The registered sink, if any, is not called.
    pub fn evaluate_with(
        &mut self,
        graph: &mut GraphStore,
        sink: &mut dyn OutputSink,
    ) -> EvalReport {
        let report = self.run(graph);
        deliver(&report, sink);
        report
    }

    fn run(&self, graph: &mut GraphStore) -> EvalReport {
        tracing::debug!(nodes = graph.len(), "evaluation pass started");

        let mut pass = Pass::new(graph, &self.config);
        pass.resolve_all();
        let report = pass.finish(graph);

        tracing::debug!(
            nodes = report.results.len(),
            failed = report.failed().len(),
            diagnostics = report.diagnostics.len(),
            outputs = report.outputs.len(),
            "evaluation pass complete"
        );
        report
    }
}

fn deliver(report: &EvalReport, sink: &mut dyn OutputSink) {
    for event in &report.outputs {
        sink.on_output(event);
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("config", &self.config)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// Working state of a single evaluation pass, indexed by creation order.
struct Pass<'c> {
    config: &'c EvalConfig,
    ids: Vec<NodeId>,
    kinds: Vec<NodeKind>,
    inputs: Vec<SmallVec<[usize; 4]>>,
    states: Vec<ResolveState>,
    stack: Vec<Frame>,
    diagnostics: Vec<(usize, Diagnostic)>,
    outputs: Vec<(usize, OutputEvent)>,
}

impl<'c> Pass<'c> {
    fn new(graph: &GraphStore, config: &'c EvalConfig) -> Self {
        let len = graph.len();
        let mut pass = Self {
            config,
            ids: Vec::with_capacity(len),
            kinds: Vec::with_capacity(len),
            inputs: Vec::with_capacity(len),
            states: Vec::with_capacity(len),
            stack: Vec::new(),
            diagnostics: Vec::new(),
            outputs: Vec::new(),
        };

        for node in graph.nodes() {
            pass.ids.push(node.id());
            pass.kinds.push(node.kind());
            pass.inputs.push(
                node.inputs()
                    .iter()
                    .filter_map(|&input| graph.index_of(input))
                    .collect(),
            );
            pass.states.push(match node.kind().constant_value() {
                Some(value) => ResolveState::Resolved(value),
                None => ResolveState::NotStarted,
            });
        }
        pass
    }

    fn resolve_all(&mut self) {
        for root in 0..self.ids.len() {
            self.resolve(root);
        }
    }

    fn resolve(&mut self, root: usize) {
        if self.states[root] != ResolveState::NotStarted {
            return;
        }
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let index = frame.index;
            let Some(&input) = self.inputs[index].get(frame.next) else {
                self.stack.pop();
                self.complete(index);
                continue;
            };
            frame.next += 1;

            match self.states[input] {
                ResolveState::NotStarted => self.enter(input),
                ResolveState::Resolved(_) => {}
                ResolveState::InProgress => {
                    tracing::warn!(node = %self.ids[input], "cycle detected");
                    self.fail_path();
                }
                ResolveState::Failed => {
                    tracing::trace!(node = %self.ids[input], "input depends on a cycle");
                    self.fail_path();
                }
            }
        }
    }

    fn enter(&mut self, index: usize) {
        self.states[index] = ResolveState::InProgress;
        self.stack.push(Frame { index, next: 0 });
    }

    /// Fail every node on the current search path.
    fn fail_path(&mut self) {
        for frame in self.stack.drain(..) {
            self.states[frame.index] = ResolveState::Failed;
        }
    }

    /// Apply a node's function once all of its inputs are resolved.
    fn complete(&mut self, index: usize) {
        let kind = self.kinds[index];
        let id = self.ids[index];

        let operands: SmallVec<[bool; 4]> = self.inputs[index]
            .iter()
            .filter_map(|&input| match self.states[input] {
                ResolveState::Resolved(value) => Some(value),
                _ => None,
            })
            .collect();

        let value = if operands.is_empty() {
            self.diagnostics.push((index, Diagnostic::UnderDetermined(id)));
            self.config.unconnected_value
        } else {
            if kind.is_unary() && operands.len() > 1 {
                self.diagnostics.push((
                    index,
                    Diagnostic::ArityMismatch {
                        node: id,
                        connected: operands.len(),
                    },
                ));
            }
            match kind {
                NodeKind::Gate(op) => op.apply(&operands),
                // Output passes its first input through.
                _ => operands[0],
            }
        };

        if kind == NodeKind::Output && !operands.is_empty() && self.config.emit_output_events {
            self.outputs.push((index, OutputEvent { node: id, value }));
        }

        tracing::trace!(node = %id, %kind, value, "resolved");
        self.states[index] = ResolveState::Resolved(value);
    }

    /// Write values back to the graph and build the report.
    fn finish(mut self, graph: &mut GraphStore) -> EvalReport {
        let mut report = EvalReport::default();

        for (index, state) in self.states.iter().enumerate() {
            let id = self.ids[index];
            let (value, result) = match *state {
                ResolveState::Resolved(value) => (Value::from(value), Ok(value)),
                ResolveState::Failed => (Value::Unresolved, Err(EvalError::CycleDetected(id))),
                ResolveState::NotStarted | ResolveState::InProgress => {
                    debug_assert!(false, "node {id} left {state:?} after a pass");
                    tracing::error!(node = %id, ?state, "node not terminal after a pass");
                    (Value::Unresolved, Err(EvalError::CycleDetected(id)))
                }
            };
            if let Some(node) = graph.node_at_mut(index) {
                node.set_value(value);
            }
            report.results.insert(id, result);
        }

        self.diagnostics.sort_by_key(|(index, _)| *index);
        self.outputs.sort_by_key(|(index, _)| *index);
        report.diagnostics = self.diagnostics.into_iter().map(|(_, d)| d).collect();
        report.outputs = self.outputs.into_iter().map(|(_, e)| e).collect();
        report
    }
}
