//! Benchmarks for circuit evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use circuitry_core::{EvalConfig, Evaluator, GateOp, GraphStore, NodeId, NodeKind};

/// A chain of NOT gates wired against creation order, so the first root
/// walks the whole chain.
fn build_chain_graph(depth: usize) -> GraphStore {
    let mut graph = GraphStore::new();
    let gates: Vec<NodeId> = (0..depth)
        .map(|_| graph.add_node(NodeKind::Gate(GateOp::Not)))
        .collect();
    let one = graph.add_node(NodeKind::ConstantOne);
    for pair in gates.windows(2) {
        graph.add_edge(pair[1], pair[0]).unwrap();
    }
    graph.add_edge(one, gates[depth - 1]).unwrap();
    graph
}

/// Many independent two-input gates feeding one wide AND.
fn build_wide_graph(width: usize) -> GraphStore {
    let mut graph = GraphStore::new();
    let zero = graph.add_node(NodeKind::ConstantZero);
    let one = graph.add_node(NodeKind::ConstantOne);
    let sink = graph.add_node(NodeKind::Gate(GateOp::And));
    for i in 0..width {
        let op = if i % 2 == 0 { GateOp::Or } else { GateOp::Xnor };
        let gate = graph.add_node(NodeKind::Gate(op));
        graph.add_edge(zero, gate).unwrap();
        graph.add_edge(one, gate).unwrap();
        graph.add_edge(gate, sink).unwrap();
    }
    let out = graph.add_node(NodeKind::Output);
    graph.add_edge(sink, out).unwrap();
    graph
}

/// Rings of gates, every one of them a cycle.
fn build_cyclic_graph(rings: usize, ring_len: usize) -> GraphStore {
    let mut graph = GraphStore::new();
    for _ in 0..rings {
        let ring: Vec<NodeId> = (0..ring_len)
            .map(|_| graph.add_node(NodeKind::Gate(GateOp::Xor)))
            .collect();
        for (i, &node) in ring.iter().enumerate() {
            graph.add_edge(node, ring[(i + 1) % ring_len]).unwrap();
        }
    }
    graph
}

fn bench_chain(c: &mut Criterion) {
    let mut graph = build_chain_graph(10_000);
    let mut evaluator = Evaluator::with_config(EvalConfig::quiet());
    c.bench_function("chain_10000", |b| {
        b.iter(|| black_box(evaluator.evaluate(&mut graph)))
    });
}

fn bench_wide(c: &mut Criterion) {
    let mut graph = build_wide_graph(1_000);
    let mut evaluator = Evaluator::new();
    c.bench_function("wide_1000", |b| {
        b.iter(|| black_box(evaluator.evaluate(&mut graph)))
    });
}

fn bench_cycles(c: &mut Criterion) {
    let mut graph = build_cyclic_graph(100, 10);
    let mut evaluator = Evaluator::new();
    c.bench_function("rings_100x10", |b| {
        b.iter(|| black_box(evaluator.evaluate(&mut graph)))
    });
}

criterion_group!(benches, bench_chain, bench_wide, bench_cycles);
criterion_main!(benches);
