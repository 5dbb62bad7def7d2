//! Fuzz target for graph document parsing.
//!
//! Any byte string must either fail to parse with `GraphError::Document` or
//! produce a graph on which every algorithm runs without panicking.

#![no_main]

use graphkit_core::Graph;
use libfuzzer_sys::fuzz_target;

/// Keep pathological inputs from spending the whole run in one case.
const MAX_INPUT: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT {
        return;
    }
    let Ok(graph) = Graph::<String, serde_json::Value>::from_json_slice(data) else {
        return;
    };

    let stats = graph.stats();
    assert_eq!(stats.node_count, graph.node_count());
    assert_eq!(stats.edge_count, graph.edge_count());

    let first = graph.node_ids().next().cloned();
    let last = graph.node_ids().next_back().cloned();
    if let (Some(start), Some(end)) = (first, last) {
        assert_eq!(graph.dfs(&start).first(), Some(&start));
        assert_eq!(graph.bfs(&start).first(), Some(&start));
        let _ = graph.dijkstra(&start, &end);
        let _ = graph.would_create_cycle(&end, &start);
    }

    if graph.is_directed() {
        let order = graph.topological_sort().ok().flatten();
        assert_eq!(order.is_none(), graph.has_cycle());
        let _ = graph.strongly_connected_components();
        let _ = graph.critical_path();
    }
    let _ = graph.connected_components();

    let json = graph.to_json_string().expect("graph serializes");
    let back = Graph::<String, serde_json::Value>::from_json_str(&json).expect("round trip parses");
    assert_eq!(back.stats(), graph.stats());
});
