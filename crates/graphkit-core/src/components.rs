//! Strongly and weakly connected components.
//!
//! # Kosaraju
//!
//! 1. DFS over every node, recording nodes in finish order.
//! 2. Build the transpose (every adjacency entry reversed).
//! 3. Pop nodes in reverse finish order; each unassigned node collects the
//!    unassigned nodes reachable from it in the transpose as one SCC.
//!
//! Both passes are iterative so deep chains cannot overflow the stack.
//! Members of each returned component are sorted; components come out in
//! reverse finish order of the first pass.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{Graph, NodeKey};

impl<K: NodeKey, D> Graph<K, D> {
    /// Partition the nodes into strongly connected components.
    ///
    /// Every node belongs to exactly one component; an acyclic graph yields
    /// one singleton per node.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::RequiresDirected`] on an undirected graph.
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn strongly_connected_components(&self) -> Result<Vec<Vec<K>>> {
        self.require_directed("strongly_connected_components")?;
        let components = self.kosaraju();
        debug!(components = components.len(), "scc complete");
        Ok(components)
    }

    /// Components that contain a cycle: SCCs with more than one member, plus
    /// single nodes with a self-loop. Sorted for stable output.
    ///
    /// # Errors
    ///
    /// [`crate::GraphError::RequiresDirected`] on an undirected graph.
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn find_cycles(&self) -> Result<Vec<Vec<K>>> {
        self.require_directed("find_cycles")?;
        let mut cycles: Vec<Vec<K>> = self
            .kosaraju()
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.has_edge(single, single),
                members => members.len() > 1,
            })
            .collect();
        cycles.sort_unstable();
        debug!(cycles = cycles.len(), "cycle scan complete");
        Ok(cycles)
    }

    /// Weakly connected components: edge direction is ignored.
    ///
    /// Works for both orientations. Each component is sorted and components
    /// are ordered by their smallest member.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<K>> {
        let predecessors = self.predecessors();
        let mut assigned: BTreeSet<&K> = BTreeSet::new();
        let mut components = Vec::new();

        for root in self.node_ids() {
            if !assigned.insert(root) {
                continue;
            }
            let mut component = vec![root.clone()];
            let mut stack = vec![root];

            while let Some(current) = stack.pop() {
                let incoming = predecessors.get(current).into_iter().flatten().copied();
                for next in self.iter_neighbors(current).chain(incoming) {
                    if assigned.insert(next) {
                        component.push(next.clone());
                        stack.push(next);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    fn kosaraju(&self) -> Vec<Vec<K>> {
        let finished = self.finish_order();
        let transpose = self.predecessors();
        let mut assigned: BTreeSet<&K> = BTreeSet::new();
        let mut components = Vec::new();

        for &root in finished.iter().rev() {
            if !assigned.insert(root) {
                continue;
            }
            let mut component = vec![root.clone()];
            let mut stack = vec![root];

            while let Some(current) = stack.pop() {
                for &previous in transpose.get(current).into_iter().flatten() {
                    if assigned.insert(previous) {
                        component.push(previous.clone());
                        stack.push(previous);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// DFS post-order over the whole graph.
    fn finish_order(&self) -> Vec<&K> {
        let mut visited: BTreeSet<&K> = BTreeSet::new();
        let mut finished = Vec::with_capacity(self.node_count());

        for root in self.node_ids() {
            if visited.contains(root) {
                continue;
            }
            // (node, children already pushed)
            let mut stack: Vec<(&K, bool)> = vec![(root, false)];

            while let Some((node, expanded)) = stack.pop() {
                if expanded {
                    finished.push(node);
                    continue;
                }
                if !visited.insert(node) {
                    continue;
                }
                stack.push((node, true));
                for neighbor in self.iter_neighbors(node).rev() {
                    if !visited.contains(neighbor) {
                        stack.push((neighbor, false));
                    }
                }
            }
        }

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn sorted(mut components: Vec<Vec<&'static str>>) -> Vec<Vec<&'static str>> {
        components.sort_unstable();
        components
    }

    #[test]
    fn two_cycle_plus_tail() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("B", "A");
        graph.add_edge("B", "C");

        let sccs = graph.strongly_connected_components().expect("directed");
        assert_eq!(sorted(sccs), vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn dag_yields_singletons() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph.add_node("D");

        let sccs = graph.strongly_connected_components().expect("directed");
        assert_eq!(sccs.len(), 4);
        assert!(sccs.iter().all(|component| component.len() == 1));
    }

    #[test]
    fn components_come_out_in_topological_order_of_condensation() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("C", "D");
        graph.add_edge("D", "C");
        graph.add_edge("A", "C");

        let sccs = graph.strongly_connected_components().expect("directed");
        assert_eq!(sccs, vec![vec!["A"], vec!["C", "D"]]);
    }

    #[test]
    fn two_separate_cycles() {
        let mut graph: Graph<&str> = Graph::directed();
        for (from, to) in [("A", "B"), ("B", "C"), ("C", "A"), ("X", "Y"), ("Y", "X"), ("C", "X")] {
            graph.add_edge(from, to);
        }

        let sccs = graph.strongly_connected_components().expect("directed");
        assert_eq!(sorted(sccs), vec![vec!["A", "B", "C"], vec!["X", "Y"]]);
    }

    #[test]
    fn scc_requires_directed() {
        let graph: Graph<&str> = Graph::undirected();
        assert!(matches!(
            graph.strongly_connected_components(),
            Err(GraphError::RequiresDirected { .. })
        ));
        assert!(graph.find_cycles().is_err());
    }

    #[test]
    fn find_cycles_includes_self_loops_only_when_present() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("A", "B");
        graph.add_edge("B", "A");
        graph.add_edge("S", "S");
        graph.add_edge("B", "T");

        let cycles = graph.find_cycles().expect("directed");
        assert_eq!(cycles, vec![vec!["A", "B"], vec!["S"]]);
    }

    #[test]
    fn connected_components_ignore_direction() {
        let mut graph: Graph<&str> = Graph::directed();
        graph.add_edge("B", "A");
        graph.add_edge("C", "A");
        graph.add_edge("X", "Y");
        graph.add_node("Z");

        assert_eq!(
            graph.connected_components(),
            vec![vec!["A", "B", "C"], vec!["X", "Y"], vec!["Z"]]
        );
    }

    #[test]
    fn connected_components_undirected() {
        let mut graph: Graph<&str> = Graph::undirected();
        graph.add_edge("A", "B");
        graph.add_edge("C", "D");
        assert_eq!(graph.connected_components().len(), 2);
    }
}
