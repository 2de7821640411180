//! Per-request petgraph snapshot of a topology.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use routesim_topology::{Topology, Weight};

use crate::{Route, Result, RoutingError};

/// An immutable, indexed copy of a [`Topology`] that the path finders run on.
///
/// Node indices follow the topology's router order, and edges are inserted in
/// link order, so traversal (and therefore tie-breaking) is deterministic for
/// a given topology.
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    graph: DiGraph<String, Weight>,
    index: HashMap<String, NodeIndex>,
}

impl RoutingGraph {
    /// Snapshot a topology.
    pub fn new(topology: &Topology) -> Self {
        let mut graph = DiGraph::with_capacity(topology.router_count(), topology.link_count());
        let mut index = HashMap::with_capacity(topology.router_count());

        for router in topology.routers() {
            let node = graph.add_node(router.clone());
            index.insert(router.clone(), node);
        }
        for link in topology.links() {
            // The topology guarantees both endpoints exist.
            if let (Some(&a), Some(&b)) = (index.get(&link.from), index.get(&link.to)) {
                graph.add_edge(a, b, link.weight);
            }
        }

        Self { graph, index }
    }

    /// Resolve a router name to its node.
    pub fn node(&self, name: &str) -> Result<NodeIndex> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RoutingError::UnknownRouter(name.to_string()))
    }

    /// Router name of a node.
    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// The underlying petgraph graph.
    pub fn inner(&self) -> &DiGraph<String, Weight> {
        &self.graph
    }

    /// Nodes in router order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Number of routers.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The first link with a negative weight, if any.
    pub fn negative_link(&self) -> Option<(NodeIndex, NodeIndex, Weight)> {
        self.graph
            .raw_edges()
            .iter()
            .find(|e| e.weight < 0)
            .map(|e| (e.source(), e.target(), e.weight))
    }

    /// Sum of link weights along a node sequence.
    ///
    /// Fails with [`RoutingError::NoPath`] if two consecutive nodes are not
    /// linked, and with [`RoutingError::CostOverflow`] if the sum does not fit
    /// a [`Weight`].
    pub fn path_cost(&self, path: &[NodeIndex]) -> Result<Weight> {
        path.windows(2).try_fold(0, |acc: Weight, pair| {
            let edge = self
                .graph
                .find_edge(pair[0], pair[1])
                .ok_or_else(|| self.no_path(pair[0], pair[1]))?;
            acc.checked_add(self.graph[edge])
                .ok_or_else(|| RoutingError::CostOverflow {
                    from: self.name(path[0]).to_string(),
                    to: self.name(path[path.len() - 1]).to_string(),
                })
        })
    }

    /// Build a [`Route`] from a node sequence and its cost.
    pub fn route(&self, path: &[NodeIndex], cost: Weight) -> Route {
        Route {
            hops: path.iter().map(|&n| self.graph[n].clone()).collect(),
            cost,
        }
    }

    pub(crate) fn no_path(&self, source: NodeIndex, destination: NodeIndex) -> RoutingError {
        RoutingError::NoPath {
            from: self.name(source).to_string(),
            to: self.name(destination).to_string(),
        }
    }
}

impl From<&Topology> for RoutingGraph {
    fn from(topology: &Topology) -> Self {
        Self::new(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_order_and_weights() {
        let g = RoutingGraph::new(&Topology::sample());
        let names: Vec<_> = g.nodes().map(|n| g.name(n).to_string()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert_eq!(g.inner().edge_count(), 5);
    }

    #[test]
    fn unknown_router_lookup_fails() {
        let g = RoutingGraph::new(&Topology::sample());
        assert!(matches!(g.node("Z"), Err(RoutingError::UnknownRouter(n)) if n == "Z"));
    }

    #[test]
    fn path_cost_sums_links() {
        let g = RoutingGraph::new(&Topology::sample());
        let path: Vec<_> = ["A", "B", "C", "D"].iter().map(|n| g.node(n).unwrap()).collect();
        assert_eq!(g.path_cost(&path).unwrap(), 6);
    }

    #[test]
    fn path_cost_rejects_missing_link() {
        let g = RoutingGraph::new(&Topology::sample());
        let path = [g.node("D").unwrap(), g.node("A").unwrap()];
        assert!(matches!(
            g.path_cost(&path),
            Err(RoutingError::NoPath { ref from, ref to }) if from == "D" && to == "A"
        ));
    }

    #[test]
    fn path_cost_overflow_is_an_error() {
        // Built by hand: a topology refuses weights this large.
        let mut graph = DiGraph::new();
        let a = graph.add_node("A".to_string());
        let b = graph.add_node("B".to_string());
        let c = graph.add_node("C".to_string());
        graph.add_edge(a, b, Weight::MAX);
        graph.add_edge(b, c, 1);
        let index = [("A", a), ("B", b), ("C", c)]
            .into_iter()
            .map(|(n, i)| (n.to_string(), i))
            .collect();
        let g = RoutingGraph { graph, index };

        assert_eq!(g.path_cost(&[a, b]).unwrap(), Weight::MAX);
        assert!(matches!(
            g.path_cost(&[a, b, c]),
            Err(RoutingError::CostOverflow { ref from, ref to }) if from == "A" && to == "C"
        ));
    }

    #[test]
    fn negative_link_detected() {
        let mut t = Topology::sample();
        t.add_link("D", "A", -3).unwrap();
        let g = RoutingGraph::new(&t);
        let (from, to, w) = g.negative_link().unwrap();
        assert_eq!((g.name(from), g.name(to), w), ("D", "A", -3));
        assert!(RoutingGraph::new(&Topology::sample()).negative_link().is_none());
    }
}
