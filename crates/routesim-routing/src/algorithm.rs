//! Shortest-path algorithm selection.
//!
//! Both finders delegate to `petgraph::algo`; nothing here implements its own
//! relaxation loop.
//!
//! Ties between equal-cost routes are broken by petgraph's traversal order,
//! which follows link insertion order. That order is deterministic but not a
//! documented guarantee, so callers should not rely on which of several
//! least-cost routes comes back.

use std::fmt;
use std::str::FromStr;

use petgraph::algo::{astar, bellman_ford};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::{Result, Route, RoutingError, RoutingGraph};

/// Which shortest-path algorithm to route with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Dijkstra. Requires every link weight to be non-negative.
    #[default]
    #[serde(rename = "dijkstra", alias = "Dijkstra (OSPF)")]
    LeastCost,
    /// Bellman-Ford. Accepts negative links, rejects negative cycles.
    #[serde(rename = "bellman-ford", alias = "Bellman-Ford (RIP)")]
    NegativeTolerant,
}

impl Algorithm {
    /// Every selectable algorithm, in menu order.
    pub const ALL: [Algorithm; 2] = [Algorithm::LeastCost, Algorithm::NegativeTolerant];

    /// The path finder implementing this algorithm.
    pub fn finder(self) -> &'static dyn PathFinder {
        match self {
            Algorithm::LeastCost => &Dijkstra,
            Algorithm::NegativeTolerant => &BellmanFord,
        }
    }

    /// Short machine name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::LeastCost => "dijkstra",
            Algorithm::NegativeTolerant => "bellman-ford",
        }
    }

    /// Human-facing label, named after the protocol that uses it.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::LeastCost => "Dijkstra (OSPF)",
            Algorithm::NegativeTolerant => "Bellman-Ford (RIP)",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}' (expected dijkstra or bellman-ford)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(wanted) || a.label() == wanted)
            .or(match wanted.to_ascii_lowercase().as_str() {
                "ospf" => Some(Algorithm::LeastCost),
                "rip" | "bellman_ford" | "bellmanford" => Some(Algorithm::NegativeTolerant),
                _ => None,
            })
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

/// A single-source shortest-path strategy.
pub trait PathFinder: Send + Sync {
    /// The algorithm this finder implements.
    fn algorithm(&self) -> Algorithm;

    /// Least-cost route from `source` to `destination`.
    ///
    /// `source == destination` yields the one-router route with cost 0.
    fn route(
        &self,
        graph: &RoutingGraph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<Route>;

    /// Routes from `source` to every other router, in router order.
    ///
    /// Unreachable destinations are `None`. Any other failure aborts the
    /// whole computation.
    fn routes_from(
        &self,
        graph: &RoutingGraph,
        source: NodeIndex,
    ) -> Result<Vec<(NodeIndex, Option<Route>)>> {
        let mut routes = Vec::with_capacity(graph.node_count().saturating_sub(1));
        for destination in graph.nodes().filter(|&n| n != source) {
            match self.route(graph, source, destination) {
                Ok(route) => routes.push((destination, Some(route))),
                Err(e) if e.is_no_path() => routes.push((destination, None)),
                Err(e) => return Err(e),
            }
        }
        Ok(routes)
    }
}

/// Dijkstra's algorithm, via petgraph's A* with a zero heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Dijkstra {
    fn reject_negative(graph: &RoutingGraph) -> Result<()> {
        match graph.negative_link() {
            Some((from, to, weight)) => Err(RoutingError::NegativeWeight {
                from: graph.name(from).to_string(),
                to: graph.name(to).to_string(),
                weight,
            }),
            None => Ok(()),
        }
    }
}

impl PathFinder for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::LeastCost
    }

    fn route(
        &self,
        graph: &RoutingGraph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<Route> {
        Self::reject_negative(graph)?;

        astar(
            graph.inner(),
            source,
            |n| n == destination,
            |e| *e.weight(),
            |_| 0,
        )
        .map(|(cost, path)| graph.route(&path, cost))
        .ok_or_else(|| graph.no_path(source, destination))
    }
}

/// Bellman-Ford, via petgraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFord;

/// Predecessor tree produced by one Bellman-Ford run.
struct Tree {
    distances: Vec<f64>,
    predecessors: Vec<Option<NodeIndex>>,
}

impl BellmanFord {
    fn tree(graph: &RoutingGraph, source: NodeIndex) -> Result<Tree> {
        // petgraph's Bellman-Ford wants float weights.
        let float: DiGraph<(), f64> = graph.inner().map(|_, _| (), |_, &w| w as f64);
        let paths = bellman_ford(&float, source)
            .map_err(|_| RoutingError::NegativeCycle(graph.name(source).to_string()))?;
        Ok(Tree {
            distances: paths.distances,
            predecessors: paths.predecessors,
        })
    }

    fn extract(
        graph: &RoutingGraph,
        tree: &Tree,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<Option<Route>> {
        let Some(mut path) = Self::walk(graph, tree, source, destination) else {
            return Ok(None);
        };
        path.reverse();

        let cost = graph.path_cost(&path)?;
        Ok(Some(graph.route(&path, cost)))
    }

    /// Predecessor chain from `destination` back to `source`.
    fn walk(
        graph: &RoutingGraph,
        tree: &Tree,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        if tree.distances.get(destination.index())?.is_infinite() {
            return None;
        }

        let mut path = vec![destination];
        let mut current = destination;
        while current != source {
            current = tree.predecessors.get(current.index()).copied().flatten()?;
            path.push(current);
            if path.len() > graph.node_count() {
                return None;
            }
        }
        Some(path)
    }
}

impl PathFinder for BellmanFord {
    fn algorithm(&self) -> Algorithm {
        Algorithm::NegativeTolerant
    }

    fn route(
        &self,
        graph: &RoutingGraph,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<Route> {
        let tree = Self::tree(graph, source)?;
        Self::extract(graph, &tree, source, destination)?
            .ok_or_else(|| graph.no_path(source, destination))
    }

    fn routes_from(
        &self,
        graph: &RoutingGraph,
        source: NodeIndex,
    ) -> Result<Vec<(NodeIndex, Option<Route>)>> {
        let tree = Self::tree(graph, source)?;
        graph
            .nodes()
            .filter(|&n| n != source)
            .map(|n| Self::extract(graph, &tree, source, n).map(|route| (n, route)))
            .collect()
    }
}
