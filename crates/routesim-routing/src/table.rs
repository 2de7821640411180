//! Per-router forwarding tables.

use routesim_topology::{Topology, Weight};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Algorithm, Result, Route, RoutingGraph};

/// Next-hop text for an unreachable destination.
pub const NO_NEXT_HOP: &str = "-";

/// Path text for an unreachable destination.
pub const NO_PATH: &str = "No path";

/// Cost text for an unreachable destination in tables shown to a user.
pub const INFINITE_COST: &str = "∞";

/// One row of a forwarding table.
///
/// `next_hop`, `cost` and `path` are `None` exactly when the destination is
/// unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingEntry {
    pub destination: String,
    pub next_hop: Option<String>,
    pub cost: Option<Weight>,
    pub path: Option<Vec<String>>,
}

impl ForwardingEntry {
    /// Row for `destination` given the route to it, if there is one.
    pub fn new(destination: impl Into<String>, route: Option<Route>) -> Self {
        let destination = destination.into();
        match route {
            Some(route) => Self {
                destination,
                next_hop: route.next_hop().map(str::to_string),
                cost: Some(route.cost),
                path: Some(route.hops),
            },
            None => Self {
                destination,
                next_hop: None,
                cost: None,
                path: None,
            },
        }
    }

    /// Whether the destination is reachable.
    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    /// Next hop, or [`NO_NEXT_HOP`].
    pub fn next_hop_label(&self) -> &str {
        self.next_hop.as_deref().unwrap_or(NO_NEXT_HOP)
    }

    /// Cost, or [`INFINITE_COST`].
    pub fn cost_label(&self) -> String {
        self.cost
            .map(|c| c.to_string())
            .unwrap_or_else(|| INFINITE_COST.to_string())
    }

    /// Full path joined with arrows, or [`NO_PATH`].
    pub fn path_label(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.join(crate::PATH_SEPARATOR))
            .unwrap_or_else(|| NO_PATH.to_string())
    }
}

/// The forwarding table of one router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingTable {
    pub router: String,
    pub algorithm: Algorithm,
    pub entries: Vec<ForwardingEntry>,
}

impl ForwardingTable {
    /// Compute `router`'s table over a prepared graph.
    pub fn compute(graph: &RoutingGraph, router: &str, algorithm: Algorithm) -> Result<Self> {
        let source = graph.node(router)?;
        let entries = algorithm
            .finder()
            .routes_from(graph, source)?
            .into_iter()
            .map(|(node, route)| ForwardingEntry::new(graph.name(node), route))
            .collect::<Vec<_>>();

        debug!(
            router,
            %algorithm,
            rows = entries.len(),
            reachable = entries.iter().filter(|e| e.is_reachable()).count(),
            "computed forwarding table"
        );

        Ok(Self {
            router: router.to_string(),
            algorithm,
            entries,
        })
    }

    /// Row for `destination`, if it is in the table.
    pub fn entry(&self, destination: &str) -> Option<&ForwardingEntry> {
        self.entries.iter().find(|e| e.destination == destination)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows (a single-router topology).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of reachable destinations.
    pub fn reachable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_reachable()).count()
    }
}

/// Forwarding table of `router` in `topology`.
pub fn forwarding_table(
    topology: &Topology,
    router: &str,
    algorithm: Algorithm,
) -> Result<ForwardingTable> {
    ForwardingTable::compute(&RoutingGraph::new(topology), router, algorithm)
}

/// Forwarding tables of every router, in router order.
///
/// With `skip_stub_routers`, routers without outgoing links are left out;
/// their tables would be all "No path".
pub fn all_forwarding_tables(
    topology: &Topology,
    algorithm: Algorithm,
    skip_stub_routers: bool,
) -> Result<Vec<ForwardingTable>> {
    let graph = RoutingGraph::new(topology);
    topology
        .routers()
        .iter()
        .filter(|r| !skip_stub_routers || topology.out_degree(r) > 0)
        .map(|r| ForwardingTable::compute(&graph, r, algorithm))
        .collect()
}
