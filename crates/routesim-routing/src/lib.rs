//! Routesim Routing
//!
//! Shortest-path routes and forwarding tables over a [`Topology`].
//!
//! # Overview
//!
//! - **Algorithm**: [`Algorithm::LeastCost`] (Dijkstra, as OSPF uses) or
//!   [`Algorithm::NegativeTolerant`] (Bellman-Ford, as RIP uses), each backed
//!   by a [`PathFinder`] that calls into `petgraph::algo`.
//! - **Route**: the router sequence of a least-cost path and its cost.
//! - **Forwarding table**: for one router, next hop / cost / path towards
//!   every other router. Unreachable destinations become sentinel rows
//!   instead of errors.
//! - **Export**: every router's table as one CSV document.
//!
//! Everything is a pure function of a topology snapshot; nothing is cached
//! between calls.
//!
//! # Example
//!
//! ```
//! use routesim_routing::{shortest_path, Algorithm};
//! use routesim_topology::Topology;
//!
//! let topology = Topology::sample();
//! let route = shortest_path(&topology, "A", "D", Algorithm::LeastCost).unwrap();
//! assert_eq!(route.display(), "A ➔ B ➔ D");
//! assert_eq!(route.cost, 4);
//! ```

mod algorithm;
mod error;
mod export;
mod graph;
mod route;
mod table;

pub use algorithm::{Algorithm, BellmanFord, Dijkstra, ParseAlgorithmError, PathFinder};
pub use error::{Result, RoutingError};
pub use export::{export_csv, write_csv, CSV_HEADERS, CSV_INFINITE_COST};
pub use graph::RoutingGraph;
pub use route::{Route, PATH_SEPARATOR};
pub use table::{
    all_forwarding_tables, forwarding_table, ForwardingEntry, ForwardingTable, INFINITE_COST,
    NO_NEXT_HOP, NO_PATH,
};

use routesim_topology::Topology;
use tracing::debug;

/// Least-cost route from `source` to `destination`.
///
/// Fails with [`RoutingError::UnknownRouter`] if either endpoint is missing
/// and [`RoutingError::NoPath`] if the destination is unreachable.
pub fn shortest_path(
    topology: &Topology,
    source: &str,
    destination: &str,
    algorithm: Algorithm,
) -> Result<Route> {
    let graph = RoutingGraph::new(topology);
    let from = graph.node(source)?;
    let to = graph.node(destination)?;

    let route = algorithm.finder().route(&graph, from, to)?;
    debug!(source, destination, %algorithm, cost = route.cost, hops = route.hops.len(), "computed route");
    Ok(route)
}
