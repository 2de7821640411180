//! Routesim Topology
//!
//! The graph store behind the routing simulator: a directed, weighted graph of
//! uniquely named routers.
//!
//! # Model
//!
//! - Routers are identified by name and kept in insertion order, which is the
//!   order forwarding tables and exports list them in.
//! - Links are directed. There is at most one link per ordered pair, and a
//!   router never links to itself.
//! - Weights are plain integers bounded by [`MAX_WEIGHT`] in magnitude. The
//!   store does not reject negative weights; whether a negative link is
//!   acceptable is the path engine's decision.
//!
//! Every mutation validates first and mutates second, so a rejected request
//! leaves the topology exactly as it was.

mod error;
mod link;
mod topology;

pub use error::{Result, TopologyError};
pub use link::{Link, Weight, MAX_WEIGHT};
pub use topology::{Topology, SAMPLE_LINKS};
