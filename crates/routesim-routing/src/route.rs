//! A computed route.

use routesim_topology::Weight;
use serde::{Deserialize, Serialize};

/// Separator used when rendering a route as text.
pub const PATH_SEPARATOR: &str = " ➔ ";

/// A least-cost route: the routers from source to destination inclusive,
/// and the summed weight of the links between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub hops: Vec<String>,
    pub cost: Weight,
}

impl Route {
    /// First router on the route.
    pub fn source(&self) -> Option<&str> {
        self.hops.first().map(String::as_str)
    }

    /// Last router on the route.
    pub fn destination(&self) -> Option<&str> {
        self.hops.last().map(String::as_str)
    }

    /// The second router on the route, i.e. where the source forwards to.
    pub fn next_hop(&self) -> Option<&str> {
        self.hops.get(1).map(String::as_str)
    }

    /// Number of links traversed.
    pub fn link_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs along the route.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hops.windows(2).map(|w| (w[0].as_str(), w[1].as_str()))
    }

    /// Routers joined with [`PATH_SEPARATOR`], e.g. `A ➔ B ➔ D`.
    pub fn display(&self) -> String {
        self.hops.join(PATH_SEPARATOR)
    }
}
