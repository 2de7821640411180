//! The router graph.

use tracing::debug;

use crate::{Link, Result, TopologyError, Weight, MAX_WEIGHT};

/// Links of the built-in sample network: four routers, five links.
pub const SAMPLE_LINKS: [(&str, &str, Weight); 5] = [
    ("A", "B", 2),
    ("B", "C", 3),
    ("C", "D", 1),
    ("A", "D", 10),
    ("B", "D", 2),
];

/// A directed weighted graph of named routers.
///
/// Routers and links are both kept in insertion order. Lookups are linear,
/// which is fine for the hand-built networks this type holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Topology {
    routers: Vec<String>,
    links: Vec<Link>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a topology holding the sample network.
    pub fn sample() -> Self {
        let mut topology = Self::new();
        topology.load_sample();
        topology
    }

    /// Replace the whole topology with the sample network.
    pub fn load_sample(&mut self) {
        self.clear();
        for (from, to, weight) in SAMPLE_LINKS {
            for router in [from, to] {
                if !self.contains_router(router) {
                    self.routers.push(router.to_string());
                }
            }
            self.links.push(Link::new(from, to, weight));
        }
        debug!(routers = self.routers.len(), links = self.links.len(), "loaded sample topology");
    }

    /// Remove every router and link.
    pub fn clear(&mut self) {
        self.routers.clear();
        self.links.clear();
    }

    /// Add a router. Surrounding whitespace is trimmed from the name.
    ///
    /// Returns the stored (trimmed) name.
    pub fn add_router(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TopologyError::InvalidName(name.to_string()));
        }
        if self.contains_router(name) {
            return Err(TopologyError::DuplicateRouter(name.to_string()));
        }

        self.routers.push(name.to_string());
        debug!(router = name, "added router");
        Ok(name.to_string())
    }

    /// Add a directed link.
    ///
    /// An existing link for the same ordered pair is an error and keeps its
    /// original weight. Weights beyond [`MAX_WEIGHT`] in magnitude are
    /// rejected.
    pub fn add_link(&mut self, from: &str, to: &str, weight: Weight) -> Result<()> {
        if !(-MAX_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            return Err(TopologyError::WeightOutOfRange(weight));
        }
        if from == to {
            return Err(TopologyError::SelfLoop(from.to_string()));
        }
        self.require_router(from)?;
        self.require_router(to)?;
        if self.has_link(from, to) {
            return Err(TopologyError::DuplicateLink {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.links.push(Link::new(from, to, weight));
        debug!(from, to, weight, "added link");
        Ok(())
    }

    /// Add `from -> to`, and `to -> from` with the same weight when
    /// `bidirectional` is set and that reverse link is not already present.
    ///
    /// Returns the number of links created (1 or 2).
    pub fn add_link_pair(
        &mut self,
        from: &str,
        to: &str,
        weight: Weight,
        bidirectional: bool,
    ) -> Result<usize> {
        self.add_link(from, to, weight)?;
        if bidirectional && !self.has_link(to, from) {
            self.add_link(to, from, weight)?;
            return Ok(2);
        }
        Ok(1)
    }

    /// Remove a router together with every link that touches it.
    ///
    /// Returns the number of links removed alongside it.
    pub fn remove_router(&mut self, name: &str) -> Result<usize> {
        let index = self
            .routers
            .iter()
            .position(|r| r == name)
            .ok_or_else(|| TopologyError::UnknownRouter(name.to_string()))?;

        self.routers.remove(index);
        let before = self.links.len();
        self.links.retain(|l| !l.touches(name));
        let dropped = before - self.links.len();
        debug!(router = name, dropped_links = dropped, "removed router");
        Ok(dropped)
    }

    /// Remove the link `from -> to`.
    pub fn remove_link(&mut self, from: &str, to: &str) -> Result<Link> {
        let index = self
            .links
            .iter()
            .position(|l| l.connects(from, to))
            .ok_or_else(|| TopologyError::UnknownLink {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        let link = self.links.remove(index);
        debug!(from, to, "removed link");
        Ok(link)
    }

    /// Router names in insertion order.
    pub fn routers(&self) -> &[String] {
        &self.routers
    }

    /// Links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links leaving `router`.
    pub fn links_from<'a>(&'a self, router: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.from == router)
    }

    /// Whether a router with this name exists.
    pub fn contains_router(&self, name: &str) -> bool {
        self.routers.iter().any(|r| r == name)
    }

    /// The link `from -> to`, if present.
    pub fn link(&self, from: &str, to: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.connects(from, to))
    }

    /// Whether the link `from -> to` exists.
    pub fn has_link(&self, from: &str, to: &str) -> bool {
        self.link(from, to).is_some()
    }

    /// Number of links leaving `router`.
    pub fn out_degree(&self, router: &str) -> usize {
        self.links_from(router).count()
    }

    /// Whether any link carries a negative weight.
    pub fn has_negative_weight(&self) -> bool {
        self.links.iter().any(|l| l.weight < 0)
    }

    /// Number of routers.
    pub fn router_count(&self) -> usize {
        self.routers.len()
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Whether the topology has no routers.
    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Fail with [`TopologyError::UnknownRouter`] unless `name` exists.
    pub fn require_router(&self, name: &str) -> Result<()> {
        if self.contains_router(name) {
            Ok(())
        } else {
            Err(TopologyError::UnknownRouter(name.to_string()))
        }
    }
}
