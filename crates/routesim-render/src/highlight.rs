//! Which links of a topology lie on a path.

use std::collections::HashSet;

use routesim_topology::Topology;

use crate::{RenderError, Result};

/// The consecutive `(from, to)` pairs of a path that has been checked
/// against a topology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHighlight {
    links: Vec<(String, String)>,
}

impl PathHighlight {
    /// Validate `path` against `topology`.
    ///
    /// Every router must exist and every consecutive pair must be linked.
    pub fn new(topology: &Topology, path: &[String]) -> Result<Self> {
        if path.is_empty() {
            return Err(RenderError::EmptyPath);
        }
        if let Some(missing) = path.iter().find(|r| !topology.contains_router(r)) {
            return Err(RenderError::UnknownRouter(missing.clone()));
        }

        let links = path
            .windows(2)
            .map(|w| {
                if topology.has_link(&w[0], &w[1]) {
                    Ok((w[0].clone(), w[1].clone()))
                } else {
                    Err(RenderError::MissingLink {
                        from: w[0].clone(),
                        to: w[1].clone(),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { links })
    }

    /// Number of path links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the path has no links (a single router).
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Lookup set of the first `count` links.
    pub fn prefix(&self, count: usize) -> HashSet<(&str, &str)> {
        self.links
            .iter()
            .take(count)
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect()
    }

    /// Lookup set of every link.
    pub fn all(&self) -> HashSet<(&str, &str)> {
        self.prefix(self.links.len())
    }
}
