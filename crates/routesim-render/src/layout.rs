//! Force-directed node placement.

use std::collections::HashMap;
use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use routesim_topology::Topology;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TIME_STEP: f32 = 0.016;
const SPREAD: f32 = 100.0;

/// A position in the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Router positions normalised to `[0, 1] x [0, 1]`.
///
/// Computed once and reused for every frame of an animation, so routers do
/// not move between frames.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    positions: Vec<(String, Point)>,
}

impl Layout {
    /// Spring layout from seeded random starting positions.
    ///
    /// The same topology and seed always give the same layout.
    pub fn spring(topology: &Topology, seed: u64, iterations: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph: ForceGraph<(), ()> = ForceGraph::new(SimulationParameters {
            force_charge: 150.0,
            force_spring: 0.05,
            force_max: 100.0,
            node_speed: 3000.0,
            damping_factor: 0.9,
        });

        let mut ids: HashMap<&str, DefaultNodeIdx> = HashMap::new();
        let mut order = Vec::with_capacity(topology.router_count());
        for router in topology.routers() {
            let idx = graph.add_node(NodeData {
                x: rng.gen_range(-SPREAD..SPREAD),
                y: rng.gen_range(-SPREAD..SPREAD),
                mass: 10.0,
                is_anchor: false,
                user_data: (),
            });
            ids.insert(router.as_str(), idx);
            order.push((router.clone(), idx));
        }
        for link in topology.links() {
            if let (Some(&a), Some(&b)) = (ids.get(link.from.as_str()), ids.get(link.to.as_str())) {
                graph.add_edge(a, b, EdgeData::default());
            }
        }

        for _ in 0..iterations {
            graph.update(TIME_STEP);
        }

        let mut raw: HashMap<DefaultNodeIdx, Point> = HashMap::new();
        graph.visit_nodes(|node| {
            raw.insert(node.index(), Point { x: node.x(), y: node.y() });
        });

        let positions: Vec<_> = order
            .into_iter()
            .map(|(name, idx)| (name, raw.get(&idx).copied().unwrap_or_default()))
            .collect();

        if positions.iter().any(|(_, p)| !p.x.is_finite() || !p.y.is_finite()) {
            debug!("force simulation diverged; using circular layout");
            return Self::circular(topology);
        }

        debug!(routers = positions.len(), seed, iterations, "computed spring layout");
        Self { positions: normalise(positions) }
    }

    /// Routers evenly spaced on a circle, in router order.
    pub fn circular(topology: &Topology) -> Self {
        let n = topology.router_count().max(1) as f32;
        let positions = topology
            .routers()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let angle = i as f32 * 2.0 * PI / n;
                (r.clone(), Point { x: angle.cos(), y: angle.sin() })
            })
            .collect();
        Self { positions: normalise(positions) }
    }

    /// Position of `router`.
    pub fn position(&self, router: &str) -> Option<Point> {
        self.positions
            .iter()
            .find(|(name, _)| name == router)
            .map(|(_, p)| *p)
    }

    /// All positions in router order.
    pub fn positions(&self) -> &[(String, Point)] {
        &self.positions
    }
}

/// Scale each axis independently into the unit square.
///
/// An axis with no extent is centred at 0.5.
fn normalise(points: Vec<(String, Point)>) -> Vec<(String, Point)> {
    let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    for (_, p) in &points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let scale = |v: f32, min: f32, max: f32| {
        if max - min < f32::EPSILON {
            0.5
        } else {
            (v - min) / (max - min)
        }
    };

    points
        .into_iter()
        .map(|(name, p)| {
            (
                name,
                Point {
                    x: scale(p.x, min_x, max_x),
                    y: scale(p.y, min_y, max_y),
                },
            )
        })
        .collect()
}
