//! One user's editing session.
//!
//! The session owns the topology being edited together with the chosen
//! algorithm and render settings. Every edit answers with a [`Notice`] on
//! success or a [`VisError`] on failure, and a failure never changes state.

use routesim_render::{Animation, GraphDocument, RenderConfig, Theme};
use routesim_routing::{
    all_forwarding_tables, export_csv, forwarding_table, shortest_path, Algorithm,
    ForwardingTable, Route,
};
use routesim_topology::{Topology, Weight};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, VisError};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warn,
    Error,
}

/// A short message for the user about what just happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warn, message)
    }
}

/// Editable topology plus routing and render settings.
#[derive(Debug, Clone, Default)]
pub struct Session {
    topology: Topology,
    algorithm: Algorithm,
    render: RenderConfig,
}

impl Session {
    /// Create an empty session.
    pub fn new(render: RenderConfig) -> Self {
        Self {
            topology: Topology::new(),
            algorithm: Algorithm::default(),
            render,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn theme(&self) -> Theme {
        self.render.theme
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    // Edits

    pub fn add_router(&mut self, name: &str) -> Result<Notice> {
        let name = self.topology.add_router(name)?;
        debug!(router = %name, "router added");
        Ok(Notice::success(format!("Router '{name}' added.")))
    }

    /// Add `from -> to`, and with `bidirectional` also `to -> from` unless it
    /// already exists. The weight must be at least 1.
    pub fn add_link(
        &mut self,
        from: &str,
        to: &str,
        weight: Weight,
        bidirectional: bool,
    ) -> Result<Notice> {
        if weight < 1 {
            return Err(VisError::NonPositiveWeight(weight));
        }
        let created = self.topology.add_link_pair(from, to, weight, bidirectional)?;
        debug!(from, to, weight, created, "link added");
        let message = if created == 2 {
            format!("Links {from} ⇄ {to} added.")
        } else {
            format!("Link {from} → {to} added.")
        };
        Ok(Notice::success(message))
    }

    pub fn remove_router(&mut self, name: &str) -> Result<Notice> {
        let dropped = self.topology.remove_router(name)?;
        debug!(router = name, dropped_links = dropped, "router removed");
        let message = match dropped {
            0 => format!("Router '{name}' removed."),
            1 => format!("Router '{name}' and 1 link removed."),
            n => format!("Router '{name}' and {n} links removed."),
        };
        Ok(Notice::warn(message))
    }

    pub fn remove_link(&mut self, from: &str, to: &str) -> Result<Notice> {
        self.topology.remove_link(from, to)?;
        debug!(from, to, "link removed");
        Ok(Notice::warn(format!("Link {from} → {to} removed.")))
    }

    /// Replace the topology with the five-link sample.
    pub fn load_sample(&mut self) -> Notice {
        self.topology.load_sample();
        debug!(routers = self.topology.router_count(), links = self.topology.link_count(), "sample loaded");
        Notice::info("Sample topology loaded.")
    }

    pub fn clear(&mut self) -> Notice {
        self.topology.clear();
        debug!("topology cleared");
        Notice::info("Topology cleared.")
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Notice {
        self.algorithm = algorithm;
        debug!(%algorithm, "algorithm selected");
        Notice::info(format!("Routing with {}.", algorithm.label()))
    }

    pub fn set_theme(&mut self, theme: Theme) -> Notice {
        self.render.theme = theme;
        debug!(?theme, "theme selected");
        let name = match theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        Notice::info(format!("Switched to the {name} theme."))
    }

    // Queries

    /// Routing is offered once the topology has two routers.
    pub fn ensure_routable(&self) -> Result<()> {
        if self.topology.router_count() < 2 {
            return Err(VisError::NotEnoughRouters);
        }
        Ok(())
    }

    pub fn route(&self, source: &str, destination: &str) -> Result<Route> {
        self.ensure_routable()?;
        Ok(shortest_path(&self.topology, source, destination, self.algorithm)?)
    }

    pub fn table(&self, router: &str) -> Result<ForwardingTable> {
        self.ensure_routable()?;
        Ok(forwarding_table(&self.topology, router, self.algorithm)?)
    }

    /// Tables of every router that has at least one outgoing link.
    pub fn all_tables(&self) -> Result<Vec<ForwardingTable>> {
        self.ensure_routable()?;
        Ok(all_forwarding_tables(&self.topology, self.algorithm, true)?)
    }

    /// Tables of every router as CSV, stub routers included.
    pub fn export_csv(&self) -> Result<String> {
        self.ensure_routable()?;
        Ok(export_csv(&self.topology, self.algorithm)?)
    }

    /// The graph document, with the route from `source` to `destination`
    /// highlighted when both are given.
    pub fn document(&self, endpoints: Option<(&str, &str)>) -> Result<GraphDocument> {
        let route = endpoints
            .map(|(source, destination)| self.route(source, destination))
            .transpose()?;
        Ok(GraphDocument::build(
            &self.topology,
            route.as_ref().map(|r| r.hops.as_slice()),
        )?)
    }

    /// The graph document as a standalone HTML page.
    pub fn document_html(&self, endpoints: Option<(&str, &str)>) -> Result<String> {
        Ok(self.document(endpoints)?.to_html(&self.render)?)
    }

    pub fn animation(&self, source: &str, destination: &str) -> Result<Animation> {
        let route = self.route(source, destination)?;
        Ok(Animation::render(&self.topology, &route.hops, &self.render)?)
    }

    /// The route animation as GIF bytes.
    pub fn animation_gif(&self, source: &str, destination: &str) -> Result<Vec<u8>> {
        Ok(self.animation(source, destination)?.encode_gif()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routesim_routing::RoutingError;
    use routesim_topology::TopologyError;

    fn small_render() -> RenderConfig {
        RenderConfig {
            width: 120,
            height: 90,
            layout_iterations: 50,
            ..RenderConfig::default()
        }
    }

    fn sample() -> Session {
        let mut s = Session::new(small_render());
        s.load_sample();
        s
    }

    #[test]
    fn add_router_notice() {
        let mut s = Session::default();
        let notice = s.add_router("  R1 ").unwrap();
        assert_eq!(notice, Notice::success("Router 'R1' added."));
        assert!(s.topology().contains_router("R1"));
    }

    #[test]
    fn failed_edit_leaves_state() {
        let mut s = sample();
        let before = s.topology().clone();

        let err = s.add_router("A").unwrap_err();
        assert!(matches!(err, VisError::Topology(TopologyError::DuplicateRouter(_))));
        assert_eq!(err.notice().level, NoticeLevel::Warn);

        assert!(s.add_link("A", "A", 1, false).is_err());
        assert!(s.add_link("A", "Z", 1, false).is_err());
        assert!(s.remove_link("D", "A").is_err());
        assert_eq!(s.topology(), &before);
    }

    #[test]
    fn link_weight_must_be_positive() {
        let mut s = sample();
        let before = s.topology().clone();

        for weight in [0, -4] {
            let err = s.add_link("D", "A", weight, true).unwrap_err();
            assert!(matches!(err, VisError::NonPositiveWeight(w) if w == weight));
        }
        let err = s.add_link("D", "A", i64::MAX, false).unwrap_err();
        assert!(matches!(err, VisError::Topology(TopologyError::WeightOutOfRange(_))));
        assert_eq!(s.topology(), &before);

        s.add_link("D", "A", 1, false).unwrap();
        assert_eq!(s.topology().link("D", "A").map(|l| l.weight), Some(1));
    }

    #[test]
    fn bidirectional_link_notice() {
        let mut s = Session::default();
        s.add_router("X").unwrap();
        s.add_router("Y").unwrap();
        let notice = s.add_link("X", "Y", 4, true).unwrap();
        assert_eq!(notice.message, "Links X ⇄ Y added.");
        assert_eq!(s.topology().link("Y", "X").map(|l| l.weight), Some(4));
    }

    #[test]
    fn remove_router_reports_links() {
        let mut s = sample();
        let notice = s.remove_router("B").unwrap();
        assert_eq!(notice.level, NoticeLevel::Warn);
        assert_eq!(notice.message, "Router 'B' and 3 links removed.");
        assert_eq!(s.topology().link_count(), 2);
    }

    #[test]
    fn routing_needs_two_routers() {
        let mut s = Session::default();
        s.add_router("A").unwrap();
        assert!(matches!(s.route("A", "A"), Err(VisError::NotEnoughRouters)));
        assert!(matches!(s.table("A"), Err(VisError::NotEnoughRouters)));
        assert!(matches!(s.export_csv(), Err(VisError::NotEnoughRouters)));
    }

    #[test]
    fn sample_route_and_table() {
        let s = sample();
        let route = s.route("A", "D").unwrap();
        assert_eq!(route.hops, ["A", "B", "D"]);
        assert_eq!(route.cost, 4);

        let table = s.table("A").unwrap();
        assert_eq!(table.entry("C").and_then(|e| e.cost), Some(5));
    }

    #[test]
    fn algorithm_switch() {
        let mut s = sample();
        let notice = s.set_algorithm(Algorithm::NegativeTolerant);
        assert_eq!(notice.message, "Routing with Bellman-Ford (RIP).");
        let table = s.table("A").unwrap();
        assert_eq!(table.algorithm, Algorithm::NegativeTolerant);
        assert_eq!(s.route("A", "D").unwrap().cost, 4);
    }

    #[test]
    fn all_tables_skip_stub_routers() {
        let s = sample();
        let routers: Vec<_> = s.all_tables().unwrap().into_iter().map(|t| t.router).collect();
        assert_eq!(routers, ["A", "B", "C"]);
        assert_eq!(s.export_csv().unwrap().lines().count(), 13);
    }

    #[test]
    fn unreachable_route_is_an_error() {
        let s = sample();
        let err = s.route("D", "A").unwrap_err();
        assert!(matches!(err, VisError::Routing(RoutingError::NoPath { .. })));
        assert!(s.document(Some(("D", "A"))).is_err());
    }

    #[test]
    fn document_highlights_route() {
        let s = sample();
        let doc = s.document(Some(("A", "D"))).unwrap();
        assert_eq!(doc.path, ["A", "B", "D"]);
        assert_eq!(doc.path_edges().count(), 2);

        let plain = s.document(None).unwrap();
        assert_eq!(plain.path_edges().count(), 0);
    }

    #[test]
    fn theme_reaches_html() {
        let mut s = sample();
        s.set_theme(Theme::Dark);
        let html = s.document_html(None).unwrap();
        assert!(html.contains(Theme::Dark.background()));
    }

    #[test]
    fn animation_frames_follow_route() {
        let s = sample();
        let anim = s.animation("A", "D").unwrap();
        assert_eq!(anim.frame_count(), 3);
        let gif = s.animation_gif("A", "D").unwrap();
        assert!(gif.starts_with(b"GIF"));
    }
}
