//! Interactive graph document.
//!
//! The document is plain data (nodes and edges with styling) that serialises
//! to JSON, plus an HTML wrapper that hands that JSON to vis-network in the
//! browser. Every link appears exactly once as an edge.

use routesim_topology::{Topology, Weight};
use serde::{Deserialize, Serialize};

use crate::{PathHighlight, RenderConfig, Result, Theme};

/// Colour of an edge that lies on the highlighted path.
pub const PATH_EDGE_COLOR: &str = "#2ecc71";
/// Colour of every other edge.
pub const OFF_PATH_EDGE_COLOR: &str = "#95a5a6";
/// Stroke width of path edges.
pub const PATH_EDGE_WIDTH: u32 = 3;
/// Stroke width of other edges.
pub const OFF_PATH_EDGE_WIDTH: u32 = 1;

const VIS_NETWORK_JS: &str = "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// A router in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: String,
    pub label: String,
}

/// A link in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEdge {
    pub from: String,
    pub to: String,
    pub weight: Weight,
    pub on_path: bool,
    pub color: String,
    pub width: u32,
}

/// A styled snapshot of a topology, optionally with a path highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<DocumentNode>,
    pub edges: Vec<DocumentEdge>,
    pub path: Vec<String>,
}

impl GraphDocument {
    /// Build the document for `topology`, highlighting `path` if given.
    pub fn build(topology: &Topology, path: Option<&[String]>) -> Result<Self> {
        let highlight = match path {
            Some(p) => PathHighlight::new(topology, p)?,
            None => PathHighlight::default(),
        };
        let on_path = highlight.all();

        let nodes = topology
            .routers()
            .iter()
            .map(|r| DocumentNode {
                id: r.clone(),
                label: r.clone(),
            })
            .collect();

        let edges = topology
            .links()
            .iter()
            .map(|link| {
                let hit = on_path.contains(&(link.from.as_str(), link.to.as_str()));
                DocumentEdge {
                    from: link.from.clone(),
                    to: link.to.clone(),
                    weight: link.weight,
                    on_path: hit,
                    color: if hit { PATH_EDGE_COLOR } else { OFF_PATH_EDGE_COLOR }.to_string(),
                    width: if hit { PATH_EDGE_WIDTH } else { OFF_PATH_EDGE_WIDTH },
                }
            })
            .collect();

        Ok(Self {
            nodes,
            edges,
            path: path.map(<[String]>::to_vec).unwrap_or_default(),
        })
    }

    /// Edges flagged as lying on the path.
    pub fn path_edges(&self) -> impl Iterator<Item = &DocumentEdge> {
        self.edges.iter().filter(|e| e.on_path)
    }

    /// The document as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// A standalone HTML page rendering the document with vis-network.
    pub fn to_html(&self, config: &RenderConfig) -> Result<String> {
        // Keep the payload from closing the surrounding <script> element.
        let json = self.to_json()?.replace("</", "<\\/");
        Ok(HTML_TEMPLATE
            .replace("__VIS_NETWORK_JS__", VIS_NETWORK_JS)
            .replace("__BACKGROUND__", config.theme.background())
            .replace("__FOREGROUND__", config.theme.foreground())
            .replace("__HEIGHT__", &config.document_height.to_string())
            .replace("__THEME__", theme_class(config.theme))
            .replace("__DOCUMENT__", &json))
    }
}

fn theme_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html class="__THEME__">
<head>
<meta charset="utf-8">
<title>Network Topology</title>
<script src="__VIS_NETWORK_JS__"></script>
<style>
html, body { margin: 0; background: __BACKGROUND__; color: __FOREGROUND__; font-family: Inter, system-ui, sans-serif; }
#network { width: 100%; height: __HEIGHT__px; }
</style>
</head>
<body>
<div id="network"></div>
<script>
const doc = __DOCUMENT__;
const nodes = new vis.DataSet(doc.nodes.map(n => ({ id: n.id, label: n.label, title: n.id })));
const edges = new vis.DataSet(doc.edges.map((e, i) => ({
  id: i,
  from: e.from,
  to: e.to,
  label: String(e.weight),
  value: e.weight,
  color: e.color,
  width: e.width,
  arrows: "to"
})));
new vis.Network(document.getElementById("network"), { nodes, edges }, {
  physics: { solver: "barnesHut" },
  nodes: { font: { color: "__FOREGROUND__" } },
  edges: { font: { color: "__FOREGROUND__", strokeWidth: 0 }, scaling: { min: 1, max: 3 } }
});
</script>
</body>
</html>
"#;
