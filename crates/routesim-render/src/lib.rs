//! Routesim Render
//!
//! Turns a topology (and optionally a route through it) into artifacts a
//! front end can show or offer for download.
//!
//! # Architecture
//!
//! - **Document**: every router and link as styled data, wrapped in a
//!   standalone vis-network HTML page. Path links are drawn green and wider.
//! - **Layout**: force-directed placement from seeded starting positions.
//! - **Animation**: one raster frame per path router, highlighting the path a
//!   link at a time, encoded as a looping GIF. Frames carry router names and
//!   link weights.
//!
//! # Usage
//!
//! ```no_run
//! use routesim_render::{Animation, GraphDocument, RenderConfig};
//! use routesim_topology::Topology;
//!
//! let topology = Topology::sample();
//! let path = vec!["A".to_string(), "B".to_string(), "D".to_string()];
//! let config = RenderConfig::default();
//!
//! let html = GraphDocument::build(&topology, Some(&path))?.to_html(&config)?;
//! let gif = Animation::render(&topology, &path, &config)?.encode_gif()?;
//! # Ok::<(), routesim_render::RenderError>(())
//! ```

mod animation;
mod config;
mod document;
mod error;
mod frame;
mod highlight;
mod layout;

pub use animation::Animation;
pub use config::{RenderConfig, Theme};
pub use document::{
    DocumentEdge, DocumentNode, GraphDocument, OFF_PATH_EDGE_COLOR, OFF_PATH_EDGE_WIDTH,
    PATH_EDGE_COLOR, PATH_EDGE_WIDTH,
};
pub use error::{RenderError, Result};
pub use frame::{EDGE_COLOR, HIGHLIGHT_COLOR, LABEL_COLOR, NODE_COLOR};
pub use highlight::PathHighlight;
pub use layout::{Layout, Point};

#[cfg(test)]
mod tests {
    use super::*;
    use routesim_topology::Topology;

    #[test]
    fn document_and_animation_agree_on_path() {
        let t = Topology::sample();
        let path = vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()];
        let config = RenderConfig {
            width: 120,
            height: 90,
            layout_iterations: 50,
            ..RenderConfig::default()
        };

        let doc = GraphDocument::build(&t, Some(&path)).unwrap();
        let anim = Animation::render(&t, &path, &config).unwrap();
        assert_eq!(doc.path_edges().count() + 1, anim.frame_count());
    }
}
