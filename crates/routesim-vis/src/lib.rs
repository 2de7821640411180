//! Routesim Visualizer
//!
//! Interactive shell around the routing core: edit a topology, pick an
//! algorithm, then inspect the resulting routes and their animation.
//!
//! # Architecture
//!
//! - **Session**: owns the topology, the algorithm and the render settings;
//!   every edit answers with a notice or an error
//! - **REST API**: edits and queries over one shared session
//! - **Config**: bind address and render defaults from the environment
//!
//! # Usage
//!
//! ```ignore
//! let mut session = Session::new(RenderConfig::default());
//! session.load_sample();
//!
//! let server = VisServer::new(session);
//! server.serve("0.0.0.0:3000".parse()?).await?;
//! ```

mod config;
mod error;
mod server;
mod session;

pub use config::VisConfig;
pub use error::{Result, VisError};
pub use server::VisServer;
pub use session::{Notice, NoticeLevel, Session};
