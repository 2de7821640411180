//! Error types for rendering.

use thiserror::Error;

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a topology or a path.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A path was required but none was given.
    #[error("path is empty")]
    EmptyPath,

    /// The path names a router that is not in the topology.
    #[error("path router '{0}' does not exist")]
    UnknownRouter(String),

    /// Two consecutive path routers are not linked.
    #[error("path link {from} -> {to} does not exist")]
    MissingLink { from: String, to: String },

    /// The embedded label font could not be parsed.
    #[error("font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    /// Frame encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Document serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing an artifact failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
