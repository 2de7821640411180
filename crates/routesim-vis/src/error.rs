//! Error types for the visualizer session and its HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use routesim_render::RenderError;
use routesim_routing::RoutingError;
use routesim_topology::{TopologyError, Weight};
use serde::Serialize;
use thiserror::Error;

use crate::session::{Notice, NoticeLevel};

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// Errors surfaced to the user. None of them is fatal to the session.
#[derive(Debug, Error)]
pub enum VisError {
    /// Topology edit rejected
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// Route or table computation failed
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// Document or animation rendering failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Routing was requested with fewer than two routers
    #[error("Add at least two nodes to simulate routing.")]
    NotEnoughRouters,

    /// Links entered through the session carry a positive weight
    #[error("Link weight must be a positive integer, got {0}.")]
    NonPositiveWeight(Weight),

    /// A required request parameter was absent
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
}

impl VisError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            VisError::Topology(e) => match e {
                TopologyError::UnknownRouter(_) | TopologyError::UnknownLink { .. } => {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::BAD_REQUEST,
            },
            VisError::Routing(e) => match e {
                RoutingError::UnknownRouter(_) => StatusCode::NOT_FOUND,
                RoutingError::NoPath { .. }
                | RoutingError::NegativeWeight { .. }
                | RoutingError::NegativeCycle(_)
                | RoutingError::CostOverflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                RoutingError::Csv(_) | RoutingError::Export(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            VisError::Render(e) => match e {
                RenderError::UnknownRouter(_) => StatusCode::NOT_FOUND,
                RenderError::EmptyPath | RenderError::MissingLink { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            VisError::NotEnoughRouters => StatusCode::UNPROCESSABLE_ENTITY,
            VisError::NonPositiveWeight(_) | VisError::MissingParameter(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// The error as a user-facing notice.
    ///
    /// Duplicates are warnings, since nothing was lost; everything else is
    /// an error.
    pub fn notice(&self) -> Notice {
        let level = match self {
            VisError::Topology(TopologyError::DuplicateRouter(_))
            | VisError::Topology(TopologyError::DuplicateLink { .. }) => NoticeLevel::Warn,
            VisError::NotEnoughRouters => NoticeLevel::Info,
            _ => NoticeLevel::Error,
        };
        Notice::new(level, self.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for VisError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
