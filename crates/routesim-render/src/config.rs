//! Render settings.

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Colour scheme for documents and frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Page / frame background as a CSS colour.
    pub fn background(self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#0b1220",
        }
    }

    /// Text colour as a CSS colour.
    pub fn foreground(self) -> &'static str {
        match self {
            Theme::Light => "#0f172a",
            Theme::Dark => "#e6eef8",
        }
    }

    pub(crate) fn background_rgba(self) -> Rgba<u8> {
        match self {
            Theme::Light => Rgba([255, 255, 255, 255]),
            Theme::Dark => Rgba([11, 18, 32, 255]),
        }
    }

    pub(crate) fn outline_rgba(self) -> Rgba<u8> {
        match self {
            Theme::Light => Rgba([15, 23, 42, 255]),
            Theme::Dark => Rgba([230, 238, 248, 255]),
        }
    }
}

/// Configuration shared by the document and animation renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Seed for the initial layout positions
    pub seed: u64,
    /// Force simulation steps run before positions are read
    pub layout_iterations: usize,
    /// Animation frame width in pixels
    pub width: u32,
    /// Animation frame height in pixels
    pub height: u32,
    /// How long each animation frame is shown
    pub frame_delay_ms: u32,
    /// Height of the interactive document canvas in pixels
    pub document_height: u32,
    /// Colour scheme
    pub theme: Theme,
    /// Draw router names and link weights on animation frames
    pub labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            layout_iterations: 300,
            width: 600,
            height: 400,
            frame_delay_ms: 800,
            document_height: 550,
            theme: Theme::Light,
            labels: true,
        }
    }
}
