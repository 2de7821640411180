//! Path-traversal animation.
//!
//! For a path of n routers the animation has n frames. Frame `i` (1-based)
//! shows the whole topology with the first `i - 1` path links highlighted, so
//! the first frame highlights nothing and the last highlights the full path.

use std::path::Path;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use routesim_topology::Topology;
use tracing::debug;

use crate::frame::Painter;
use crate::layout::Layout;
use crate::{PathHighlight, RenderConfig, Result};

/// NeuQuant speed for GIF palette reduction (1 = slowest, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// A rendered animation: one frame per path router, all sharing one layout.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<RgbaImage>,
    layout: Layout,
    frame_delay_ms: u32,
}

impl Animation {
    /// Render the traversal of `path` over `topology`.
    pub fn render(topology: &Topology, path: &[String], config: &RenderConfig) -> Result<Self> {
        let highlight = PathHighlight::new(topology, path)?;
        let layout = Layout::spring(topology, config.seed, config.layout_iterations);
        let painter = Painter::new(config)?;

        let frames = (0..path.len())
            .map(|lit| painter.paint(topology, &layout, &highlight.prefix(lit)))
            .collect::<Vec<_>>();

        debug!(frames = frames.len(), width = config.width, height = config.height, "rendered animation");
        Ok(Self {
            frames,
            layout,
            frame_delay_ms: config.frame_delay_ms,
        })
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The frames, in display order.
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// The layout every frame was drawn with.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Display time of each frame.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.frame_delay_ms))
    }

    /// Encode as a looping GIF.
    pub fn encode_gif(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut buf, GIF_SPEED);
            encoder.set_repeat(Repeat::Infinite)?;
            let delay = Delay::from_numer_denom_ms(self.frame_delay_ms, 1);
            encoder.encode_frames(
                self.frames
                    .iter()
                    .cloned()
                    .map(|image| Frame::from_parts(image, 0, 0, delay)),
            )?;
        }
        debug!(bytes = buf.len(), frames = self.frames.len(), "encoded GIF");
        Ok(buf)
    }

    /// Encode as GIF and write it to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.encode_gif()?)?;
        Ok(())
    }
}
