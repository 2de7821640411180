//! Painting single animation frames.
//!
//! Routers are filled discs with their name on top. Links are arrows with
//! their weight written at the middle on a patch of background, so a label
//! looks the same whether or not the link under it is lit.

use std::collections::HashSet;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
    draw_polygon_mut, draw_text_mut, text_size,
};
use imageproc::point::Point as Vertex;
use imageproc::rect::Rect;
use routesim_topology::{Link, Topology};

use crate::layout::{Layout, Point};
use crate::{RenderConfig, Result};

/// Router fill.
pub const NODE_COLOR: Rgba<u8> = Rgba([135, 206, 235, 255]);
/// Links not (yet) on the traversed path.
pub const EDGE_COLOR: Rgba<u8> = Rgba([128, 128, 128, 255]);
/// Links already traversed.
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
/// Router names.
pub const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// DejaVu Sans, see `assets/DejaVuSans-LICENSE.txt`.
static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Draws frames of one size and theme.
pub(crate) struct Painter<'a> {
    config: &'a RenderConfig,
    geo: Geometry,
    font: FontRef<'static>,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(config: &'a RenderConfig) -> Result<Self> {
        Ok(Self {
            config,
            geo: Geometry::new(config),
            font: FontRef::try_from_slice(FONT_DATA)?,
        })
    }

    /// One frame with the links in `lit` highlighted.
    pub(crate) fn paint(
        &self,
        topology: &Topology,
        layout: &Layout,
        lit: &HashSet<(&str, &str)>,
    ) -> RgbaImage {
        let theme = self.config.theme;
        let mut image =
            RgbaImage::from_pixel(self.config.width, self.config.height, theme.background_rgba());

        // Unlit links first so traversed links are drawn on top.
        for highlighted in [false, true] {
            for link in topology.links() {
                if lit.contains(&(link.from.as_str(), link.to.as_str())) != highlighted {
                    continue;
                }
                if let Some(arrow) = self.arrow(topology, layout, link) {
                    self.draw_arrow(&mut image, &arrow, highlighted);
                }
            }
        }

        let outline = theme.outline_rgba();
        let radius = self.geo.node_radius.round() as i32;
        for (_, p) in layout.positions() {
            let centre = self.geo.pixel(*p);
            draw_filled_circle_mut(&mut image, centre, radius, NODE_COLOR);
            draw_hollow_circle_mut(&mut image, centre, radius, outline);
        }

        if self.config.labels {
            let weight_scale = PxScale::from((self.geo.node_radius * 0.9).max(7.0));
            for link in topology.links() {
                if let Some(arrow) = self.arrow(topology, layout, link) {
                    self.text(
                        &mut image,
                        &link.weight.to_string(),
                        arrow.label_anchor(),
                        weight_scale,
                        outline,
                        Some(theme.background_rgba()),
                    );
                }
            }

            let name_scale = PxScale::from(self.geo.node_radius.max(8.0));
            for (name, p) in layout.positions() {
                self.text(&mut image, name, self.geo.to_pixels(*p), name_scale, LABEL_COLOR, None);
            }
        }

        image
    }

    fn arrow(&self, topology: &Topology, layout: &Layout, link: &Link) -> Option<Arrow> {
        let from = self.geo.to_pixels(layout.position(&link.from)?);
        let to = self.geo.to_pixels(layout.position(&link.to)?);
        Arrow::new(&self.geo, from, to, topology.has_link(&link.to, &link.from))
    }

    fn draw_arrow(&self, image: &mut RgbaImage, arrow: &Arrow, highlighted: bool) {
        let r = self.geo.node_radius;
        let (color, width) = if highlighted {
            (HIGHLIGHT_COLOR, r * 0.35)
        } else {
            (EDGE_COLOR, r * 0.15)
        };
        let head = r * 0.9;

        if arrow.length <= head {
            thick_line(image, arrow.start, arrow.tip, width, color);
            return;
        }

        let (ux, uy) = arrow.direction;
        let (nx, ny) = (-uy, ux);
        let back = (arrow.tip.0 - ux * head, arrow.tip.1 - uy * head);
        thick_line(image, arrow.start, back, width, color);
        fill_polygon(
            image,
            &[
                arrow.tip,
                (back.0 + nx * head * 0.5, back.1 + ny * head * 0.5),
                (back.0 - nx * head * 0.5, back.1 - ny * head * 0.5),
            ],
            color,
        );
    }

    /// Write `text` centred on `centre`, optionally over a filled backdrop.
    fn text(
        &self,
        image: &mut RgbaImage,
        text: &str,
        centre: (f32, f32),
        scale: PxScale,
        color: Rgba<u8>,
        backdrop: Option<Rgba<u8>>,
    ) {
        let (w, h) = text_size(scale, &self.font, text);
        let ascent = self.font.as_scaled(scale).ascent();
        let left = centre.0 - w as f32 / 2.0;
        let top = centre.1 - h as f32 / 2.0;

        if let Some(fill) = backdrop {
            let pad = 1;
            let rect = Rect::at(left.round() as i32 - pad, top.round() as i32 - pad)
                .of_size(w.max(1) + 2 * pad as u32, h.max(1) + 2 * pad as u32);
            draw_filled_rect_mut(image, rect, fill);
        }

        // Glyphs hang from the baseline, `ascent` below the drawing origin.
        let baseline = top + h as f32;
        draw_text_mut(
            image,
            color,
            left.round() as i32,
            (baseline - ascent).round() as i32,
            scale,
            &self.font,
            text,
        );
    }
}

/// Pixel placement shared by every frame of an animation.
struct Geometry {
    width: f32,
    height: f32,
    margin: f32,
    node_radius: f32,
}

impl Geometry {
    fn new(config: &RenderConfig) -> Self {
        let (width, height) = (config.width as f32, config.height as f32);
        let node_radius = (width.min(height) * 0.04).max(3.0);
        Self {
            width,
            height,
            margin: node_radius * 2.5,
            node_radius,
        }
    }

    fn to_pixels(&self, p: Point) -> (f32, f32) {
        (
            self.margin + p.x * (self.width - 2.0 * self.margin).max(0.0),
            self.margin + p.y * (self.height - 2.0 * self.margin).max(0.0),
        )
    }

    fn pixel(&self, p: Point) -> (i32, i32) {
        let (x, y) = self.to_pixels(p);
        (x.round() as i32, y.round() as i32)
    }
}

/// A link between two node rims.
struct Arrow {
    start: (f32, f32),
    tip: (f32, f32),
    direction: (f32, f32),
    shift: (f32, f32),
    length: f32,
}

impl Arrow {
    /// `None` when the two nodes overlap.
    fn new(geo: &Geometry, from: (f32, f32), to: (f32, f32), parallel: bool) -> Option<Self> {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < 2.0 * geo.node_radius {
            return None;
        }
        let (ux, uy) = (dx / dist, dy / dist);

        // Links in both directions are pulled apart so both stay visible.
        let shift = if parallel { geo.node_radius * 0.35 } else { 0.0 };
        let (sx, sy) = (-uy * shift, ux * shift);

        Some(Self {
            start: (from.0 + ux * geo.node_radius + sx, from.1 + uy * geo.node_radius + sy),
            tip: (to.0 - ux * geo.node_radius + sx, to.1 - uy * geo.node_radius + sy),
            direction: (ux, uy),
            shift: (sx, sy),
            length: dist - 2.0 * geo.node_radius,
        })
    }

    /// Where the weight goes: the middle of the link, pushed further out
    /// for shifted links so the labels of a pair do not overlap.
    fn label_anchor(&self) -> (f32, f32) {
        (
            (self.start.0 + self.tip.0) / 2.0 + self.shift.0 * 2.0,
            (self.start.1 + self.tip.1) / 2.0 + self.shift.1 * 2.0,
        )
    }
}

fn thick_line(image: &mut RgbaImage, a: (f32, f32), b: (f32, f32), width: f32, color: Rgba<u8>) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = (dx * dx + dy * dy).sqrt();
    if width <= 1.5 || len < 0.001 {
        draw_line_segment_mut(image, a, b, color);
        return;
    }
    let half = width / 2.0;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    fill_polygon(
        image,
        &[
            (a.0 + nx, a.1 + ny),
            (b.0 + nx, b.1 + ny),
            (b.0 - nx, b.1 - ny),
            (a.0 - nx, a.1 - ny),
        ],
        color,
    );
}

/// Fill a polygon given in float pixels.
///
/// `draw_polygon_mut` refuses a closed outline, and after rounding small
/// shapes can collapse, so repeated corners are dropped first and anything
/// thinner than a triangle becomes a line.
fn fill_polygon(image: &mut RgbaImage, corners: &[(f32, f32)], color: Rgba<u8>) {
    let mut poly: Vec<Vertex<i32>> = Vec::with_capacity(corners.len());
    for &(x, y) in corners {
        let v = Vertex::new(x.round() as i32, y.round() as i32);
        if poly.last() != Some(&v) {
            poly.push(v);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }

    match poly.as_slice() {
        [] => {}
        [only] => draw_line_segment_mut(image, as_f32(*only), as_f32(*only), color),
        [a, b] => draw_line_segment_mut(image, as_f32(*a), as_f32(*b), color),
        _ => draw_polygon_mut(image, &poly, color),
    }
}

fn as_f32(v: Vertex<i32>) -> (f32, f32) {
    (v.x as f32, v.y as f32)
}
