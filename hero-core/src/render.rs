//! Frame rendering onto an abstract 2D drawing surface.
//!
//! [`render`] paints one complete frame (background, particles, edges)
//! through the [`Surface`] trait. [`DrawList`] is a retained surface that
//! records the commands, so a host can replay the latest frame as often as
//! it needs to.

use glam::DVec2;
use serde::Deserialize;

use crate::{config::Config, edge_buffer::EdgeBuffer, particle::ParticleStore, types::Bounds};

/// Straight (non-premultiplied) RGBA color with a fractional alpha.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Colors used for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Gradient color at the top-left corner.
    pub background_start: Color,
    /// Gradient color at the bottom-right corner.
    pub background_end: Color,
    pub particle: Color,
    /// Edge color; its alpha is replaced by `edge_alpha * weight`.
    pub edge: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_start: Color::rgba(0, 217, 255, 0.05),
            background_end: Color::rgba(20, 99, 255, 0.05),
            particle: Color::rgba(180, 235, 255, 0.8),
            edge: Color::rgba(0, 217, 255, 1.0),
        }
    }
}

/// A canvas-like 2D drawing target.
///
/// Coordinates passed to the drawing calls are logical units; the surface
/// applies the scale given to [`Surface::set_transform`].
pub trait Surface {
    /// Resizes the backing store in device pixels. Drops current content.
    fn resize_backing(&mut self, width_px: u32, height_px: u32);
    /// Sets the logical-to-device scale.
    fn set_transform(&mut self, scale: f64);
    /// Clears the logical rectangle `[0, w) × [0, h)`.
    fn clear(&mut self, area: Bounds);
    /// Fills the logical area with a two-stop linear gradient running from
    /// `from` to `to`.
    fn fill_linear_gradient(
        &mut self,
        area: Bounds,
        from: DVec2,
        to: DVec2,
        start: Color,
        end: Color,
    );
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color);
}

/// Paints one full frame.
///
/// Order: clear, background gradient, particles, then edges. The whole
/// logical area is overwritten, and nothing is remembered between calls.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    area: Bounds,
    store: &ParticleStore,
    edges: &EdgeBuffer,
    cfg: &Config,
) {
    let palette = &cfg.palette;

    surface.clear(area);
    surface.fill_linear_gradient(
        area,
        DVec2::ZERO,
        area.max_corner(),
        palette.background_start,
        palette.background_end,
    );

    for p in store.iter() {
        surface.fill_circle(p.pos, p.radius, palette.particle);
    }

    for e in edges.iter() {
        let (a, b) = (&store.particles[e.a], &store.particles[e.b]);
        let color = palette.edge.with_alpha(cfg.edge_alpha * e.weight);
        surface.stroke_line(a.pos, b.pos, cfg.line_width, color);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear {
        area: Bounds,
    },
    LinearGradient {
        area: Bounds,
        from: DVec2,
        to: DVec2,
        start: Color,
        end: Color,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Color,
    },
}

/// A retained surface that records drawing commands.
///
/// Only whole-surface clears are modelled: clearing (or resizing the
/// backing) throws away everything recorded so far, which keeps the list
/// bounded to one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    backing: (u32, u32),
    scale: f64,
    commands: Vec<DrawCmd>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            backing: (0, 0),
            scale: 1.0,
            commands: Vec::new(),
        }
    }
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Backing store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn resize_backing(&mut self, width_px: u32, height_px: u32) {
        self.backing = (width_px, height_px);
        self.commands.clear();
    }

    fn set_transform(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn clear(&mut self, area: Bounds) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear { area });
    }

    fn fill_linear_gradient(
        &mut self,
        area: Bounds,
        from: DVec2,
        to: DVec2,
        start: Color,
        end: Color,
    ) {
        self.commands.push(DrawCmd::LinearGradient {
            area,
            from,
            to,
            start,
            end,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }
}
