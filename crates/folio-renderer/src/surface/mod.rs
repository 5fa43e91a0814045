//! Drawing surfaces.
//!
//! Effects paint through the [`Canvas`] trait; [`RasterSurface`] is the
//! software implementation backed by an RGBA8 image. Hosts hand surfaces
//! to the renderer through a [`SurfaceProvider`], which may decline (no
//! display, zero-sized viewport) in which case the renderer stays idle.

mod raster;


pub use raster::RasterSurface;

use folio_common::types::{Color, Viewport};

/// Axis-aligned region in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole surface of the given size.
    pub fn full((width, height): (u32, u32)) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }
}

/// One color stop along a gradient line, `offset` in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Immediate-mode drawing operations used by the effects.
///
/// All coordinates are surface pixels. Everything is alpha-blended over
/// what is already there except [`Canvas::clear`].
pub trait Canvas {
    fn size(&self) -> (u32, u32);

    /// Overwrite every pixel with `color`.
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    /// Soft radial falloff from `color` at the center to transparent at
    /// `radius`.
    fn fill_glow(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color);

    /// Even-odd fill of a closed polygon.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color);

    /// CSS-style linear gradient: 0 degrees points up, 90 points right.
    fn fill_linear_gradient(&mut self, area: Rect, angle_deg: f32, stops: &[GradientStop]);
}

/// Source of drawing surfaces for the renderer.
pub trait SurfaceProvider: Send {
    /// A surface sized for `viewport`, or `None` when drawing is not
    /// possible right now.
    fn acquire(&mut self, viewport: Viewport) -> Option<RasterSurface>;

    /// Hand back a surface the renderer no longer uses.
    fn release(&mut self, _surface: RasterSurface) {}
}

/// Allocates fresh in-memory surfaces; declines empty viewports.
#[derive(Debug, Default, Clone, Copy)]
pub struct OffscreenSurfaces;

impl SurfaceProvider for OffscreenSurfaces {
    fn acquire(&mut self, viewport: Viewport) -> Option<RasterSurface> {
        if viewport.is_empty() {
            return None;
        }
        let (width, height) = viewport.pixel_size();
        Some(RasterSurface::new(width, height))
    }
}

/// Never provides a surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSurface;

impl SurfaceProvider for NoSurface {
    fn acquire(&mut self, _viewport: Viewport) -> Option<RasterSurface> {
        None
    }
}

/// Color at `t` along `stops`, which must be sorted by offset.
pub fn sample_stops(stops: &[GradientStop], t: f32) -> Option<Color> {
    let first = stops.first()?;
    let last = stops.last()?;
    if t <= first.offset {
        return Some(first.color);
    }
    if t >= last.offset {
        return Some(last.color);
    }
    stops.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        if t < a.offset || t > b.offset {
            return None;
        }
        let span = b.offset - a.offset;
        let local = if span > f32::EPSILON {
            (t - a.offset) / span
        } else {
            0.0
        };
        Some(a.color.lerp(b.color, local))
    })
}
