use std::path::Path;

use folio_common::types::Color;
use folio_common::RenderError;
use image::{ImageFormat, Rgba, RgbaImage};

use super::{sample_stops, Canvas, GradientStop, Rect};

/// Longest line we rasterize, in steps. Projected points close to the
/// camera can land far off-surface.
const MAX_LINE_STEPS: f32 = 8192.0;

/// Software RGBA8 surface.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Reallocate for new dimensions. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Some(Color::from_rgba(r, g, b, a))
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode the current contents as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| RenderError::Encode(format!("{}: {e}", path.display())))
    }

    /// Source-over blend of `color` scaled by `coverage` into one pixel.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let Rgba([dr, dg, db, da]) = *dst;
        let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8;
        let out_a = alpha + (da as f32 / 255.0) * (1.0 - alpha);
        *dst = Rgba([
            mix(color.r, dr),
            mix(color.g, dg),
            mix(color.b, db),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }

    /// Pixel bounds of a square around a center, clamped to the surface.
    fn bounds(&self, cx: f32, cy: f32, radius: f32) -> Option<(i64, i64, i64, i64)> {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return None;
        }
        let x0 = ((cx - radius).floor() as i64).max(0);
        let y0 = ((cy - radius).floor() as i64).max(0);
        let x1 = ((cx + radius).ceil() as i64).min(self.width() as i64 - 1);
        let y1 = ((cy + radius).ceil() as i64).min(self.height() as i64 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }
}

impl Canvas for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Color) {
        let px = Rgba(color.rgba8());
        for pixel in self.image.pixels_mut() {
            *pixel = px;
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let Some((x0, y0, x1, y1)) = self.bounds(cx, cy, radius + 1.0) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
                let coverage = radius + 0.5 - d;
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_glow(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let Some((x0, y0, x1, y1)) = self.bounds(cx, cy, radius) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
                if d < radius {
                    let falloff = 1.0 - d / radius;
                    self.blend(x, y, color, falloff * falloff);
                }
            }
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        if !(from.0.is_finite() && from.1.is_finite() && dx.is_finite() && dy.is_finite()) {
            return;
        }
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, MAX_LINE_STEPS);
        let n = steps as i64;
        for i in 0..=n {
            let t = i as f32 / steps;
            let x = (from.0 + dx * t).floor() as i64;
            let y = (from.1 + dy * t).floor() as i64;
            self.blend(x, y, color, 1.0);
        }
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 || points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
        let row_start = (min_y.floor() as i64).max(0);
        let row_end = (max_y.ceil() as i64).min(self.height() as i64 - 1);
        let max_x = self.width() as i64 - 1;

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for row in row_start..=row_end {
            let sample_y = row as f32 + 0.5;
            crossings.clear();
            for (i, &(x0, y0)) in points.iter().enumerate() {
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= sample_y && sample_y < y1) || (y1 <= sample_y && sample_y < y0) {
                    crossings.push(x0 + (sample_y - y0) * (x1 - x0) / (y1 - y0));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = ((span[0] - 0.5).ceil() as i64).max(0);
                let end = ((span[1] - 0.5).floor() as i64).min(max_x);
                for x in start..=end {
                    self.blend(x, row, color, 1.0);
                }
            }
        }
    }

    fn fill_linear_gradient(&mut self, area: Rect, angle_deg: f32, stops: &[GradientStop]) {
        if stops.is_empty() || !angle_deg.is_finite() {
            return;
        }
        let theta = angle_deg.to_radians();
        let dir = (theta.sin(), -theta.cos());
        let length = (area.width * dir.0).abs() + (area.height * dir.1).abs();
        if length <= f32::EPSILON {
            return;
        }
        let center = (area.x + area.width / 2.0, area.y + area.height / 2.0);

        let x0 = (area.x.floor() as i64).max(0);
        let y0 = (area.y.floor() as i64).max(0);
        let x1 = ((area.x + area.width).ceil() as i64).min(self.width() as i64);
        let y1 = ((area.y + area.height).ceil() as i64).min(self.height() as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (x as f32 + 0.5 - center.0, y as f32 + 0.5 - center.1);
                let t = (px * dir.0 + py * dir.1) / length + 0.5;
                if let Some(color) = sample_stops(stops, t) {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }
}
