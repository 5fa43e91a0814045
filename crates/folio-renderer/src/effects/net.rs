//! Undulating wireframe grid.

use folio_common::types::{BackgroundEffect, Color, Viewport};

use super::{Effect, FrameContext, InitContext};
use crate::camera::{Camera, Projected};
use crate::settings::RenderSettings;
use crate::surface::Canvas;

/// Grid rows across the visible height of the `z = 0` plane.
const ROWS: u32 = 16;
/// Wider viewports stretch the spacing instead of adding columns.
pub const MAX_COLUMNS: u32 = 160;
const WAVE_FREQUENCY: f32 = 0.3;
const AMPLITUDE: f32 = 0.5;
const TIME_STEP: f32 = 0.02;
/// Connect points closer than this many grid spacings.
const LINK_FACTOR: f32 = 1.5;

pub struct NetGrid {
    points: Vec<[f32; 3]>,
    connections: Vec<(u32, u32)>,
    spacing: f32,
    rows: u32,
    cols: u32,
    time: f32,
    speed: f32,
    size: (u32, u32),
    camera: Camera,
    line_color: Color,
    point_color: Color,
}

pub(super) fn init(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    Box::new(NetGrid::new(settings, ctx.viewport))
}

impl NetGrid {
    pub fn new(settings: &RenderSettings, viewport: Viewport) -> Self {
        let mut grid = Self {
            points: Vec::new(),
            connections: Vec::new(),
            spacing: 0.0,
            rows: 0,
            cols: 0,
            time: 0.0,
            speed: settings.speed,
            size: viewport.pixel_size(),
            camera: Camera::default(),
            line_color: settings.primary.with_alpha(0.3 * settings.opacity),
            point_color: settings.primary.with_alpha(0.8 * settings.opacity),
        };
        grid.layout();
        grid
    }

    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    pub fn connections(&self) -> &[(u32, u32)] {
        &self.connections
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Grid dimensions as `(rows, cols)` of points.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Lay the grid over the visible plane for the current size.
    ///
    /// Points sit on a regular lattice, so every link below
    /// `LINK_FACTOR` spacings is one of the four forward neighbours
    /// (right, down, and both lower diagonals).
    fn layout(&mut self) {
        let [half_w, half_h] = self
            .camera
            .unproject_to_plane(self.size.0 as f32, 0.0, self.size);
        let (half_w, half_h) = (half_w.abs().max(1.0), half_h.abs().max(1.0));

        let spacing = (2.0 * half_h / ROWS as f32).max(2.0 * half_w / (MAX_COLUMNS - 1) as f32);
        let rows = ((2.0 * half_h / spacing).ceil() as u32 + 1).clamp(2, ROWS + 1);
        let cols = ((2.0 * half_w / spacing).ceil() as u32 + 1).clamp(2, MAX_COLUMNS);

        let mut points = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                points.push([
                    -half_w + col as f32 * spacing,
                    -half_h + row as f32 * spacing,
                    0.0,
                ]);
            }
        }

        let index = |row: u32, col: u32| row * cols + col;
        let mut connections = Vec::with_capacity(points.len() * 4);
        for row in 0..rows {
            for col in 0..cols {
                let here = index(row, col);
                if col + 1 < cols {
                    connections.push((here, index(row, col + 1)));
                }
                if row + 1 < rows {
                    if col > 0 {
                        connections.push((here, index(row + 1, col - 1)));
                    }
                    connections.push((here, index(row + 1, col)));
                    if col + 1 < cols {
                        connections.push((here, index(row + 1, col + 1)));
                    }
                }
            }
        }

        self.points = points;
        self.connections = connections;
        self.spacing = spacing;
        self.rows = rows;
        self.cols = cols;
        self.apply_heights();
    }

    fn apply_heights(&mut self) {
        let t = self.time;
        for p in &mut self.points {
            p[2] = (p[0] * WAVE_FREQUENCY + t).sin() * (p[1] * WAVE_FREQUENCY + t).cos() * AMPLITUDE;
        }
    }

    fn project(&self, index: u32) -> Option<Projected> {
        let point = self.points.get(index as usize)?;
        self.camera.project(*point, self.size)
    }
}

impl Effect for NetGrid {
    fn kind(&self) -> BackgroundEffect {
        BackgroundEffect::Net
    }

    fn update(&mut self, _frame: &FrameContext) {
        self.time += TIME_STEP * self.speed;
        self.apply_heights();
    }

    fn resize(&mut self, viewport: Viewport) {
        let size = viewport.pixel_size();
        if size != self.size {
            self.size = size;
            self.layout();
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for &(a, b) in &self.connections {
            if let (Some(pa), Some(pb)) = (self.project(a), self.project(b)) {
                canvas.draw_line((pa.x, pa.y), (pb.x, pb.y), self.line_color);
            }
        }
        for i in 0..self.points.len() as u32 {
            if let Some(p) = self.project(i) {
                canvas.fill_circle(p.x, p.y, (0.02 * p.scale).max(0.75), self.point_color);
            }
        }
    }

    fn teardown(&mut self) {
        self.points = Vec::new();
        self.connections = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::surface::RasterSurface;

    fn grid() -> NetGrid {
        NetGrid::new(&RenderSettings::default(), Viewport::new(800, 450))
    }

    #[test]
    fn interior_points_link_to_all_eight_neighbors() {
        let g = grid();
        let mut degree: HashMap<u32, usize> = HashMap::new();
        for &(a, b) in g.connections() {
            *degree.entry(a).or_default() += 1;
            *degree.entry(b).or_default() += 1;
        }
        assert_eq!(degree.values().copied().max(), Some(8));
        // Corners only see one orthogonal pair plus a diagonal.
        assert_eq!(degree[&0], 3);
    }

    #[test]
    fn connections_respect_threshold() {
        let g = grid();
        let threshold = g.spacing() * LINK_FACTOR;
        for &(a, b) in g.connections() {
            assert!(a < b);
            let (pa, pb) = (g.points()[a as usize], g.points()[b as usize]);
            let d = ((pa[0] - pb[0]).powi(2) + (pa[1] - pb[1]).powi(2)).sqrt();
            assert!(d < threshold);
        }
    }

    #[test]
    fn heights_follow_the_surface_function() {
        let mut g = grid();
        for _ in 0..50 {
            g.update(&FrameContext { dt: 0.016 });
        }
        let t = g.time;
        for p in g.points() {
            let expected = (p[0] * 0.3 + t).sin() * (p[1] * 0.3 + t).cos() * AMPLITUDE;
            assert!((p[2] - expected).abs() < 1e-5);
            assert!(p[2].abs() <= AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn links_match_distance_threshold() {
        let g = NetGrid::new(&RenderSettings::default(), Viewport::new(320, 180));
        let threshold = g.spacing() * LINK_FACTOR;
        let points = g.points();

        let mut expected = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (dx, dy) = (points[i][0] - points[j][0], points[i][1] - points[j][1]);
                if (dx * dx + dy * dy).sqrt() < threshold {
                    expected.push((i as u32, j as u32));
                }
            }
        }

        let mut actual = g.connections().to_vec();
        actual.sort_unstable();
        expected.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn extreme_aspect_caps_columns() {
        let g = NetGrid::new(&RenderSettings::default(), Viewport::new(2048, 8));
        let (rows, cols) = g.dimensions();
        assert!(cols <= MAX_COLUMNS);
        assert!(rows >= 2);
        assert_eq!(g.points().len(), (rows * cols) as usize);
        assert!(g.connections().len() <= g.points().len() * 4);

        let tall = NetGrid::new(&RenderSettings::default(), Viewport::new(8, 8192));
        assert!(tall.points().len() <= ((ROWS + 1) * MAX_COLUMNS) as usize);
    }

    #[test]
    fn grid_covers_the_visible_plane() {
        let g = NetGrid::new(&RenderSettings::default(), Viewport::new(4096, 100));
        let camera = Camera::default();
        let [half_w, _] = camera.unproject_to_plane(4096.0, 0.0, (4096, 100));
        let right = g.points().iter().map(|p| p[0]).fold(f32::MIN, f32::max);
        assert!(right >= half_w.abs() - 1e-3, "right edge {right} < {half_w}");
    }

    #[test]
    fn frames_keep_connections() {
        let mut g = grid();
        let before = g.connections().to_vec();
        for _ in 0..20 {
            g.update(&FrameContext { dt: 0.016 });
        }
        assert_eq!(g.connections(), before.as_slice());
    }

    #[test]
    fn resize_relays_grid_and_keeps_time() {
        let mut g = grid();
        for _ in 0..10 {
            g.update(&FrameContext { dt: 0.016 });
        }
        let time = g.time;
        let (_, narrow_cols) = g.dimensions();

        g.resize(Viewport::new(1600, 450));
        let (_, wide_cols) = g.dimensions();
        assert!(wide_cols > narrow_cols);
        assert_eq!(g.time, time);
        for p in g.points() {
            let expected = (p[0] * 0.3 + time).sin() * (p[1] * 0.3 + time).cos() * AMPLITUDE;
            assert!((p[2] - expected).abs() < 1e-5);
        }

        let before = g.connections().to_vec();
        g.resize(Viewport::new(1600, 450));
        assert_eq!(g.connections(), before.as_slice());
    }

    #[test]
    fn paints_lines_and_points() {
        let g = grid();
        let mut surface = RasterSurface::new(800, 450);
        g.paint(&mut surface);
        assert!(surface.as_bytes().iter().any(|&b| b != 0));
    }
}
