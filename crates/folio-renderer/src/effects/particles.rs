//! Drifting 3-D particle field with pointer repulsion.

use folio_common::types::{BackgroundEffect, Color, Viewport};
use rand::Rng;

use super::{Effect, FrameContext, InitContext};
use crate::camera::{rotate, Camera};
use crate::settings::RenderSettings;
use crate::surface::Canvas;

/// Side of the cube particles are seeded in.
pub const FIELD_SIZE: f32 = 10.0;
/// Particles never leave `[-BOUND, BOUND]` on any axis.
pub const BOUND: f32 = 7.5;

const COUNTER_STEP: f32 = 0.01;
const PHASE_SPREAD: f32 = 0.1;
const DRIFT: f32 = 0.005;
const POINTER_RADIUS: f32 = 1.0;
const PUSH: f32 = 0.02;
const MIN_PUSH_DISTANCE: f32 = 0.1;
/// Whole-field rotation per unit of counter (x, y).
const SPIN: (f32, f32) = (0.1, 0.2);
/// World-space point radius.
const POINT_SIZE: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleVertex {
    pub position: [f32; 3],
}

pub struct ParticleField {
    vertices: Vec<ParticleVertex>,
    counter: f32,
    speed: f32,
    interactive: bool,
    pointer: Option<[f32; 2]>,
    size: (u32, u32),
    camera: Camera,
    color: Color,
}

pub(super) fn init(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    Box::new(ParticleField::new(settings, ctx.viewport, &mut *ctx.rng))
}

impl ParticleField {
    pub fn new(settings: &RenderSettings, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let half = FIELD_SIZE / 2.0;
        let vertices = (0..settings.density)
            .map(|_| ParticleVertex {
                position: [
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ],
            })
            .collect();

        Self {
            vertices,
            counter: 0.0,
            speed: settings.speed,
            interactive: settings.interactive,
            pointer: None,
            size: viewport.pixel_size(),
            camera: Camera::default(),
            color: settings.primary.with_alpha(0.8 * settings.opacity),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Pointer position on the `z = 0` plane, if inside the surface.
    pub fn pointer(&self) -> Option<[f32; 2]> {
        self.pointer
    }

    fn repel(&self, position: &mut [f32; 3]) {
        let Some([px, py]) = self.pointer else {
            return;
        };
        let (dx, dy) = (position[0] - px, position[1] - py);
        let d = (dx * dx + dy * dy).sqrt();
        if d >= POINTER_RADIUS {
            return;
        }
        let magnitude = PUSH / d.max(MIN_PUSH_DISTANCE);
        let (nx, ny) = if d > f32::EPSILON {
            (dx / d, dy / d)
        } else {
            (1.0, 0.0)
        };
        position[0] += nx * magnitude;
        position[1] += ny * magnitude;
    }
}

impl Effect for ParticleField {
    fn kind(&self) -> BackgroundEffect {
        BackgroundEffect::Particles
    }

    fn update(&mut self, _frame: &FrameContext) {
        self.counter += COUNTER_STEP * self.speed;
        for i in 0..self.vertices.len() {
            let phase = self.counter + i as f32 * PHASE_SPREAD;
            let mut p = self.vertices[i].position;
            p[0] += phase.sin() * DRIFT;
            p[1] += phase.cos() * DRIFT;
            p[2] += phase.sin() * DRIFT;
            if self.interactive {
                self.repel(&mut p);
            }
            for axis in &mut p {
                *axis = if axis.is_finite() {
                    axis.clamp(-BOUND, BOUND)
                } else {
                    0.0
                };
            }
            self.vertices[i].position = p;
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport.pixel_size();
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let (rx, ry) = (self.counter * SPIN.0, self.counter * SPIN.1);
        for position in self.positions() {
            let Some(p) = self.camera.project(rotate(position, rx, ry), self.size) else {
                continue;
            };
            let radius = (POINT_SIZE * p.scale).max(0.75);
            canvas.fill_circle(p.x, p.y, radius, self.color);
        }
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some(self.camera.unproject_to_plane(x, y, self.size));
    }

    fn pointer_left(&mut self) {
        self.pointer = None;
    }

    fn teardown(&mut self) {
        self.vertices = Vec::new();
        self.pointer = None;
    }
}
