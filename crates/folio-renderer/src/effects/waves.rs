//! Layered sine waves filled to the bottom edge.

use std::f32::consts::TAU;

use folio_common::types::{BackgroundEffect, Color, Viewport};

use super::{Effect, FrameContext, InitContext};
use crate::settings::RenderSettings;
use crate::surface::Canvas;

const PHASE_STEP: f32 = 0.02;
/// Horizontal sample spacing in surface pixels.
const SAMPLE_STEP: f32 = 4.0;

/// Shape of one wave relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WaveShape {
    /// Resting line as a fraction of surface height.
    baseline: f32,
    /// Peak displacement as a fraction of surface height.
    amplitude: f32,
    /// Full cycles across the surface width.
    cycles: f32,
    /// Relative phase speed.
    rate: f32,
}

const SHAPES: [WaveShape; 3] = [
    WaveShape {
        baseline: 0.55,
        amplitude: 0.06,
        cycles: 1.5,
        rate: 1.0,
    },
    WaveShape {
        baseline: 0.65,
        amplitude: 0.05,
        cycles: 2.2,
        rate: 0.8,
    },
    WaveShape {
        baseline: 0.75,
        amplitude: 0.04,
        cycles: 3.0,
        rate: 1.2,
    },
];

/// Pixel-space wave state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub baseline: f32,
    pub amplitude: f32,
    pub angular_frequency: f32,
    pub phase: f32,
    pub color: Color,
    rate: f32,
}

impl Wave {
    pub fn height_at(&self, x: f32) -> f32 {
        self.baseline + (x * self.angular_frequency + self.phase).sin() * self.amplitude
    }
}

pub struct WaveField {
    waves: Vec<Wave>,
    speed: f32,
    size: (u32, u32),
}

pub(super) fn init(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    Box::new(WaveField::new(settings, ctx.viewport))
}

impl WaveField {
    pub fn new(settings: &RenderSettings, viewport: Viewport) -> Self {
        let last = (SHAPES.len() - 1) as f32;
        let waves = SHAPES
            .iter()
            .enumerate()
            .map(|(i, shape)| {
                let t = i as f32 / last;
                Wave {
                    baseline: 0.0,
                    amplitude: 0.0,
                    angular_frequency: 0.0,
                    phase: i as f32,
                    color: settings
                        .primary
                        .lerp(settings.secondary, t)
                        .with_alpha((0.45 - 0.1 * i as f32) * settings.opacity),
                    rate: shape.rate,
                }
            })
            .collect();

        let mut field = Self {
            waves,
            speed: settings.speed,
            size: (0, 0),
        };
        field.resize(viewport);
        field
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }
}

impl Effect for WaveField {
    fn kind(&self) -> BackgroundEffect {
        BackgroundEffect::Waves
    }

    fn update(&mut self, _frame: &FrameContext) {
        for wave in &mut self.waves {
            wave.phase = (wave.phase + PHASE_STEP * self.speed * wave.rate) % TAU;
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport.pixel_size();
        let (w, h) = (self.size.0.max(1) as f32, self.size.1 as f32);
        for (wave, shape) in self.waves.iter_mut().zip(SHAPES.iter()) {
            wave.baseline = shape.baseline * h;
            wave.amplitude = shape.amplitude * h;
            wave.angular_frequency = shape.cycles * TAU / w;
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let samples = (w / SAMPLE_STEP).ceil() as usize;
        let mut outline = Vec::with_capacity(samples + 3);
        for wave in &self.waves {
            outline.clear();
            outline.push((0.0, h));
            for i in 0..=samples {
                let x = (i as f32 * SAMPLE_STEP).min(w);
                outline.push((x, wave.height_at(x)));
            }
            outline.push((w, h));
            canvas.fill_polygon(&outline, wave.color);
        }
    }
}
