//! Declarative gradient backdrop.
//!
//! The host animates it (a slow background-position cycle); the renderer
//! only paints the static frame and publishes the description.

use folio_common::types::{BackgroundEffect, Color, Viewport};
use serde::Serialize;

use super::{Effect, FrameContext, InitContext};
use crate::settings::RenderSettings;
use crate::surface::{Canvas, GradientStop, Rect};

/// What the host needs to animate the gradient itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientDescription {
    /// Hex colors in stop order.
    pub colors: Vec<String>,
    pub angle_deg: f32,
    pub cycle_secs: f32,
}

impl GradientDescription {
    /// CSS `linear-gradient(...)` with evenly spaced stops.
    pub fn css(&self) -> String {
        let last = self.colors.len().saturating_sub(1).max(1) as f32;
        let stops: Vec<String> = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c} {}%", (i as f32 / last * 100.0).round()))
            .collect();
        format!("linear-gradient({}deg, {})", self.angle_deg, stops.join(", "))
    }
}

pub struct GradientBackdrop {
    stops: Vec<GradientStop>,
    background: Color,
    angle_deg: f32,
    cycle_secs: f32,
    size: (u32, u32),
}

pub(super) fn init(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    Box::new(GradientBackdrop::new(settings, ctx.viewport))
}

impl GradientBackdrop {
    pub fn new(settings: &RenderSettings, viewport: Viewport) -> Self {
        let stops = vec![
            GradientStop::new(0.0, settings.primary.with_alpha(settings.opacity)),
            GradientStop::new(0.5, settings.secondary),
            GradientStop::new(1.0, settings.background),
        ];
        Self {
            stops,
            background: settings.background,
            angle_deg: settings.gradient.angle_deg,
            cycle_secs: settings.gradient.cycle_secs,
            size: viewport.pixel_size(),
        }
    }

    pub fn description(&self) -> GradientDescription {
        GradientDescription {
            colors: self.stops.iter().map(|s| s.color.to_hex()).collect(),
            angle_deg: self.angle_deg,
            cycle_secs: self.cycle_secs,
        }
    }
}

impl Effect for GradientBackdrop {
    fn kind(&self) -> BackgroundEffect {
        BackgroundEffect::Gradient
    }

    fn update(&mut self, _frame: &FrameContext) {}

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport.pixel_size();
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.clear(self.background);
        canvas.fill_linear_gradient(Rect::full(self.size), self.angle_deg, &self.stops);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    #[test]
    fn description_uses_palette_and_config() {
        let settings = RenderSettings::default();
        let backdrop = GradientBackdrop::new(&settings, Viewport::new(100, 100));
        let desc = backdrop.description();
        assert_eq!(desc.angle_deg, 135.0);
        assert_eq!(desc.cycle_secs, 15.0);
        assert_eq!(desc.colors.len(), 3);
        assert!(desc.colors[0].starts_with("#f97316"));
        assert_eq!(desc.colors[2], "#ffffff");
    }

    #[test]
    fn css_lists_evenly_spaced_stops() {
        let desc = GradientDescription {
            colors: vec!["#000000".into(), "#111111".into(), "#ffffff".into()],
            angle_deg: 135.0,
            cycle_secs: 15.0,
        };
        assert_eq!(
            desc.css(),
            "linear-gradient(135deg, #000000 0%, #111111 50%, #ffffff 100%)"
        );
    }

    #[test]
    fn paints_corner_to_corner() {
        let mut settings = RenderSettings::default();
        settings.opacity = 1.0;
        let backdrop = GradientBackdrop::new(&settings, Viewport::new(64, 64));
        let mut surface = RasterSurface::new(64, 64);
        backdrop.paint(&mut surface);

        let start = surface.pixel(0, 0).unwrap();
        let end = surface.pixel(63, 63).unwrap();
        assert!(start.r > 240 && start.b < 60, "start {start:?}");
        assert_eq!(end, settings.background);
    }

    #[test]
    fn update_is_inert() {
        let settings = RenderSettings::default();
        let mut backdrop = GradientBackdrop::new(&settings, Viewport::new(10, 10));
        let before = backdrop.description();
        backdrop.update(&FrameContext { dt: 1.0 });
        assert_eq!(backdrop.description(), before);
    }
}
