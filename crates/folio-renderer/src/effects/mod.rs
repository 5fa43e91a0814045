//! Background effect simulations and the strategy table that selects them.
//!
//! Each [`BackgroundEffect`] maps to one [`EffectStrategy`]: a constructor
//! plus the host listeners the effect needs. The renderer looks the
//! strategy up once per switch and drives the returned [`Effect`] until
//! the next switch.

pub mod gradient;
pub mod live;
pub mod net;
pub mod particles;
pub mod video;
pub mod waves;

mod types;

pub use types::*;

use folio_common::types::BackgroundEffect;

use crate::settings::RenderSettings;

/// Constructor and listener needs for one effect.
pub struct EffectStrategy {
    pub effect: BackgroundEffect,
    pub init: fn(&RenderSettings, &mut InitContext<'_>) -> Box<dyn Effect>,
    /// Needs a per-frame callback.
    pub wants_frames: bool,
    /// Reacts to the pointer (only registered when interactive).
    pub wants_pointer: bool,
}

static PARTICLES: EffectStrategy = EffectStrategy {
    effect: BackgroundEffect::Particles,
    init: particles::init,
    wants_frames: true,
    wants_pointer: true,
};

static WAVES: EffectStrategy = EffectStrategy {
    effect: BackgroundEffect::Waves,
    init: waves::init,
    wants_frames: true,
    wants_pointer: false,
};

static GRADIENT: EffectStrategy = EffectStrategy {
    effect: BackgroundEffect::Gradient,
    init: gradient::init,
    wants_frames: false,
    wants_pointer: false,
};

static NET: EffectStrategy = EffectStrategy {
    effect: BackgroundEffect::Net,
    init: net::init,
    wants_frames: true,
    wants_pointer: false,
};

static LIVE: EffectStrategy = EffectStrategy {
    effect: BackgroundEffect::Live,
    init: live::init,
    wants_frames: true,
    wants_pointer: true,
};

static VIDEO: EffectStrategy = EffectStrategy {
    effect: BackgroundEffect::Video,
    init: video::init,
    wants_frames: true,
    wants_pointer: false,
};

pub fn strategy_for(effect: BackgroundEffect) -> &'static EffectStrategy {
    match effect {
        BackgroundEffect::Particles => &PARTICLES,
        BackgroundEffect::Waves => &WAVES,
        BackgroundEffect::Gradient => &GRADIENT,
        BackgroundEffect::Net => &NET,
        BackgroundEffect::Live => &LIVE,
        BackgroundEffect::Video => &VIDEO,
    }
}

/// Build the effect selected by `settings`.
pub fn create_effect(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    (strategy_for(settings.effect).init)(settings, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::types::Viewport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_effect_has_a_matching_strategy() {
        for effect in BackgroundEffect::ALL {
            assert_eq!(strategy_for(effect).effect, effect);
        }
    }

    #[test]
    fn only_gradient_skips_frames() {
        for effect in BackgroundEffect::ALL {
            let expected = effect != BackgroundEffect::Gradient;
            assert_eq!(strategy_for(effect).wants_frames, expected, "{effect}");
        }
    }

    #[test]
    fn create_effect_builds_the_selected_kind() {
        let factory = video::default_factory();
        let mut rng = StdRng::seed_from_u64(7);
        for effect in BackgroundEffect::ALL {
            let settings = RenderSettings::default().with_effect(effect);
            let mut ctx = InitContext {
                viewport: Viewport::new(320, 200),
                rng: &mut rng,
                video: &factory,
            };
            let built = create_effect(&settings, &mut ctx);
            assert_eq!(built.kind(), effect);
        }
    }
}
