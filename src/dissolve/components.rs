use crate::dissolve::material::DissolveMaterial;
use bevy::color::ColorToComponents;
use bevy::prelude::*;
use vfxcore::config::{DissolveConfig, VologramDissolveConfig};
use vfxcore::dissolve::DissolveAnimator;
use vfxcore::vologram::VologramDissolveAnimator;

/// Dissolves a static mesh. The entity's standard material(s) get replaced by a
/// [`DissolveMaterial`] the frame this component is added.
#[derive(Component)]
pub struct Dissolve {
    pub animator: DissolveAnimator,
}

impl Dissolve {
    pub fn new(config: DissolveConfig) -> Self {
        Self {
            animator: DissolveAnimator::new(config),
        }
    }

    pub fn set_play_state(&mut self, play: bool) {
        self.animator.set_play_state(play);
    }

    pub fn set_use_distinct_colors(&mut self, distinct: bool) {
        self.animator.set_use_distinct_colors(distinct);
    }

    pub fn set_model_color(&mut self, color: Color) {
        self.animator.set_model_color(color.to_linear().to_vec4());
    }

    pub fn set_effect_color(&mut self, color: Color) {
        self.animator.set_effect_color(color.to_linear().to_vec4());
    }
}

/// Dissolve that starts when the entity's [`VolumetricPlayback`](crate::vologram::VolumetricPlayback)
/// reaches the configured frame.
#[derive(Component)]
pub struct VologramDissolve {
    pub animator: VologramDissolveAnimator,
}

impl VologramDissolve {
    pub fn new(config: VologramDissolveConfig) -> Self {
        Self {
            animator: VologramDissolveAnimator::new(config),
        }
    }

    pub fn set_play_state(&mut self, play: bool) {
        self.animator.set_play_state(play);
    }

    pub fn set_use_distinct_colors(&mut self, distinct: bool) {
        self.animator.set_use_distinct_colors(distinct);
    }

    pub fn set_model_color(&mut self, color: Color) {
        self.animator.set_model_color(color.to_linear().to_vec4());
    }

    pub fn set_effect_color(&mut self, color: Color) {
        self.animator.set_effect_color(color.to_linear().to_vec4());
    }
}

/// Handles a dissolve writes to, resolved once when the component is installed.
#[derive(Component, Debug, Default)]
pub struct DissolveBinding {
    pub materials: Vec<Handle<DissolveMaterial>>,
    pub albedo: Option<Handle<Image>>,
    pub particles: Option<Entity>,
}
