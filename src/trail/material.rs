use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;
use vfxcore::properties::{TRAIL_ALPHA, TRAIL_FRESNEL_POWER, TRAIL_MAIN_COLOR};
use vfxcore::target::MaterialTarget;

#[derive(ShaderType, Debug, Clone, Copy)]
pub struct TrailGlowUniform {
    pub main_color: Vec4,
    pub fresnel_power: f32,
    pub alpha: f32,
}

/// Translucent fresnel glow drawn on trail ghosts
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct TrailGlowMaterial {
    #[uniform(0)]
    pub params: TrailGlowUniform,
}

impl Material for TrailGlowMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/trail_glow.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}

impl Default for TrailGlowMaterial {
    fn default() -> Self {
        Self {
            params: TrailGlowUniform {
                main_color: Vec4::ONE,
                fresnel_power: 2.0,
                alpha: 1.0,
            },
        }
    }
}

impl MaterialTarget for TrailGlowMaterial {
    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            TRAIL_FRESNEL_POWER => self.params.fresnel_power = value,
            TRAIL_ALPHA => self.params.alpha = value,
            _ => trace!("trail material has no float `{name}`"),
        }
    }

    fn float(&self, name: &str) -> Option<f32> {
        match name {
            TRAIL_FRESNEL_POWER => Some(self.params.fresnel_power),
            TRAIL_ALPHA => Some(self.params.alpha),
            _ => None,
        }
    }

    fn set_color(&mut self, name: &str, color: Vec4) {
        if name == TRAIL_MAIN_COLOR {
            self.params.main_color = color;
        }
    }
}
