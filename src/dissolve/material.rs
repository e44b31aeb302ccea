use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;
use vfxcore::properties::{ALBEDO, DISSOLVE_AMOUNT, DISSOLVE_COLOR, NOISE_SCALE};
use vfxcore::target::{MaterialTarget, RendererTarget, TexturedMaterial};

#[derive(ShaderType, Debug, Clone, Copy)]
pub struct DissolveUniform {
    pub base_color: Vec4,
    pub dissolve_color: Vec4,
    pub dissolve_amount: f32,
    pub noise_scale: f32,
    pub edge_width: f32,
}

/// Surface that erodes away wherever a 3D noise value falls below `dissolve_amount`.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct DissolveMaterial {
    #[uniform(0)]
    pub params: DissolveUniform,
    #[texture(1)]
    #[sampler(2)]
    pub albedo: Option<Handle<Image>>,
}

impl Material for DissolveMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/dissolve.wgsl".into()
    }
}

impl Default for DissolveMaterial {
    fn default() -> Self {
        Self {
            params: DissolveUniform {
                base_color: Vec4::ONE,
                dissolve_color: Vec4::ONE,
                dissolve_amount: 0.0,
                noise_scale: 100.0,
                edge_width: 0.05,
            },
            albedo: None,
        }
    }
}

impl DissolveMaterial {
    /// Takes over the look of a standard material it replaces.
    pub fn from_standard(standard: &StandardMaterial, albedo: Option<Handle<Image>>) -> Self {
        let mut material = Self {
            albedo,
            ..default()
        };
        material.params.base_color = standard.base_color.to_linear().to_vec4();
        material
    }
}

impl MaterialTarget for DissolveMaterial {
    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            DISSOLVE_AMOUNT => self.params.dissolve_amount = value,
            NOISE_SCALE => self.params.noise_scale = value,
            _ => trace!("dissolve material has no float `{name}`"),
        }
    }

    fn float(&self, name: &str) -> Option<f32> {
        match name {
            DISSOLVE_AMOUNT => Some(self.params.dissolve_amount),
            NOISE_SCALE => Some(self.params.noise_scale),
            _ => None,
        }
    }

    fn set_color(&mut self, name: &str, color: Vec4) {
        if name == DISSOLVE_COLOR {
            self.params.dissolve_color = color;
        }
    }
}

impl TexturedMaterial for DissolveMaterial {
    type Texture = Handle<Image>;

    fn texture(&self, name: &str) -> Option<Handle<Image>> {
        (name == ALBEDO).then(|| self.albedo.clone()).flatten()
    }

    fn set_texture(&mut self, name: &str, texture: Handle<Image>) {
        if name == ALBEDO {
            self.albedo = Some(texture);
        }
    }
}

/// The dissolve materials of one entity, resolved against the asset store.
pub struct DissolveRenderer<'a> {
    assets: &'a mut Assets<DissolveMaterial>,
    handles: &'a [Handle<DissolveMaterial>],
}

impl<'a> DissolveRenderer<'a> {
    pub fn new(assets: &'a mut Assets<DissolveMaterial>, handles: &'a [Handle<DissolveMaterial>]) -> Self {
        Self { assets, handles }
    }
}

impl RendererTarget for DissolveRenderer<'_> {
    type Material = DissolveMaterial;

    fn material_count(&self) -> usize {
        self.handles.len()
    }

    fn material(&self, index: usize) -> Option<&DissolveMaterial> {
        self.assets.get(self.handles.get(index)?)
    }

    fn material_mut(&mut self, index: usize) -> Option<&mut DissolveMaterial> {
        self.assets.get_mut(self.handles.get(index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DISSOLVE_AMOUNT, 0.4)]
    #[case(NOISE_SCALE, 250.0)]
    fn test_float_properties_round_trip(#[case] name: &str, #[case] value: f32) {
        let mut material = DissolveMaterial::default();
        material.set_float(name, value);
        assert_eq!(material.float(name), Some(value));
    }

    #[test]
    fn test_unknown_property_is_ignored() {
        let mut material = DissolveMaterial::default();
        material.set_float("fresnel_power", 3.0);
        assert_eq!(material.float("fresnel_power"), None);
        assert_eq!(material.params.dissolve_amount, 0.0);
    }

    #[test]
    fn test_from_standard_keeps_base_color() {
        let standard = StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.4, 0.6),
            ..default()
        };
        let material = DissolveMaterial::from_standard(&standard, None);
        assert_eq!(material.params.base_color, Vec4::new(0.2, 0.4, 0.6, 1.0));
        assert!(material.texture(ALBEDO).is_none());
    }

    #[test]
    fn test_renderer_writes_through_handles() {
        let mut assets = Assets::<DissolveMaterial>::default();
        let handles = vec![assets.add(DissolveMaterial::default()), assets.add(DissolveMaterial::default())];
        let mut renderer = DissolveRenderer::new(&mut assets, &handles);

        assert_eq!(renderer.material_count(), 2);
        renderer.material_mut(1).unwrap().set_float(DISSOLVE_AMOUNT, 0.75);
        assert_eq!(renderer.material(1).unwrap().params.dissolve_amount, 0.75);
        assert_eq!(renderer.material(0).unwrap().params.dissolve_amount, 0.0);
        assert!(renderer.material(2).is_none());
    }
}
