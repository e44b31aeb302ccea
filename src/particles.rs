// Particle burst that accompanies a dissolve, built on bevy_hanabi

use bevy::prelude::*;
use bevy::camera::primitives::MeshAabb;
use bevy_hanabi::prelude::*;
use vfxcore::dissolve::DEFAULT_EFFECT_DURATION;
use vfxcore::properties::{EFFECT_BASE_COLOR, EFFECT_DURATION};
use vfxcore::target::EffectTarget;

pub const EMITTER_RADIUS: &str = "emitter_radius";

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HanabiPlugin)
            .add_systems(Startup, setup_dissolve_effect);
    }
}

#[derive(Resource)]
pub struct DissolveEffect(pub Handle<EffectAsset>);

/// State of one dissolve particle emitter; lives on the effect entity.
#[derive(Component, Debug)]
pub struct DissolveParticles {
    pub duration: f32,
    pub source_mesh: Option<Handle<Mesh>>,
}

impl Default for DissolveParticles {
    fn default() -> Self {
        Self {
            duration: DEFAULT_EFFECT_DURATION,
            source_mesh: None,
        }
    }
}

fn setup_dissolve_effect(mut commands: Commands, mut effects: ResMut<Assets<EffectAsset>>) {
    let writer = ExprWriter::new();

    let base_color = writer.add_property(EFFECT_BASE_COLOR, Vec4::ONE.into());
    let duration = writer.add_property(EFFECT_DURATION, DEFAULT_EFFECT_DURATION.into());
    let radius = writer.add_property(EMITTER_RADIUS, 1.0_f32.into());

    // particles peel off the surface and drift upwards
    let init_pos = SetPositionSphereModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        radius: writer.prop(radius).expr(),
        dimension: ShapeDimension::Surface,
    };
    let init_vel = SetVelocitySphereModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        speed: writer.lit(0.2).uniform(writer.lit(0.8)).expr(),
    };
    let init_age = SetAttributeModifier::new(Attribute::AGE, writer.lit(0.0).expr());
    let init_lifetime = SetAttributeModifier::new(Attribute::LIFETIME, writer.prop(duration).expr());
    let init_color = SetAttributeModifier::new(Attribute::HDR_COLOR, writer.prop(base_color).expr());
    let update_accel = AccelModifier::new(writer.lit(Vec3::new(0.0, 0.8, 0.0)).expr());
    let update_drag = LinearDragModifier::new(writer.lit(1.5).expr());

    let module = writer.finish();

    let mut size_gradient = bevy_hanabi::Gradient::new();
    size_gradient.add_key(0.0, Vec3::splat(0.05));
    size_gradient.add_key(1.0, Vec3::ZERO);

    let effect = EffectAsset::new(4096, SpawnerSettings::once(600.0.into()), module)
        .with_name("dissolve_particles")
        .init(init_pos)
        .init(init_vel)
        .init(init_age)
        .init(init_lifetime)
        .init(init_color)
        .update(update_accel)
        .update(update_drag)
        .render(OrientModifier::new(OrientMode::FaceCameraPosition))
        .render(SizeOverLifetimeModifier {
            gradient: size_gradient,
            screen_space_size: false,
        });

    commands.insert_resource(DissolveEffect(effects.add(effect)));
    info!("Dissolve particle effect ready");
}

/// Spawns a hidden emitter as a child of `owner`.
pub fn spawn_dissolve_particles(commands: &mut Commands, effect: &DissolveEffect, owner: Entity) -> Entity {
    commands
        .spawn((
            Name::new("Dissolve particles"),
            ParticleEffect::new(effect.0.clone()),
            EffectProperties::default(),
            DissolveParticles::default(),
            Transform::default(),
            Visibility::Hidden,
            ChildOf(owner),
        ))
        .id()
}

/// [`EffectTarget`] view over one dissolve emitter.
pub struct HanabiDissolveEffect<'a> {
    pub properties: Mut<'a, EffectProperties>,
    pub spawner: Option<Mut<'a, EffectSpawner>>,
    pub visibility: Mut<'a, Visibility>,
    pub state: Mut<'a, DissolveParticles>,
    pub meshes: &'a Assets<Mesh>,
}

impl EffectTarget for HanabiDissolveEffect<'_> {
    type Mesh = Handle<Mesh>;

    fn float(&self, name: &str) -> Option<f32> {
        (name == EFFECT_DURATION).then_some(self.state.duration)
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if name == EFFECT_DURATION {
            self.state.duration = value;
        }
        self.properties.set(name, value.into());
    }

    fn set_vector4(&mut self, name: &str, value: Vec4) {
        self.properties.set(name, value.into());
    }

    fn set_mesh(&mut self, _name: &str, mesh: Handle<Mesh>) {
        let radius = self
            .meshes
            .get(&mesh)
            .and_then(|mesh| mesh.compute_aabb())
            .map(|aabb| aabb.half_extents.length());
        if let Some(radius) = radius {
            self.properties.set(EMITTER_RADIUS, radius.into());
        }
        self.state.source_mesh = Some(mesh);
    }

    fn set_enabled(&mut self, enabled: bool) {
        *self.visibility = if enabled {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    fn play(&mut self) {
        if let Some(spawner) = self.spawner.as_mut() {
            spawner.active = true;
            spawner.reset();
        }
    }
}
