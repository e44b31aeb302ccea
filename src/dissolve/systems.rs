use crate::dissolve::components::{Dissolve, DissolveBinding, VologramDissolve};
use crate::dissolve::material::{DissolveMaterial, DissolveRenderer};
use crate::events::{TargetFrameClamped, TriggerDissolve};
use crate::particles::{spawn_dissolve_particles, DissolveEffect, DissolveParticles, HanabiDissolveEffect};
use crate::vologram::{PlaybackView, VolumetricPlayback};
use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy_hanabi::prelude::{EffectProperties, EffectSpawner};
use vfxcore::dissolve::{DissolveStatus, DissolveTargets};
use vfxcore::progress::Direction;

type EffectQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut EffectProperties,
        Option<&'static mut EffectSpawner>,
        &'static mut Visibility,
        &'static mut DissolveParticles,
    ),
>;

/// Swaps the standard materials of new dissolve entities (and their direct
/// children) for dissolve materials and attaches a particle emitter.
pub fn install_dissolve_materials(
    mut commands: Commands,
    effect: Option<Res<DissolveEffect>>,
    standard_materials: Res<Assets<StandardMaterial>>,
    mut dissolve_materials: ResMut<Assets<DissolveMaterial>>,
    installs: Query<
        (Entity, Option<&Dissolve>, Option<&Children>),
        (
            Or<(Added<Dissolve>, Added<VologramDissolve>)>,
            Without<DissolveBinding>,
        ),
    >,
    surfaces: Query<&MeshMaterial3d<StandardMaterial>>,
) {
    for (entity, dissolve, children) in &installs {
        // static meshes keep their base texture as albedo, vologram players stream their own
        let keep_albedo = dissolve.is_some();
        let play_vfx = dissolve.is_none_or(|dissolve| dissolve.animator.config().play_vfx);

        let mut targets = vec![entity];
        if let Some(children) = children {
            targets.extend(children.to_vec());
        }

        let mut binding = DissolveBinding::default();
        for target in targets {
            let Ok(surface) = surfaces.get(target) else {
                continue;
            };
            let Some(source) = standard_materials.get(&surface.0) else {
                continue;
            };

            let albedo = source.base_color_texture.clone().filter(|_| keep_albedo);
            if binding.albedo.is_none() {
                binding.albedo = albedo.clone();
            }

            let handle = dissolve_materials.add(DissolveMaterial::from_standard(source, albedo));
            commands
                .entity(target)
                .remove::<MeshMaterial3d<StandardMaterial>>()
                .insert(MeshMaterial3d(handle.clone()));
            binding.materials.push(handle);
        }

        if binding.materials.is_empty() {
            warn!("Entity {entity} has a dissolve but no standard material to replace");
        }

        if play_vfx {
            if let Some(effect) = effect.as_deref() {
                binding.particles = Some(spawn_dissolve_particles(&mut commands, effect, entity));
            }
        }

        info!(
            "Dissolve installed on {entity} with {} material(s)",
            binding.materials.len()
        );
        commands.entity(entity).insert(binding);
    }
}

pub fn handle_dissolve_triggers(
    mut triggers: MessageReader<TriggerDissolve>,
    mut dissolves: Query<&mut Dissolve>,
    mut volograms: Query<&mut VologramDissolve>,
) {
    for trigger in triggers.read() {
        let direction = Direction::from_reverse(trigger.reverse);
        if let Ok(mut dissolve) = dissolves.get_mut(trigger.entity) {
            dissolve.animator.trigger(direction);
        } else if let Ok(mut vologram) = volograms.get_mut(trigger.entity) {
            vologram.animator.trigger(direction);
        } else {
            warn!("Entity {} has no dissolve to trigger", trigger.entity);
        }
    }
}

pub fn update_dissolves(
    time: Res<Time>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<DissolveMaterial>>,
    mut dissolves: Query<(Entity, &mut Dissolve, &DissolveBinding, Option<&Mesh3d>)>,
    mut effects: EffectQuery,
) {
    let dt = time.delta_secs();

    for (entity, mut dissolve, binding, mesh) in &mut dissolves {
        let mut renderer = DissolveRenderer::new(&mut materials, &binding.materials);
        let mut effect = effect_for(&mut effects, binding.particles, &meshes);
        let mut targets = DissolveTargets {
            renderer: &mut renderer,
            effect: effect.as_mut(),
            albedo: binding.albedo.clone(),
            mesh: mesh.map(|mesh| mesh.0.clone()),
        };

        if dissolve.animator.update(dt, &mut targets) == DissolveStatus::Finished {
            debug!("Dissolve on {entity} finished");
        }
    }
}

pub fn update_vologram_dissolves(
    time: Res<Time>,
    frames: Res<FrameCount>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<DissolveMaterial>>,
    mut volograms: Query<(
        Entity,
        &mut VologramDissolve,
        &DissolveBinding,
        &VolumetricPlayback,
        Option<&Mesh3d>,
    )>,
    mut effects: EffectQuery,
    mut clamped: MessageWriter<TargetFrameClamped>,
) {
    let dt = time.delta_secs();

    for (entity, mut vologram, binding, playback, mesh) in &mut volograms {
        let player = PlaybackView::new(playback, &frames);
        let mut renderer = DissolveRenderer::new(&mut materials, &binding.materials);
        let mut effect = effect_for(&mut effects, binding.particles, &meshes);
        let mut targets = DissolveTargets {
            renderer: &mut renderer,
            effect: effect.as_mut(),
            albedo: None,
            mesh: mesh.map(|mesh| mesh.0.clone()),
        };

        let step = vologram.animator.update(dt, &player, &mut targets);
        if let Some(clamp) = step.clamped {
            clamped.write(TargetFrameClamped {
                entity,
                requested: clamp.requested,
                max: clamp.max,
            });
        }
        if step.status == DissolveStatus::Finished {
            debug!("Vologram dissolve on {entity} finished");
        }
    }
}

fn effect_for<'a>(
    effects: &'a mut EffectQuery<'_, '_>,
    entity: Option<Entity>,
    meshes: &'a Assets<Mesh>,
) -> Option<HanabiDissolveEffect<'a>> {
    let (properties, spawner, visibility, state) = effects.get_mut(entity?).ok()?;
    Some(HanabiDissolveEffect {
        properties,
        spawner,
        visibility,
        state,
        meshes,
    })
}
