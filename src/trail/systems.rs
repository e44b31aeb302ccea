use crate::events::{TargetFrameClamped, TriggerMeshTrail};
use crate::trail::components::{MeshTrail, TrailGhost};
use crate::trail::material::TrailGlowMaterial;
use crate::vologram::{PlaybackView, VolumetricPlayback};
use bevy::diagnostic::FrameCount;
use bevy::light::NotShadowCaster;
use bevy::prelude::*;
use vfxcore::target::VolumetricPlayer;
use vfxcore::trail::{TrailStatus, TrailTransform};

pub fn handle_trail_triggers(
    mut triggers: MessageReader<TriggerMeshTrail>,
    mut trails: Query<&mut MeshTrail>,
) {
    for trigger in triggers.read() {
        match trails.get_mut(trigger.entity) {
            Ok(mut trail) => trail.spawner.trigger(),
            Err(_) => warn!("Entity {} has no mesh trail to trigger", trigger.entity),
        }
    }
}

/// Snapshots the world pose of every trailing mesh and spawns a ghost per
/// instance its spawner hands out this frame.
pub fn spawn_mesh_trails(
    mut commands: Commands,
    time: Res<Time>,
    frames: Res<FrameCount>,
    mut materials: ResMut<Assets<TrailGlowMaterial>>,
    mut trails: Query<(
        Entity,
        &mut MeshTrail,
        &GlobalTransform,
        &Mesh3d,
        Option<&Name>,
        Option<&VolumetricPlayback>,
    )>,
    mut clamped: MessageWriter<TargetFrameClamped>,
) {
    let dt = time.delta_secs();

    for (entity, mut trail, global, mesh, name, playback) in &mut trails {
        let (scale, rotation, translation) = global.to_scale_rotation_translation();
        let view = playback.map(|playback| PlaybackView::new(playback, &frames));
        let player = view.as_ref().map(|view| view as &dyn VolumetricPlayer);

        let step = trail.spawner.update(
            dt,
            TrailTransform::new(translation, rotation),
            &mesh.0,
            player,
        );

        if let Some(clamp) = step.clamped {
            clamped.write(TargetFrameClamped {
                entity,
                requested: clamp.requested,
                max: clamp.max,
            });
        }

        if step.spawned.is_empty() {
            continue;
        }

        let label = name.map_or_else(|| entity.to_string(), |name| name.to_string());
        for mut instance in step.spawned {
            let mut material = TrailGlowMaterial::default();
            instance.start(&mut material);

            let pose = instance.transform();
            commands.spawn((
                Name::new(format!("(Meshtrail) {label}")),
                Mesh3d(instance.mesh().clone()),
                MeshMaterial3d(materials.add(material)),
                Transform {
                    translation: pose.position,
                    rotation: pose.rotation,
                    scale,
                },
                NotShadowCaster,
                TrailGhost { instance },
            ));
        }
    }
}

pub fn update_trail_ghosts(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<TrailGlowMaterial>>,
    mut ghosts: Query<(Entity, &mut TrailGhost, &MeshMaterial3d<TrailGlowMaterial>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut ghost, handle) in &mut ghosts {
        let Some(material) = materials.get_mut(&handle.0) else {
            commands.entity(entity).despawn();
            continue;
        };

        if let TrailStatus::Expired = ghost.instance.update(dt, material) {
            trace!("Trail ghost {entity} expired at alpha {}", ghost.instance.alpha());
            commands.entity(entity).despawn();
        }
    }
}

