use crate::demo::logic::{heading, patrol_position};
use crate::dissolve::{Dissolve, VologramDissolve};
use crate::events::{TargetFrameClamped, TriggerDissolve, TriggerMeshTrail};
use crate::settings::ToolkitSettings;
use crate::trail::MeshTrail;
use crate::vologram::VolumetricPlayback;
use bevy::math::EulerRot;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;
use vfxcore::config::MeshTrailConfig;

const VOLOGRAM_FRAMES: u32 = 120;
const PATROL_CENTER: Vec3 = Vec3::new(4.0, 1.0, 0.0);
const PATROL_RADIUS: f32 = 3.0;

/// Dissolve that responds to the demo's keyboard controls.
#[derive(Component, Default)]
pub struct DissolveDemo {
    reverse_next: bool,
    distinct_colors: bool,
}

#[derive(Component)]
pub struct Patrol {
    elapsed: f32,
    moving: bool,
}

pub fn spawn_scene(
    mut commands: Commands,
    settings: Res<ToolkitSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 5.0, 14.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
    ));

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.25, 0.28))),
    ));

    commands.spawn((
        Name::new("Dissolving cube"),
        Mesh3d(meshes.add(Cuboid::new(2.0, 2.0, 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.7, 0.6))),
        Transform::from_xyz(-4.0, 1.0, 0.0),
        Dissolve::new(settings.dissolve.clone()),
        DissolveDemo::default(),
    ));

    commands.spawn((
        Name::new("Vologram"),
        Mesh3d(meshes.add(Sphere::new(1.2).mesh().uv(32, 18))),
        MeshMaterial3d(materials.add(Color::srgb(0.6, 0.75, 0.9))),
        Transform::from_xyz(0.0, 1.2, 0.0),
        VologramDissolve::new(settings.vologram_dissolve.clone()),
        VolumetricPlayback::playing(VOLOGRAM_FRAMES),
        DissolveDemo::default(),
    ));

    let start = patrol_position(0.0, PATROL_CENTER, PATROL_RADIUS);
    commands.spawn((
        Name::new("Runner"),
        Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.5, 0.3))),
        Transform::from_translation(start),
        MeshTrail::new(
            MeshTrailConfig {
                play_if_moving: true,
                ..settings.mesh_trail.clone()
            },
            start,
        ),
        Patrol {
            elapsed: 0.0,
            moving: true,
        },
    ));

    info!(
        "Controls: Space dissolve, C distinct colors, 1/2 random model/effect color, \
         T trail burst, M toggle runner, P toggle vologram playback"
    );
}

pub fn demo_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut dissolve_triggers: MessageWriter<TriggerDissolve>,
    mut trail_triggers: MessageWriter<TriggerMeshTrail>,
    mut dissolves: Query<(
        Entity,
        &mut DissolveDemo,
        Option<&mut Dissolve>,
        Option<&mut VologramDissolve>,
    )>,
    mut playbacks: Query<&mut VolumetricPlayback>,
    mut trails: Query<(Entity, &mut Patrol), With<MeshTrail>>,
) {
    let mut rng = rand::rng();

    for (entity, mut demo, mut dissolve, mut vologram) in &mut dissolves {
        if keyboard.just_pressed(KeyCode::Space) {
            dissolve_triggers.write(TriggerDissolve {
                entity,
                reverse: demo.reverse_next,
            });
            demo.reverse_next = !demo.reverse_next;
        }

        if keyboard.just_pressed(KeyCode::KeyC) {
            demo.distinct_colors = !demo.distinct_colors;
            if let Some(dissolve) = dissolve.as_mut() {
                dissolve.set_use_distinct_colors(demo.distinct_colors);
            }
            if let Some(vologram) = vologram.as_mut() {
                vologram.set_use_distinct_colors(demo.distinct_colors);
            }
        }

        if keyboard.just_pressed(KeyCode::Digit1) {
            let color = random_glow(&mut rng);
            if let Some(dissolve) = dissolve.as_mut() {
                dissolve.set_model_color(color);
            }
            if let Some(vologram) = vologram.as_mut() {
                vologram.set_model_color(color);
            }
        }

        if keyboard.just_pressed(KeyCode::Digit2) {
            let color = random_glow(&mut rng);
            if let Some(dissolve) = dissolve.as_mut() {
                dissolve.set_effect_color(color);
            }
            if let Some(vologram) = vologram.as_mut() {
                vologram.set_effect_color(color);
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        for mut playback in &mut playbacks {
            playback.playing = !playback.playing;
            info!("Vologram playback {}", if playback.playing { "resumed" } else { "paused" });
        }
    }

    for (entity, mut patrol) in &mut trails {
        if keyboard.just_pressed(KeyCode::KeyT) {
            trail_triggers.write(TriggerMeshTrail { entity });
        }
        if keyboard.just_pressed(KeyCode::KeyM) {
            patrol.moving = !patrol.moving;
        }
    }
}

pub fn patrol(time: Res<Time>, mut runners: Query<(&mut Transform, &mut Patrol)>) {
    let dt = time.delta_secs();

    for (mut transform, mut patrol) in &mut runners {
        if !patrol.moving {
            continue;
        }
        patrol.elapsed += dt;

        let next = patrol_position(patrol.elapsed, PATROL_CENTER, PATROL_RADIUS);
        if let Some(rotation) = heading(transform.translation, next) {
            transform.rotation = rotation;
        }
        transform.translation = next;
    }
}

pub fn report_clamped_frames(mut clamped: MessageReader<TargetFrameClamped>, names: Query<&Name>) {
    for message in clamped.read() {
        let name = names
            .get(message.entity)
            .map_or_else(|_| message.entity.to_string(), |name| name.to_string());
        info!(
            "{name}: target frame {} clamped to {}",
            message.requested, message.max
        );
    }
}

// HDR so the edge glow blooms
fn random_glow(rng: &mut impl Rng) -> Color {
    Color::linear_rgb(
        rng.random_range(0.0..4.0),
        rng.random_range(0.0..4.0),
        rng.random_range(0.0..4.0),
    )
}
