mod logic;
mod systems;

use crate::demo::systems::*;
use bevy::prelude::*;

/// Showcase scene: a dissolving cube, a vologram stand-in and a runner that
/// leaves mesh trails.
pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene)
            .add_systems(Update, (demo_controls, patrol, report_clamped_frames));
    }
}
