pub mod components;
pub mod material;
mod systems;

use bevy::prelude::*;
use systems::*;

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<TrailGlowMaterial>::default())
            .add_systems(
                Update,
                (handle_trail_triggers, spawn_mesh_trails, update_trail_ghosts).chain(),
            );
    }
}

pub use components::{MeshTrail, TrailGhost};
pub use material::TrailGlowMaterial;
