pub mod components;
pub mod material;
mod systems;

use bevy::prelude::*;
use systems::*;

pub struct DissolvePlugin;

impl Plugin for DissolvePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<DissolveMaterial>::default())
            .add_systems(
                Update,
                (
                    install_dissolve_materials,
                    handle_dissolve_triggers,
                    update_dissolves,
                    update_vologram_dissolves,
                )
                    .chain(),
            );
    }
}

pub use components::{Dissolve, DissolveBinding, VologramDissolve};
pub use material::DissolveMaterial;
