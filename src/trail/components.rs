use bevy::color::ColorToComponents;
use bevy::prelude::*;
use vfxcore::config::MeshTrailConfig;
use vfxcore::trail::{MeshTrailSpawner, TrailInstance};

/// Leaves fading copies of the entity's mesh behind it.
#[derive(Component)]
pub struct MeshTrail {
    pub spawner: MeshTrailSpawner,
}

impl MeshTrail {
    pub fn new(config: MeshTrailConfig, position: Vec3) -> Self {
        Self {
            spawner: MeshTrailSpawner::new(config, position),
        }
    }

    pub fn set_play_state(&mut self, play: bool) {
        self.spawner.set_play_state(play);
    }

    pub fn set_play_if_moving(&mut self, enabled: bool) {
        self.spawner.set_play_if_moving(enabled);
    }

    pub fn set_trail_color(&mut self, color: Color) {
        self.spawner.set_trail_color(color.to_linear().to_vec4());
    }
}

/// One spawned ghost. Despawned once its fade and destroy delay have run out.
#[derive(Component)]
pub struct TrailGhost {
    pub instance: TrailInstance<Handle<Mesh>>,
}
