pub mod demo;
pub mod dissolve;
pub mod events;
pub mod particles;
pub mod settings;
pub mod trail;
pub mod vologram;

use crate::dissolve::DissolvePlugin;
use crate::events::{TargetFrameClamped, TriggerDissolve, TriggerMeshTrail};
use crate::particles::ParticlesPlugin;
use crate::settings::ToolkitSettings;
use crate::trail::TrailPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

/// Dissolve, vologram dissolve and mesh trail effects.
pub struct VfxToolkitPlugin;

impl Plugin for VfxToolkitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ToolkitSettings>()
            .add_message::<TriggerDissolve>()
            .add_message::<TriggerMeshTrail>()
            .add_message::<TargetFrameClamped>()
            .add_plugins((ParticlesPlugin, DissolvePlugin, TrailPlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
