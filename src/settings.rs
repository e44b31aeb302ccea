use bevy::prelude::*;
use vfxcore::ToolkitConfig;

pub const CONFIG_PATH: &str = "assets/vfx_toolkit.toml";

/// Author-time configuration for every effect component spawned by the app.
#[derive(Resource, Clone, Deref, DerefMut)]
pub struct ToolkitSettings(pub ToolkitConfig);

impl Default for ToolkitSettings {
    fn default() -> Self {
        match ToolkitConfig::load_from_file(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded effect settings from {CONFIG_PATH}");
                Self(config)
            }
            Err(err) => {
                warn!("Using default effect settings, {CONFIG_PATH} not usable: {err}");
                Self(ToolkitConfig::default())
            }
        }
    }
}
